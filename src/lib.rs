// mocksql - a mock SQL engine over the SCOTT demo schema
// This is the library root that exposes the public API

pub mod dbms;
pub mod query;
pub mod storage;

// Re-export commonly used types for convenience
pub use dbms::{ConnectionConfig, ConnectionTestResult, DbmsKind};
pub use query::{EngineConfig, MockQueryEngine, QueryError, QueryParser, QueryResult, ResultSet};
pub use storage::{Catalog, Relation, Value};
