// Query module - handles SQL parsing and mock execution
pub mod error;
pub mod executor;
pub mod parser;
pub mod result;

pub use error::QueryError;
pub use executor::{EngineConfig, MockQueryEngine};
pub use parser::QueryParser;
pub use result::{QueryResult, ResultSet};
