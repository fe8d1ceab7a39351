// Query Executor
// The mock engine: runs SQL text against the fixture catalog and answers
// the way a real server would, including a bit of network latency

use super::error::QueryError;
use super::parser::{
    locate, ColumnSelection, ParsedQuery, QueryParser, SortDirection, StatementKind,
};
use super::result::{QueryResult, ResultSet};
use crate::dbms::{ConnectionTestResult, DbmsKind};
use crate::storage::{Catalog, Relation, Value};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::ops::{Range, RangeInclusive};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Tunables for the simulated server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Delay applied before every answer
    pub latency: Range<Duration>,
    /// Reported row count for INSERT, UPDATE and DELETE
    pub affected_rows: RangeInclusive<u64>,
    /// Seed for latency and row count draws; entropy when None
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(200)..Duration::from_millis(500),
            affected_rows: 1..=10,
            seed: None,
        }
    }
}

/// Executes SQL against an immutable catalog
///
/// The engine holds no per-query state, so one instance can serve any
/// number of concurrent `execute` calls.
pub struct MockQueryEngine {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    rng: Mutex<StdRng>,
}

impl MockQueryEngine {
    /// Engine over the SCOTT catalog with default timings
    pub fn new() -> Self {
        Self::with_config(Arc::new(Catalog::scott()), EngineConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Canonical names of the relations this engine can query
    pub fn relation_names(&self) -> Vec<&str> {
        self.catalog.relation_names()
    }

    /// Execute one statement
    ///
    /// Never fails: every error is folded into `QueryResult::Failed`.
    pub async fn execute(&self, sql: &str) -> QueryResult {
        let started = Instant::now();

        tokio::time::sleep(self.draw_latency()).await;

        let kind = QueryParser::classify(sql);
        debug!("executing {} statement: {}", kind, sql.trim());

        match self.run(sql.trim(), kind, started) {
            Ok(result) => result,
            Err(error) => {
                warn!("mock query failed with {}: {}", error.code(), error);
                QueryResult::Failed {
                    error,
                    execution_time: started.elapsed().as_secs_f64(),
                }
            }
        }
    }

    /// Mock-mode connection test, which always succeeds
    pub fn test_connection(&self, dbms: DbmsKind) -> ConnectionTestResult {
        debug!("mock connection test for {}", dbms);
        ConnectionTestResult {
            success: true,
            message: "Connected in mock mode (start the driver proxy for a real connection)"
                .to_string(),
            version: Some(dbms.mock_version().to_string()),
        }
    }

    fn run(
        &self,
        sql: &str,
        kind: StatementKind,
        started: Instant,
    ) -> Result<QueryResult, QueryError> {
        self.validate(sql)?;

        let result = match kind {
            StatementKind::Select => QueryResult::Rows(self.select(sql, started)?),
            kind if kind.is_dml() => QueryResult::Affected {
                affected_rows: self.draw_affected_rows(),
                execution_time: started.elapsed().as_secs_f64(),
            },
            _ => QueryResult::Affected {
                affected_rows: 0,
                execution_time: started.elapsed().as_secs_f64(),
            },
        };

        Ok(result)
    }

    /// Reject unknown FROM targets and SELECTs without FROM
    fn validate(&self, sql: &str) -> Result<(), QueryError> {
        if let Some(table) = QueryParser::from_target(sql) {
            if !self.catalog.contains(&table) {
                let (line, position) = locate(sql, &table).unwrap_or((1, 1));
                return Err(QueryError::TableNotFound {
                    table,
                    line,
                    position,
                });
            }
        }

        let upper = sql.to_uppercase();
        if upper.starts_with("SELECT") && !upper.contains("FROM") {
            return Err(QueryError::MissingFrom {
                position: sql.chars().count(),
            });
        }

        Ok(())
    }

    fn select(&self, sql: &str, started: Instant) -> Result<ResultSet, QueryError> {
        let parsed = QueryParser::parse(sql)?;

        let table = parsed.table.as_deref().ok_or(QueryError::UnresolvedTable)?;
        let relation = self.catalog.resolve(table).ok_or_else(|| QueryError::TableNotFound {
            table: table.to_string(),
            line: 1,
            position: locate(sql, table).map_or(1, |(_, position)| position),
        })?;

        let mut matched: Vec<&Vec<Value>> = relation
            .rows()
            .iter()
            .filter(|row| matches_all(relation, row, &parsed))
            .collect();

        if let Some(order) = &parsed.order_by {
            if let Some(index) = relation.column_index(&order.column) {
                matched.sort_by(|a, b| compare_for_sort(&a[index], &b[index], order.direction));
            }
        }

        let indices = projection(relation, &parsed.columns);
        let rows: Vec<Vec<Value>> = matched
            .into_iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        debug!("{} row(s) selected from '{}'", rows.len(), relation.name());

        Ok(ResultSet {
            columns: indices
                .iter()
                .map(|&i| relation.columns()[i].to_uppercase())
                .collect(),
            row_count: rows.len(),
            rows,
            execution_time: started.elapsed().as_secs_f64(),
        })
    }

    fn draw_latency(&self) -> Duration {
        let range = self.config.latency.clone();
        if range.is_empty() {
            return range.start;
        }
        self.lock_rng().gen_range(range)
    }

    fn draw_affected_rows(&self) -> u64 {
        let range = self.config.affected_rows.clone();
        if range.is_empty() {
            return *range.start();
        }
        self.lock_rng().gen_range(range)
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockQueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Every predicate must name an existing column holding an equal value
fn matches_all(relation: &Relation, row: &[Value], parsed: &ParsedQuery) -> bool {
    parsed.predicates.iter().all(|(column, expected)| {
        relation
            .column_index(column)
            .is_some_and(|i| &row[i] == expected)
    })
}

/// Nulls go last in both directions
fn compare_for_sort(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Column indices to emit, in output order
fn projection(relation: &Relation, selection: &ColumnSelection) -> Vec<usize> {
    let all = || (0..relation.columns().len()).collect::<Vec<_>>();

    match selection {
        ColumnSelection::All => all(),
        ColumnSelection::Named(names) => {
            let known: Vec<usize> = names
                .iter()
                .filter_map(|name| relation.column_index(name))
                .collect();
            if known.is_empty() {
                all()
            } else {
                known
            }
        }
    }
}
