// Query errors
// Every failure the mock engine can report, with its vendor-style code

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The FROM target is not a known relation
    #[error("table or view does not exist (mock mode)")]
    TableNotFound {
        table: String,
        line: usize,
        position: usize,
    },

    /// A SELECT without any FROM keyword
    #[error("FROM keyword not found where expected")]
    MissingFrom { position: usize },

    /// FROM was present but no table name followed it
    #[error("could not find a table in the statement")]
    UnresolvedTable,

    #[error("{0}")]
    Internal(String),
}

impl QueryError {
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::TableNotFound { .. } => "ORA-00942",
            QueryError::MissingFrom { .. } => "ORA-00923",
            QueryError::Internal(_) => "ERR-001",
            QueryError::UnresolvedTable => "ERR-002",
        }
    }

    /// 1-based line of the offending token, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            QueryError::TableNotFound { line, .. } => Some(*line),
            QueryError::MissingFrom { .. } => Some(1),
            _ => None,
        }
    }

    /// 1-based column of the offending token, when known
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::TableNotFound { position, .. } | QueryError::MissingFrom { position } => {
                Some(*position)
            }
            _ => None,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            line: self.line(),
            position: self.position(),
        }
    }
}

impl From<anyhow::Error> for QueryError {
    fn from(err: anyhow::Error) -> Self {
        QueryError::Internal(format!("{err:#}"))
    }
}

/// The `error` object of a failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}
