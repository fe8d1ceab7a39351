// Query results
// The outcome of one statement, and the JSON envelope it travels in

use super::error::{ErrorPayload, QueryError};
use crate::storage::Value;
use serde::{Serialize, Serializer};

/// Tabular output of a SELECT
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    /// Upper-cased column names
    pub columns: Vec<String>,
    /// One value per column, in column order
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    /// Seconds since the statement was received
    pub execution_time: f64,
}

/// Represents the result of a query execution
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Rows returned from a SELECT query
    Rows(ResultSet),
    /// Simulated row count for DML, zero for everything else
    Affected {
        affected_rows: u64,
        execution_time: f64,
    },
    Failed {
        error: QueryError,
        execution_time: f64,
    },
}

/// Wire shape shared with the driver proxy
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a ResultSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, QueryResult::Failed { .. })
    }

    pub fn execution_time(&self) -> f64 {
        match self {
            QueryResult::Rows(set) => set.execution_time,
            QueryResult::Affected { execution_time, .. }
            | QueryResult::Failed { execution_time, .. } => *execution_time,
        }
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            QueryResult::Rows(set) => Some(set),
            _ => None,
        }
    }

    pub fn affected_rows(&self) -> Option<u64> {
        match self {
            QueryResult::Affected { affected_rows, .. } => Some(*affected_rows),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            QueryResult::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn envelope(&self) -> ResponseEnvelope<'_> {
        match self {
            QueryResult::Rows(set) => ResponseEnvelope {
                success: true,
                data: Some(set),
                affected_rows: None,
                execution_time: None,
                error: None,
            },
            QueryResult::Affected {
                affected_rows,
                execution_time,
            } => ResponseEnvelope {
                success: true,
                data: None,
                affected_rows: Some(*affected_rows),
                execution_time: Some(*execution_time),
                error: None,
            },
            QueryResult::Failed {
                error,
                execution_time,
            } => ResponseEnvelope {
                success: false,
                data: None,
                affected_rows: None,
                execution_time: Some(*execution_time),
                error: Some(error.payload()),
            },
        }
    }

    /// Format the result as a string for display
    /// SELECT results are drawn as a box table
    pub fn format(&self) -> String {
        match self {
            QueryResult::Affected { affected_rows, .. } => {
                format!("{} row(s) affected", affected_rows)
            }
            QueryResult::Failed { error, .. } => {
                let mut msg = format!("{}: {}", error.code(), error);
                if let (Some(line), Some(position)) = (error.line(), error.position()) {
                    msg.push_str(&format!(" (line {}, position {})", line, position));
                }
                msg
            }
            QueryResult::Rows(set) => format_table(set),
        }
    }
}

impl Serialize for QueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.envelope().serialize(serializer)
    }
}

fn format_table(set: &ResultSet) -> String {
    if set.rows.is_empty() {
        return "No rows found".to_string();
    }

    let cells: Vec<Vec<String>> = set
        .rows
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect();

    // Calculate column widths
    let mut widths: Vec<usize> = set.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut result = String::new();

    result.push_str(&border(&widths, '┌', '┬', '┐'));
    result.push_str(&line(&set.columns, &widths));
    result.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &cells {
        result.push_str(&line(row, &widths));
    }
    result.push_str(&border(&widths, '└', '┴', '┘'));

    result.push_str(&format!("\n{} row(s) returned", set.row_count));

    result
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&middle.to_string()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("│");
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {:<width$} │", cell, width = width));
    }
    out.push('\n');
    out
}
