// Storage module - the read-only relations the mock engine queries
// Nothing in here is ever mutated once a catalog has been built

pub mod fixtures;
pub mod relation;

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

pub use fixtures::Catalog;
pub use relation::Relation;

/// A single cell of a relation
///
/// Serializes untagged so a row goes over the wire as a plain JSON array
/// of numbers, strings and nulls.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Compare two values of the same kind
    /// Returns None for nulls and for mixed kinds, which have no order
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<Option<i64>> for Value {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Value::Null, Value::Integer)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_typed() {
        assert_ne!(Value::Integer(10), Value::Text("10".to_string()));
        assert_eq!(Value::from("SALES"), Value::Text("SALES".to_string()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_compare_only_within_a_kind() {
        assert_eq!(
            Value::Integer(800).compare(&Value::Integer(5000)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("WARD").compare(&Value::from("ADAMS")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Integer(1).compare(&Value::from("1")), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_serializes_untagged() {
        let row = vec![Value::Integer(7839), Value::from("KING"), Value::Null];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[7839,"KING",null]"#);
    }
}
