// Relation implementation
// A relation is a named table with a fixed column list and fixed rows

use super::Value;
use anyhow::{anyhow, Result};

/// An immutable in-memory table
#[derive(Debug, Clone)]
pub struct Relation {
    name: String,
    /// Column names in natural order, lowercase
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Relation {
    /// Build a relation, checking that every row matches the column list
    pub fn new(name: &str, columns: &[&str], rows: Vec<Vec<Value>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(anyhow!(
                "Row {} of '{}': expected {} values, got {}",
                index,
                name,
                columns.len(),
                row.len()
            ));
        }

        Ok(Self::fixed(name, columns, rows))
    }

    /// Build a relation whose rows are known to be well-formed
    pub(crate) fn fixed(name: &str, columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.to_lowercase(),
            columns: columns.iter().map(|c| c.to_lowercase()).collect(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = Relation::new(
            "dept",
            &["deptno", "dname"],
            vec![vec![Value::Integer(10)]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected 2 values, got 1"));
    }

    #[test]
    fn test_names_are_lowercased() {
        let relation = Relation::new(
            "DEPT",
            &["DEPTNO", "Loc"],
            vec![vec![Value::Integer(10), Value::from("NEW YORK")]],
        )
        .unwrap();
        assert_eq!(relation.name(), "dept");
        assert_eq!(relation.column_index("loc"), Some(1));
        assert_eq!(relation.column_index("LOC"), None);
        assert_eq!(relation.len(), 1);
    }
}
