// SQL Parser
// This module pulls just enough structure out of SQL text to evaluate it
// against the fixture relations. It is pattern matching, not a grammar:
// anything outside SELECT / FROM / WHERE col = literal / ORDER BY is ignored.

use crate::storage::Value;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static FROM_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FROM\s+(\w+)").expect("invalid FROM regex"));

static SELECT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SELECT\s+(.+?)\s+FROM").expect("invalid SELECT regex"));

static WHERE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)WHERE\s+(.+?)(?:\s+ORDER|\s+GROUP|\s+LIMIT|;|$)")
        .expect("invalid WHERE regex")
});

static AND_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("invalid AND regex"));

static EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\s*=\s*([0-9]+|'[^']*')").expect("invalid equality regex")
});

static ORDER_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ORDER\s+BY\s+(\w+)(?:\s+(ASC|DESC))?").expect("invalid ORDER BY regex")
});

/// Statement category, decided by the leading keyword alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// CREATE, ALTER or DROP
    Ddl,
    Other,
}

impl StatementKind {
    pub fn is_dml(self) -> bool {
        matches!(
            self,
            StatementKind::Insert | StatementKind::Update | StatementKind::Delete
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Ddl => "DDL",
            StatementKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// The select list of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    /// `*`, or no recognizable select list at all
    All,
    /// Lowercased names in the order they were written
    Named(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// What the engine needs to know about a SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Lowercased FROM target
    pub table: Option<String>,
    pub columns: ColumnSelection,
    /// Equality predicates, all of which must hold
    pub predicates: BTreeMap<String, Value>,
    pub order_by: Option<OrderBy>,
}

/// The query parser
pub struct QueryParser;

impl QueryParser {
    /// Classify a statement by its first keyword
    pub fn classify(sql: &str) -> StatementKind {
        let upper = sql.trim().to_uppercase();
        let starts = |keyword: &str| upper.starts_with(keyword);

        if starts("SELECT") {
            StatementKind::Select
        } else if starts("INSERT") {
            StatementKind::Insert
        } else if starts("UPDATE") {
            StatementKind::Update
        } else if starts("DELETE") {
            StatementKind::Delete
        } else if starts("CREATE") || starts("ALTER") || starts("DROP") {
            StatementKind::Ddl
        } else {
            StatementKind::Other
        }
    }

    /// The word following the first FROM, lowercased
    pub fn from_target(sql: &str) -> Option<String> {
        FROM_TABLE
            .captures(sql)
            .map(|caps| caps[1].to_lowercase())
    }

    /// Parse a SELECT into table, columns, predicates and ordering
    ///
    /// Conjuncts that are not a plain `column = literal` are dropped
    /// without complaint. The only failure is an integer literal that
    /// does not fit in an i64.
    pub fn parse(sql: &str) -> Result<ParsedQuery> {
        Ok(ParsedQuery {
            table: Self::from_target(sql),
            columns: Self::parse_columns(sql),
            predicates: Self::parse_where(sql)?,
            order_by: Self::parse_order_by(sql),
        })
    }

    fn parse_columns(sql: &str) -> ColumnSelection {
        let list = match SELECT_LIST.captures(sql) {
            Some(caps) => caps[1].trim().to_string(),
            None => return ColumnSelection::All,
        };

        if list == "*" {
            return ColumnSelection::All;
        }

        ColumnSelection::Named(
            list.split(',')
                .map(|column| column.trim().to_lowercase())
                .collect(),
        )
    }

    fn parse_where(sql: &str) -> Result<BTreeMap<String, Value>> {
        let mut predicates = BTreeMap::new();

        let Some(caps) = WHERE_CLAUSE.captures(sql) else {
            return Ok(predicates);
        };

        for conjunct in AND_SEPARATOR.split(&caps[1]) {
            if let Some(eq) = EQUALITY.captures(conjunct) {
                let value = Self::parse_literal(&eq[2])?;
                predicates.insert(eq[1].to_lowercase(), value);
            }
        }

        Ok(predicates)
    }

    fn parse_literal(raw: &str) -> Result<Value> {
        if let Some(text) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            return Ok(Value::Text(text.to_string()));
        }

        let number = raw
            .parse::<i64>()
            .with_context(|| format!("invalid integer literal '{}'", raw))?;
        Ok(Value::Integer(number))
    }

    fn parse_order_by(sql: &str) -> Option<OrderBy> {
        let caps = ORDER_BY.captures(sql)?;
        let direction = match caps.get(2) {
            Some(dir) if dir.as_str().eq_ignore_ascii_case("DESC") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        Some(OrderBy {
            column: caps[1].to_lowercase(),
            direction,
        })
    }
}

/// Find the first occurrence of `needle` in `text`, ignoring case
///
/// Returns the 1-based (line, column) of the match.
pub fn locate(text: &str, needle: &str) -> Option<(usize, usize)> {
    let haystack = text.to_lowercase();
    let offset = haystack.find(&needle.to_lowercase())?;
    let before = &haystack[..offset];

    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;

    Some((line, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(QueryParser::classify("  select * from emp"), StatementKind::Select);
        assert_eq!(QueryParser::classify("INSERT INTO emp VALUES (1)"), StatementKind::Insert);
        assert_eq!(QueryParser::classify("Update emp SET sal = 1"), StatementKind::Update);
        assert_eq!(QueryParser::classify("DELETE FROM emp"), StatementKind::Delete);
        assert_eq!(QueryParser::classify("create table t (a int)"), StatementKind::Ddl);
        assert_eq!(QueryParser::classify("ALTER TABLE t ADD b INT"), StatementKind::Ddl);
        assert_eq!(QueryParser::classify("drop table t"), StatementKind::Ddl);
        assert_eq!(QueryParser::classify("COMMIT"), StatementKind::Other);
        assert_eq!(QueryParser::classify(""), StatementKind::Other);
        // comments are not skipped
        assert_eq!(QueryParser::classify("-- hi\nSELECT 1"), StatementKind::Other);
    }

    #[test]
    fn test_dml_kinds() {
        assert!(StatementKind::Delete.is_dml());
        assert!(!StatementKind::Select.is_dml());
        assert!(!StatementKind::Ddl.is_dml());
    }

    #[test]
    fn test_from_target() {
        assert_eq!(
            QueryParser::from_target("select * from EMP where 1 = 1"),
            Some("emp".to_string())
        );
        assert_eq!(
            QueryParser::from_target("SELECT *\nFROM\n  Dept"),
            Some("dept".to_string())
        );
        assert_eq!(QueryParser::from_target("SELECT * FROM"), None);
        assert_eq!(QueryParser::from_target("SELECT 1"), None);
    }

    #[test]
    fn test_parse_wildcard_and_named_columns() {
        let parsed = QueryParser::parse("SELECT * FROM emp").unwrap();
        assert_eq!(parsed.columns, ColumnSelection::All);

        let parsed = QueryParser::parse("SELECT EName , sal FROM emp").unwrap();
        assert_eq!(
            parsed.columns,
            ColumnSelection::Named(vec!["ename".to_string(), "sal".to_string()])
        );
        assert_eq!(parsed.table.as_deref(), Some("emp"));
    }

    #[test]
    fn test_select_list_does_not_span_lines() {
        let parsed = QueryParser::parse("SELECT ename,\n sal FROM emp").unwrap();
        assert_eq!(parsed.columns, ColumnSelection::All);
    }

    #[test]
    fn test_parse_where_predicates() {
        let parsed =
            QueryParser::parse("SELECT * FROM emp WHERE deptno = 20 and JOB='CLERK' ORDER BY sal")
                .unwrap();
        assert_eq!(parsed.predicates.len(), 2);
        assert_eq!(parsed.predicates["deptno"], Value::Integer(20));
        assert_eq!(parsed.predicates["job"], Value::from("CLERK"));
    }

    #[test]
    fn test_unrecognized_conjuncts_are_dropped() {
        let parsed =
            QueryParser::parse("SELECT * FROM emp WHERE sal > 1000 AND deptno = 30;").unwrap();
        assert_eq!(parsed.predicates.len(), 1);
        assert_eq!(parsed.predicates["deptno"], Value::Integer(30));

        let parsed = QueryParser::parse("SELECT * FROM emp WHERE ename LIKE 'S%'").unwrap();
        assert!(parsed.predicates.is_empty());
    }

    #[test]
    fn test_later_predicate_on_same_column_wins() {
        let parsed =
            QueryParser::parse("SELECT * FROM dept WHERE deptno = 10 AND deptno = 40").unwrap();
        assert_eq!(parsed.predicates["deptno"], Value::Integer(40));
    }

    #[test]
    fn test_quoted_literal_keeps_spaces() {
        let parsed = QueryParser::parse("SELECT * FROM dept WHERE loc = 'NEW YORK'").unwrap();
        assert_eq!(parsed.predicates["loc"], Value::from("NEW YORK"));
    }

    #[test]
    fn test_oversized_integer_is_an_error() {
        let err = QueryParser::parse("SELECT * FROM emp WHERE sal = 99999999999999999999")
            .unwrap_err();
        assert!(err.to_string().contains("invalid integer literal"));
    }

    #[test]
    fn test_parse_order_by() {
        let parsed = QueryParser::parse("SELECT * FROM emp ORDER BY Sal desc").unwrap();
        assert_eq!(
            parsed.order_by,
            Some(OrderBy {
                column: "sal".to_string(),
                direction: SortDirection::Desc,
            })
        );

        let parsed = QueryParser::parse("SELECT * FROM emp order by ename").unwrap();
        assert_eq!(parsed.order_by.unwrap().direction, SortDirection::Asc);

        let parsed = QueryParser::parse("SELECT * FROM emp").unwrap();
        assert_eq!(parsed.order_by, None);
    }

    #[test]
    fn test_locate() {
        assert_eq!(locate("SELECT * FROM users", "users"), Some((1, 15)));
        assert_eq!(locate("SELECT *\nFROM\n  Users", "users"), Some((3, 3)));
        // first occurrence wins, even inside another word
        assert_eq!(locate("SELECT foo FROM fo", "fo"), Some((1, 8)));
        assert_eq!(locate("SELECT 1", "users"), None);
    }
}
