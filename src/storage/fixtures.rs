// Fixture catalog
// The classic SCOTT demo schema: emp, dept and salgrade

use super::{Relation, Value};
use std::collections::HashMap;

/// The set of relations an engine can query, addressed by alias
///
/// Aliases are matched case-insensitively. Several aliases may point at
/// the same relation (`emp`, `employee`, `employees`).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    relations: Vec<Relation>,
    aliases: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation under its own name plus any extra aliases
    pub fn with_relation(mut self, relation: Relation, aliases: &[&str]) -> Self {
        let index = self.relations.len();
        self.aliases.insert(relation.name().to_string(), index);
        for alias in aliases {
            self.aliases.insert(alias.to_lowercase(), index);
        }
        self.relations.push(relation);
        self
    }

    /// The standard demo catalog
    pub fn scott() -> Self {
        Self::new()
            .with_relation(emp(), &["employee", "employees"])
            .with_relation(dept(), &["department", "departments"])
            .with_relation(salgrade(), &[])
    }

    /// Look up a relation by name or alias
    pub fn resolve(&self, name: &str) -> Option<&Relation> {
        self.aliases
            .get(&name.to_lowercase())
            .map(|&index| &self.relations[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(&name.to_lowercase())
    }

    /// Canonical relation names in registration order
    pub fn relation_names(&self) -> Vec<&str> {
        self.relations.iter().map(|r| r.name()).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn emp_row(
    empno: i64,
    ename: &str,
    job: &str,
    mgr: Option<i64>,
    hiredate: &str,
    sal: i64,
    comm: Option<i64>,
    deptno: i64,
) -> Vec<Value> {
    vec![
        empno.into(),
        ename.into(),
        job.into(),
        mgr.into(),
        hiredate.into(),
        sal.into(),
        comm.into(),
        deptno.into(),
    ]
}

fn emp() -> Relation {
    Relation::fixed(
        "emp",
        &["empno", "ename", "job", "mgr", "hiredate", "sal", "comm", "deptno"],
        vec![
            emp_row(7369, "SMITH", "CLERK", Some(7902), "1980-12-17", 800, None, 20),
            emp_row(7499, "ALLEN", "SALESMAN", Some(7698), "1981-02-20", 1600, Some(300), 30),
            emp_row(7521, "WARD", "SALESMAN", Some(7698), "1981-02-22", 1250, Some(500), 30),
            emp_row(7566, "JONES", "MANAGER", Some(7839), "1981-04-02", 2975, None, 20),
            emp_row(7654, "MARTIN", "SALESMAN", Some(7698), "1981-09-28", 1250, Some(1400), 30),
            emp_row(7698, "BLAKE", "MANAGER", Some(7839), "1981-05-01", 2850, None, 30),
            emp_row(7782, "CLARK", "MANAGER", Some(7839), "1981-06-09", 2450, None, 10),
            emp_row(7788, "SCOTT", "ANALYST", Some(7566), "1982-12-09", 3000, None, 20),
            emp_row(7839, "KING", "PRESIDENT", None, "1981-11-17", 5000, None, 10),
            emp_row(7844, "TURNER", "SALESMAN", Some(7698), "1981-09-08", 1500, Some(0), 30),
            emp_row(7876, "ADAMS", "CLERK", Some(7788), "1983-01-12", 1100, None, 20),
            emp_row(7900, "JAMES", "CLERK", Some(7698), "1981-12-03", 950, None, 30),
            emp_row(7902, "FORD", "ANALYST", Some(7566), "1981-12-03", 3000, None, 20),
        ],
    )
}

fn dept() -> Relation {
    Relation::fixed(
        "dept",
        &["deptno", "dname", "loc"],
        vec![
            vec![Value::Integer(10), Value::from("ACCOUNTING"), Value::from("NEW YORK")],
            vec![Value::Integer(20), Value::from("RESEARCH"), Value::from("DALLAS")],
            vec![Value::Integer(30), Value::from("SALES"), Value::from("CHICAGO")],
            vec![Value::Integer(40), Value::from("OPERATIONS"), Value::from("BOSTON")],
        ],
    )
}

fn salgrade() -> Relation {
    Relation::fixed(
        "salgrade",
        &["grade", "losal", "hisal"],
        vec![
            vec![Value::Integer(1), Value::Integer(700), Value::Integer(1200)],
            vec![Value::Integer(2), Value::Integer(1201), Value::Integer(1400)],
            vec![Value::Integer(3), Value::Integer(1401), Value::Integer(2000)],
            vec![Value::Integer(4), Value::Integer(2001), Value::Integer(3000)],
            vec![Value::Integer(5), Value::Integer(3001), Value::Integer(9999)],
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scott_shapes() {
        let catalog = Catalog::scott();
        for (name, rows, width) in [("emp", 13, 8), ("dept", 4, 3), ("salgrade", 5, 3)] {
            let relation = catalog.resolve(name).unwrap();
            assert_eq!(relation.len(), rows, "{name}");
            assert_eq!(relation.columns().len(), width, "{name}");
            assert!(relation.rows().iter().all(|row| row.len() == width));
        }
    }

    #[test]
    fn test_aliases_resolve_case_insensitively() {
        let catalog = Catalog::scott();
        for alias in ["EMP", "Employee", "employees"] {
            assert_eq!(catalog.resolve(alias).unwrap().name(), "emp");
        }
        for alias in ["dept", "DEPARTMENT", "Departments"] {
            assert_eq!(catalog.resolve(alias).unwrap().name(), "dept");
        }
        assert!(catalog.contains("SALGRADE"));
        assert!(!catalog.contains("bonus"));
        assert!(catalog.resolve("users").is_none());
    }

    #[test]
    fn test_relation_names_in_registration_order() {
        assert_eq!(Catalog::scott().relation_names(), vec!["emp", "dept", "salgrade"]);
        assert!(Catalog::new().relation_names().is_empty());
    }
}
