// DBMS flavors
// The five database products the editor can target. In mock mode the flavor
// only changes what the connection test reports; query semantics are shared.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_USERNAME: &str = "scott";
pub const DEFAULT_PASSWORD: &str = "tiger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DbmsKind {
    Oracle,
    Mysql,
    Postgresql,
    Mariadb,
    Sqlserver,
}

impl DbmsKind {
    pub const ALL: [DbmsKind; 5] = [
        DbmsKind::Oracle,
        DbmsKind::Mysql,
        DbmsKind::Postgresql,
        DbmsKind::Mariadb,
        DbmsKind::Sqlserver,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            DbmsKind::Oracle => "Oracle 11g XE",
            DbmsKind::Mysql => "MySQL 8.0",
            DbmsKind::Postgresql => "PostgreSQL 15",
            DbmsKind::Mariadb => "MariaDB 10.11",
            DbmsKind::Sqlserver => "SQL Server 2022",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            DbmsKind::Oracle => 1521,
            DbmsKind::Mysql => 3306,
            DbmsKind::Postgresql => 5432,
            DbmsKind::Mariadb => 3307,
            DbmsKind::Sqlserver => 1433,
        }
    }

    pub fn default_database(self) -> &'static str {
        match self {
            DbmsKind::Oracle => "XE",
            _ => "testdb",
        }
    }

    /// Server version reported by a mock-mode connection test
    pub fn mock_version(self) -> &'static str {
        match self {
            DbmsKind::Oracle => "Oracle Database 11g XE (Mock Mode)",
            DbmsKind::Mysql => "MySQL 8.0 (Mock Mode)",
            DbmsKind::Postgresql => "PostgreSQL 15.4 (Mock Mode)",
            DbmsKind::Mariadb => "MariaDB 10.11 (Mock Mode)",
            DbmsKind::Sqlserver => "SQL Server 2022 (Mock Mode)",
        }
    }
}

impl fmt::Display for DbmsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where a real driver would connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    #[serde(rename = "type")]
    pub dbms: DbmsKind,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl ConnectionConfig {
    /// Stock settings for a local install of the given flavor
    pub fn defaults_for(dbms: DbmsKind) -> Self {
        Self {
            dbms,
            host: DEFAULT_HOST.to_string(),
            port: dbms.default_port(),
            database: dbms.default_database().to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_flavor() {
        let oracle = ConnectionConfig::defaults_for(DbmsKind::Oracle);
        assert_eq!(oracle.port, 1521);
        assert_eq!(oracle.database, "XE");
        assert_eq!(oracle.username, "scott");

        let mariadb = ConnectionConfig::defaults_for(DbmsKind::Mariadb);
        assert_eq!(mariadb.port, 3307);
        assert_eq!(mariadb.database, "testdb");
    }

    #[test]
    fn test_mock_versions_are_marked() {
        for dbms in DbmsKind::ALL {
            assert!(dbms.mock_version().ends_with("(Mock Mode)"), "{dbms}");
        }
    }

    #[test]
    fn test_config_hides_password() {
        let json = serde_json::to_value(ConnectionConfig::defaults_for(DbmsKind::Sqlserver)).unwrap();
        assert_eq!(json["type"], "sqlserver");
        assert_eq!(json["port"], 1433);
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_value_enum_names() {
        let parsed = DbmsKind::from_str("postgresql", true).unwrap();
        assert_eq!(parsed, DbmsKind::Postgresql);
    }
}
