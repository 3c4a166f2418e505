//! Database product selection.
//!
//! A [`Dbms`] is chosen once (usually from [`RuntimeConfig`](crate::RuntimeConfig))
//! and hands out a fresh dialect clause per table query.

use crate::error::CBeanError;
use crate::query::dialect::{
    SqlClauseDb2, SqlClauseDefault, SqlClauseDerby, SqlClauseFirebird, SqlClauseH2,
    SqlClauseMsAccess, SqlClauseMySql, SqlClauseOracle, SqlClausePostgreSql, SqlClauseSqlServer,
    SqlClauseSqlite,
};
use crate::query::SqlClause;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported database products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dbms {
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "postgres")]
    PostgreSql,
    Oracle,
    Db2,
    #[serde(alias = "mssql")]
    SqlServer,
    #[default]
    H2,
    Derby,
    Sqlite,
    Firebird,
    MsAccess,
    Unknown,
}

impl Dbms {
    /// Create the dialect clause for one table query.
    pub fn create_sql_clause(self, table_db_name: &str) -> Box<dyn SqlClause> {
        match self {
            Dbms::MySql => Box::new(SqlClauseMySql::new(table_db_name)),
            Dbms::PostgreSql => Box::new(SqlClausePostgreSql::new(table_db_name)),
            Dbms::Oracle => Box::new(SqlClauseOracle::new(table_db_name)),
            Dbms::Db2 => Box::new(SqlClauseDb2::new(table_db_name)),
            Dbms::SqlServer => Box::new(SqlClauseSqlServer::new(table_db_name)),
            Dbms::H2 => Box::new(SqlClauseH2::new(table_db_name)),
            Dbms::Derby => Box::new(SqlClauseDerby::new(table_db_name)),
            Dbms::Sqlite => Box::new(SqlClauseSqlite::new(table_db_name)),
            Dbms::Firebird => Box::new(SqlClauseFirebird::new(table_db_name)),
            Dbms::MsAccess => Box::new(SqlClauseMsAccess::new(table_db_name)),
            Dbms::Unknown => Box::new(SqlClauseDefault::new(table_db_name)),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Dbms::MySql => "mysql",
            Dbms::PostgreSql => "postgresql",
            Dbms::Oracle => "oracle",
            Dbms::Db2 => "db2",
            Dbms::SqlServer => "sqlserver",
            Dbms::H2 => "h2",
            Dbms::Derby => "derby",
            Dbms::Sqlite => "sqlite",
            Dbms::Firebird => "firebird",
            Dbms::MsAccess => "msaccess",
            Dbms::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Dbms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dbms {
    type Err = CBeanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dbms = match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Dbms::MySql,
            "postgresql" | "postgres" => Dbms::PostgreSql,
            "oracle" => Dbms::Oracle,
            "db2" => Dbms::Db2,
            "sqlserver" | "mssql" => Dbms::SqlServer,
            "h2" => Dbms::H2,
            "derby" => Dbms::Derby,
            "sqlite" => Dbms::Sqlite,
            "firebird" => Dbms::Firebird,
            "msaccess" => Dbms::MsAccess,
            "unknown" => Dbms::Unknown,
            other => {
                return Err(CBeanError::IllegalState(format!(
                    "Unknown database product: {other}"
                )))
            }
        };
        Ok(dbms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("postgres".parse::<Dbms>().ok(), Some(Dbms::PostgreSql));
        assert_eq!("MSSQL".parse::<Dbms>().ok(), Some(Dbms::SqlServer));
        assert_eq!(" sqlite ".parse::<Dbms>().ok(), Some(Dbms::Sqlite));
        assert!("informix".parse::<Dbms>().is_err());
    }

    #[test]
    fn test_code_round_trips_through_parse() {
        for dbms in [Dbms::MySql, Dbms::Oracle, Dbms::Firebird, Dbms::Unknown] {
            assert_eq!(dbms.code().parse::<Dbms>().ok(), Some(dbms));
        }
    }

    #[test]
    fn test_factory_picks_dialect() {
        let clause = Dbms::MySql.create_sql_clause("MEMBER");
        assert_eq!(clause.base().table_db_name(), "MEMBER");
        assert_eq!(clause.dbms(), Dbms::MySql);
    }
}
