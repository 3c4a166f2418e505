//! One clause implementation per database product.
//!
//! | Dialect | fetch first | fetch page | lock |
//! |---|---|---|---|
//! | MySQL | ` limit N` | ` limit S, N` | ` for update` |
//! | PostgreSQL | ` offset 0 limit N` | ` offset S limit N` | ` for update` |
//! | Oracle | ` fetch first N rows only` | ` offset S rows fetch next N rows only` | ` for update` |
//! | DB2 | ` fetch first N rows only` | ` fetch first E rows only` (narrowing) | ` for update with RS` |
//! | SQL Server | ` top N` | ` top E` (narrowing) | ` with (updlock)` |
//! | H2 | ` limit N` | ` limit N offset S` | ` for update` |
//! | Derby | ` fetch first N rows only` | ` offset S rows fetch next N rows only` | ` for update` |
//! | SQLite | ` limit N` | ` limit S, N` | unsupported |
//! | Firebird | ` first N` | ` first N skip S` | ` for update with lock` |
//! | MS Access | ` top N` | ` top E` (narrowing) | unsupported |
//! | unknown | - (narrowing) | - (narrowing) | ` for update` |

macro_rules! clause_base_accessors {
    ($dbms:expr) => {
        fn base(&self) -> &$crate::query::ClauseBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::query::ClauseBase {
            &mut self.base
        }

        fn dbms(&self) -> $crate::dbms::Dbms {
            $dbms
        }
    };
}

mod db2;
mod default;
mod derby;
mod firebird;
mod h2;
mod msaccess;
mod mysql;
mod oracle;
mod postgresql;
mod sqlite;
mod sqlserver;

pub use db2::SqlClauseDb2;
pub use default::SqlClauseDefault;
pub use derby::SqlClauseDerby;
pub use firebird::SqlClauseFirebird;
pub use h2::SqlClauseH2;
pub use msaccess::SqlClauseMsAccess;
pub use mysql::SqlClauseMySql;
pub use oracle::SqlClauseOracle;
pub use postgresql::SqlClausePostgreSql;
pub use sqlite::SqlClauseSqlite;
pub use sqlserver::SqlClauseSqlServer;

use crate::error::CBeanError;
use crate::query::SqlClause;
use sea_query::Value;

/// Paging numbers as bind values.
pub(crate) fn bind_value(n: usize) -> Value {
    Value::BigInt(Some(i64::try_from(n).unwrap_or(i64::MAX)))
}

/// Row lock failure for engines without row-level locks.
pub(crate) fn lock_unsupported(clause: &dyn SqlClause) -> CBeanError {
    CBeanError::UnsupportedOperation(format!(
        "Lock for update is unavailable in the database: dbms={} table={}",
        clause.dbms(),
        clause.base().table_db_name()
    ))
}
