//! Condition-bean query clauses.
//!
//! This module renders the SQL of one table query and keeps the fetch scope
//! (paging) state that the paging invoker drives.
//!
//! # Architecture
//!
//! - **Clause**: the dialect-independent [`ClauseBase`] and the [`SqlClause`] strategy trait
//! - **Dialect**: one [`SqlClause`] implementation per database product
//! - **Order By**: order-by elements, manual order, null ordering and ciphers
//! - **Condition Key**: comparison operators used by manual order branches
//!
//! # Examples
//!
//! ```no_run
//! use cbean::dbms::Dbms;
//! use cbean::query::{OrderDirection, SqlClause};
//!
//! let mut clause = Dbms::PostgreSql.create_sql_clause("MEMBER");
//! clause.base_mut().register_order_by("", "MEMBER_ID", OrderDirection::Asc);
//! clause.fetch_first(20)?;
//! clause.fetch_page(3)?;
//! assert_eq!(
//!     clause.clause()?,
//!     "select dfloc.* from MEMBER dfloc order by dfloc.MEMBER_ID asc offset 40 limit 20"
//! );
//! # Ok::<(), cbean::CBeanError>(())
//! ```

// Clause contract and query shape
pub mod clause;
#[doc(inline)]
pub use clause::{
    table_alias_of, ClauseBase, LeftOuterJoin, SelectColumn, SqlClause, BASE_ALIAS,
    RELATION_ALIAS_PREFIX, UNION_COUNT_ALIAS,
};

// Database-specific clauses
pub mod dialect;
#[doc(inline)]
pub use dialect::{
    SqlClauseDb2, SqlClauseDefault, SqlClauseDerby, SqlClauseFirebird, SqlClauseH2,
    SqlClauseMsAccess, SqlClauseMySql, SqlClauseOracle, SqlClausePostgreSql, SqlClauseSqlServer,
    SqlClauseSqlite,
};

// Order-by
pub mod order_by;
#[doc(inline)]
pub use order_by::{OrderByClause, OrderByElement, OrderDirection};

pub mod manual_order;
#[doc(inline)]
pub use manual_order::{CaseWhen, Connector, ManualOrderOption};

pub mod nulls;
#[doc(inline)]
pub use nulls::{CaseWhenNullsSetupper, NativeNullsSetupper, OrderByNullsSetupper};

pub mod cipher;
#[doc(inline)]
pub use cipher::{ColumnFunctionCipher, GearedCipherManager};

// Condition operators
pub mod condition_key;
#[doc(inline)]
pub use condition_key::{ConditionKey, OperandArity};
