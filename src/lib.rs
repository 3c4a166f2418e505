//! # cbean
//!
//! Condition-bean ORM runtime: per-database SQL clauses, order-by building,
//! paging with deferred counting, page-number windows and relation-row
//! assembly with an identity map.
//!
//! Everything is driven from an explicitly constructed [`RuntimeConfig`];
//! database access stays with the caller through [`paging::PagingHandler`]
//! and [`relation::RowSource`].

pub mod config;
pub mod dbms;
pub mod error;
pub mod paging;
pub mod query;
pub mod relation;
pub mod tracing_helpers;
pub mod value;

pub use config::RuntimeConfig;
pub use dbms::Dbms;
pub use error::CBeanError;
