//! Dynamic column values
//!
//! Every value read from a result set, bound into a manual order or used as a
//! relation key is a `sea_query::Value`. This module adds the few operations
//! the runtime needs on top of it:
//!
//! - **`is_null_value`** - SQL NULL detection across all typed null variants
//! - **`to_sql_literal`** - literal rendering for inline SQL fragments
//! - **`hash_value`** - hashing consistent with `Value`'s equality

pub mod literal;
pub mod hash;

pub use literal::{is_null_value, to_sql_literal};
pub use hash::hash_value;
