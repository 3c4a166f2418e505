//! Null placement in ORDER BY.
//!
//! Databases with `nulls first|last` get [`NativeNullsSetupper`]; the rest
//! (MySQL, SQL Server, ...) emulate it with a leading CASE expression.

use std::fmt;

/// Wraps an order-by element clause with a null-ordering idiom
pub trait OrderByNullsSetupper: fmt::Debug + Send + Sync {
    /// `column_expr` is the bare column expression, `element_clause` the
    /// already rendered `<expr> asc|desc`.
    fn setup(&self, column_expr: &str, element_clause: &str, nulls_first: bool) -> String;
}

/// `<clause> nulls first|last`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeNullsSetupper;

impl OrderByNullsSetupper for NativeNullsSetupper {
    fn setup(&self, _column_expr: &str, element_clause: &str, nulls_first: bool) -> String {
        let placement = if nulls_first { "first" } else { "last" };
        format!("{element_clause} nulls {placement}")
    }
}

/// `case when <col> is null then 1 else 0 end asc, <clause>`
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseWhenNullsSetupper;

impl OrderByNullsSetupper for CaseWhenNullsSetupper {
    fn setup(&self, column_expr: &str, element_clause: &str, nulls_first: bool) -> String {
        let (null_rank, value_rank) = if nulls_first { (0, 1) } else { (1, 0) };
        format!(
            "case when {column_expr} is null then {null_rank} else {value_rank} end asc, {element_clause}"
        )
    }
}
