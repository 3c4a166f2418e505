//! Comparison operators usable in manual-order conditions.

use crate::value::to_sql_literal;
use sea_query::Value;
use serde::Serialize;

/// How many bound values an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandArity {
    /// `IS NULL`, `IS NOT NULL`
    None,
    /// `=`, `<>`, `>`, ...
    One,
    /// `IN (...)`
    Many,
}

/// Condition-key vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionKey {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    IsNull,
    IsNotNull,
    LikeSearch,
    InScope,
}

impl ConditionKey {
    /// SQL operator text
    pub fn operand(self) -> &'static str {
        match self {
            ConditionKey::Equal => "=",
            ConditionKey::NotEqual => "<>",
            ConditionKey::GreaterThan => ">",
            ConditionKey::LessThan => "<",
            ConditionKey::GreaterEqual => ">=",
            ConditionKey::LessEqual => "<=",
            ConditionKey::IsNull => "is null",
            ConditionKey::IsNotNull => "is not null",
            ConditionKey::LikeSearch => "like",
            ConditionKey::InScope => "in",
        }
    }

    pub fn arity(self) -> OperandArity {
        match self {
            ConditionKey::IsNull | ConditionKey::IsNotNull => OperandArity::None,
            ConditionKey::InScope => OperandArity::Many,
            _ => OperandArity::One,
        }
    }

    /// Do `values` fit this operator?
    pub fn accepts(self, values: &[Value]) -> bool {
        match self.arity() {
            OperandArity::None => values.is_empty(),
            OperandArity::One => values.len() == 1,
            OperandArity::Many => !values.is_empty(),
        }
    }

    /// `<column> <operator> <value>` with values written as literals.
    ///
    /// `values` must satisfy [`accepts`](Self::accepts); extra values are ignored.
    pub fn render(self, column_expr: &str, values: &[Value]) -> String {
        match self.arity() {
            OperandArity::None => format!("{column_expr} {}", self.operand()),
            OperandArity::One => {
                let bound = values
                    .first()
                    .map(to_sql_literal)
                    .unwrap_or_else(|| "NULL".to_string());
                format!("{column_expr} {} {bound}", self.operand())
            }
            OperandArity::Many => {
                let list = values.iter().map(to_sql_literal).collect::<Vec<_>>().join(", ");
                format!("{column_expr} {} ({list})", self.operand())
            }
        }
    }
}
