//! Manual order: ordering by an explicit list of conditions.
//!
//! Each `when` becomes a `when <cond> then <rank>` branch of a CASE
//! expression. Without explicit then values the rank is the branch position
//! and the else rank is the number of branches, so unmatched rows come last.
//! When every branch has a then value the expression switches the column
//! value instead ("switch order") and the else falls back to the column.

use crate::error::CBeanError;
use crate::query::condition_key::ConditionKey;
use crate::value::to_sql_literal;
use sea_query::Value;

/// How a connected condition joins the preceding one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    fn keyword(self) -> &'static str {
        match self {
            Connector::And => "and",
            Connector::Or => "or",
        }
    }
}

#[derive(Debug, Clone)]
struct ConnectedCondition {
    connector: Connector,
    condition_key: ConditionKey,
    values: Vec<Value>,
}

/// One `when` branch
#[derive(Debug, Clone)]
pub struct CaseWhen {
    condition_key: ConditionKey,
    values: Vec<Value>,
    connected: Vec<ConnectedCondition>,
    then_value: Option<Value>,
}

impl CaseWhen {
    pub fn new<V: Into<Value>>(
        condition_key: ConditionKey,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            condition_key,
            values: values.into_iter().map(Into::into).collect(),
            connected: Vec::new(),
            then_value: None,
        }
    }

    pub fn equal(value: impl Into<Value>) -> Self {
        Self::new(ConditionKey::Equal, [value.into()])
    }

    pub fn is_null() -> Self {
        Self::new(ConditionKey::IsNull, Vec::<Value>::new())
    }

    pub fn in_scope<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::new(ConditionKey::InScope, values)
    }

    pub fn and<V: Into<Value>>(
        self,
        condition_key: ConditionKey,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.connect(Connector::And, condition_key, values)
    }

    pub fn or<V: Into<Value>>(
        self,
        condition_key: ConditionKey,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.connect(Connector::Or, condition_key, values)
    }

    fn connect<V: Into<Value>>(
        mut self,
        connector: Connector,
        condition_key: ConditionKey,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.connected.push(ConnectedCondition {
            connector,
            condition_key,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Explicit then value of this branch.
    pub fn then(mut self, value: impl Into<Value>) -> Self {
        self.then_value = Some(value.into());
        self
    }

    pub fn has_then_value(&self) -> bool {
        self.then_value.is_some()
    }

    fn render_condition(&self, column_expr: &str) -> String {
        let mut sb = self.condition_key.render(column_expr, &self.values);
        for c in &self.connected {
            sb.push(' ');
            sb.push_str(c.connector.keyword());
            sb.push(' ');
            sb.push_str(&c.condition_key.render(column_expr, &c.values));
        }
        sb
    }

    fn validate(&self, index: usize) -> Result<(), CBeanError> {
        let mismatch = |key: ConditionKey, values: &[Value]| {
            CBeanError::IllegalState(format!(
                "The manual order condition has wrong values.\n\
                 [Case When Index]\n{index}\n\
                 [Condition Key]\n{key:?}\n\
                 [Values]\n{values:?}"
            ))
        };
        if !self.condition_key.accepts(&self.values) {
            return Err(mismatch(self.condition_key, &self.values));
        }
        for c in &self.connected {
            if !c.condition_key.accepts(&c.values) {
                return Err(mismatch(c.condition_key, &c.values));
            }
        }
        Ok(())
    }
}

/// Case-when list plus optional else value
#[derive(Debug, Clone, Default)]
pub struct ManualOrderOption {
    case_when_list: Vec<CaseWhen>,
    else_value: Option<Value>,
}

impl ManualOrderOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(mut self, case_when: CaseWhen) -> Self {
        self.case_when_list.push(case_when);
        self
    }

    pub fn else_value(mut self, value: impl Into<Value>) -> Self {
        self.else_value = Some(value.into());
        self
    }

    pub fn has_manual_order(&self) -> bool {
        !self.case_when_list.is_empty()
    }

    pub fn case_when_list(&self) -> &[CaseWhen] {
        &self.case_when_list
    }

    /// Is every branch mapped to its own then value?
    pub fn is_switch_order(&self) -> bool {
        self.has_manual_order() && self.case_when_list.iter().all(CaseWhen::has_then_value)
    }

    /// Check operand counts, and that then values are given for all branches or none.
    pub fn validate(&self) -> Result<(), CBeanError> {
        for (index, case_when) in self.case_when_list.iter().enumerate() {
            case_when.validate(index)?;
        }
        let with_then = self.case_when_list.iter().filter(|c| c.has_then_value()).count();
        if with_then > 0 && with_then < self.case_when_list.len() {
            return Err(CBeanError::IllegalState(format!(
                "The then values of manual order should be set for all branches or none.\n\
                 [Case When Count]\n{}\n\
                 [Then Count]\n{with_then}",
                self.case_when_list.len()
            )));
        }
        Ok(())
    }

    /// `case when ... then ... else ... end` over `column_expr`
    pub fn render_case_expression(&self, column_expr: &str) -> String {
        let switch = self.is_switch_order();
        let mut sb = String::from("case");
        for (index, case_when) in self.case_when_list.iter().enumerate() {
            let then = match &case_when.then_value {
                Some(v) if switch => to_sql_literal(v),
                _ => index.to_string(),
            };
            sb.push_str(" when ");
            sb.push_str(&case_when.render_condition(column_expr));
            sb.push_str(" then ");
            sb.push_str(&then);
        }
        let else_part = match &self.else_value {
            Some(v) => to_sql_literal(v),
            None if switch => column_expr.to_string(),
            None => self.case_when_list.len().to_string(),
        };
        sb.push_str(" else ");
        sb.push_str(&else_part);
        sb.push_str(" end");
        sb
    }
}
