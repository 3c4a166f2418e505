//! ORDER BY construction.

use crate::error::CBeanError;
use crate::query::cipher::GearedCipherManager;
use crate::query::manual_order::ManualOrderOption;
use crate::query::nulls::OrderByNullsSetupper;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            OrderDirection::Asc => OrderDirection::Desc,
            OrderDirection::Desc => OrderDirection::Asc,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for OrderDirection {
    type Err = CBeanError;

    /// Only `asc` and `desc` (any case) are directions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            _ => Err(CBeanError::IllegalState(format!(
                "The order direction should be asc or desc: {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct NullsOrdering {
    setupper: Arc<dyn OrderByNullsSetupper>,
    nulls_first: bool,
}

#[derive(Clone)]
struct CipherBinding {
    manager: Weak<dyn GearedCipherManager>,
    table_db_name: String,
}

impl fmt::Debug for CipherBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherBinding")
            .field("table_db_name", &self.table_db_name)
            .field("alive", &(self.manager.strong_count() > 0))
            .finish()
    }
}

/// One ORDER BY term
#[derive(Debug, Clone)]
pub struct OrderByElement {
    alias_name: Option<String>,
    column_name: String,
    direction: OrderDirection,
    manual_order: Option<ManualOrderOption>,
    nulls: Option<NullsOrdering>,
    cipher: Option<CipherBinding>,
}

impl OrderByElement {
    /// `alias_name` is `None` for derived (already qualified or computed) expressions.
    pub fn new(alias_name: Option<&str>, column_name: &str, direction: OrderDirection) -> Self {
        Self {
            alias_name: alias_name.map(str::to_string),
            column_name: column_name.to_string(),
            direction,
            manual_order: None,
            nulls: None,
            cipher: None,
        }
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias_name.as_deref()
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn direction(&self) -> OrderDirection {
        self.direction
    }

    pub fn is_asc(&self) -> bool {
        self.direction == OrderDirection::Asc
    }

    pub fn setup_asc(&mut self) {
        self.direction = OrderDirection::Asc;
    }

    pub fn setup_desc(&mut self) {
        self.direction = OrderDirection::Desc;
    }

    /// Set the direction from its SQL text; anything but asc/desc is illegal.
    pub fn setup_direction(&mut self, direction: &str) -> Result<(), CBeanError> {
        self.direction = direction.parse()?;
        Ok(())
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Attach a manual order; an option without branches is ignored at render time.
    pub fn with_manual_order(
        &mut self,
        option: ManualOrderOption,
    ) -> Result<&mut Self, CBeanError> {
        option.validate()?;
        self.manual_order = Some(option);
        Ok(self)
    }

    pub fn manual_order(&self) -> Option<&ManualOrderOption> {
        self.manual_order.as_ref()
    }

    pub fn with_nulls_first(&mut self, setupper: Arc<dyn OrderByNullsSetupper>) -> &mut Self {
        self.nulls = Some(NullsOrdering {
            setupper,
            nulls_first: true,
        });
        self
    }

    pub fn with_nulls_last(&mut self, setupper: Arc<dyn OrderByNullsSetupper>) -> &mut Self {
        self.nulls = Some(NullsOrdering {
            setupper,
            nulls_first: false,
        });
        self
    }

    /// Decrypt the column through `manager` while it is alive.
    pub fn with_cipher_manager(
        &mut self,
        manager: &Arc<dyn GearedCipherManager>,
        table_db_name: &str,
    ) -> &mut Self {
        self.cipher = Some(CipherBinding {
            manager: Arc::downgrade(manager),
            table_db_name: table_db_name.to_string(),
        });
        self
    }

    /// `alias.COLUMN`, or the bare column for derived order-by.
    pub fn column_full_name(&self) -> String {
        match &self.alias_name {
            Some(alias) => format!("{alias}.{}", self.column_name),
            None => self.column_name.clone(),
        }
    }

    fn decrypt(&self, column_expr: String) -> String {
        let Some(binding) = &self.cipher else {
            return column_expr;
        };
        let Some(manager) = binding.manager.upgrade() else {
            return column_expr;
        };
        match manager.find_cipher(&binding.table_db_name, &self.column_name) {
            Some(cipher) => cipher.decrypt(&column_expr),
            None => column_expr,
        }
    }

    /// The term as it appears in `order by`, reflecting the current direction.
    pub fn element_clause(&self) -> String {
        let column_expr = self.decrypt(self.column_full_name());
        self.build_clause(&column_expr)
    }

    /// The term for a union query: the column must be in the select list and
    /// is written through its select alias.
    pub fn element_clause_with_alias_map(
        &self,
        select_clause_alias_map: &HashMap<String, String>,
    ) -> Result<String, CBeanError> {
        let real_column_name = self.column_full_name();
        let Some(alias) = select_clause_alias_map.get(&real_column_name) else {
            let mut entries: Vec<_> = select_clause_alias_map.iter().collect();
            entries.sort();
            return Err(CBeanError::IllegalState(format!(
                "The order-by column for union query was not found in the select clause.\n\
                 [Advice]\n\
                 A union query orders by select aliases, so the order-by column must be selected.\n\
                 Add it by setupSelect of the relation (or select the column) on the union query.\n\
                 [Order By Column]\n{real_column_name}\n\
                 [Select Clause Alias Map]\n{entries:?}"
            )));
        };
        Ok(self.build_clause(alias))
    }

    fn build_clause(&self, column_expr: &str) -> String {
        let mut sb = match &self.manual_order {
            Some(option) if option.has_manual_order() => option.render_case_expression(column_expr),
            _ => column_expr.to_string(),
        };
        sb.push(' ');
        sb.push_str(self.direction.as_sql());
        match &self.nulls {
            Some(nulls) => nulls.setupper.setup(column_expr, &sb, nulls.nulls_first),
            None => sb,
        }
    }
}

/// The ordered list of ORDER BY terms
#[derive(Debug, Clone, Default)]
pub struct OrderByClause {
    list: Vec<OrderByElement>,
}

impl OrderByClause {
    pub fn add_order_by(&mut self, element: OrderByElement) -> &mut OrderByElement {
        self.list.push(element);
        let last = self.list.len() - 1;
        &mut self.list[last]
    }

    pub fn elements(&self) -> &[OrderByElement] {
        &self.list
    }

    pub fn last_mut(&mut self) -> Option<&mut OrderByElement> {
        self.list.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// `order by a asc, b desc`, or empty when there is nothing to order by.
    pub fn order_by_clause(&self) -> String {
        if self.list.is_empty() {
            return String::new();
        }
        let terms: Vec<String> = self.list.iter().map(OrderByElement::element_clause).collect();
        format!("order by {}", terms.join(", "))
    }

    pub fn order_by_clause_with_alias_map(
        &self,
        select_clause_alias_map: &HashMap<String, String>,
    ) -> Result<String, CBeanError> {
        if self.list.is_empty() {
            return Ok(String::new());
        }
        let terms = self
            .list
            .iter()
            .map(|e| e.element_clause_with_alias_map(select_clause_alias_map))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("order by {}", terms.join(", ")))
    }

    pub fn reverse_all(&mut self) {
        for element in &mut self.list {
            element.reverse();
        }
    }

    /// Move the first term to the end.
    pub fn exchange_first_for_last(&mut self) {
        if self.list.len() > 1 {
            self.list.rotate_left(1);
        }
    }

    pub fn is_same_as_first_element_column(&self, column_full_name: &str) -> bool {
        self.list
            .first()
            .map(|e| e.column_full_name() == column_full_name)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::cipher::testing::SingleColumnCipherManager;
    use crate::query::manual_order::CaseWhen;
    use crate::query::nulls::{CaseWhenNullsSetupper, NativeNullsSetupper};

    fn element(direction: OrderDirection) -> OrderByElement {
        OrderByElement::new(Some("dfloc"), "MEMBER_NAME", direction)
    }

    #[test]
    fn test_element_clause_follows_direction() {
        let mut e = element(OrderDirection::Asc);
        assert_eq!(e.element_clause(), "dfloc.MEMBER_NAME asc");
        e.setup_desc();
        assert_eq!(e.element_clause(), "dfloc.MEMBER_NAME desc");
        e.setup_asc();
        assert!(e.is_asc());
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        for direction in [OrderDirection::Asc, OrderDirection::Desc] {
            let mut e = element(direction);
            e.reverse();
            assert_eq!(e.direction(), direction.reversed());
            e.reverse();
            assert_eq!(e.direction(), direction);
        }
    }

    #[test]
    fn test_setup_direction_rejects_unknown_text() {
        let mut e = element(OrderDirection::Asc);
        assert!(e.setup_direction("DESC").is_ok());
        assert_eq!(e.direction(), OrderDirection::Desc);
        let err = e.setup_direction("sideways").unwrap_err();
        assert!(err.is_illegal_state());
        assert_eq!(e.direction(), OrderDirection::Desc);
    }

    #[test]
    fn test_derived_order_by_has_no_alias() {
        let e = OrderByElement::new(None, "MAX_PURCHASE_PRICE", OrderDirection::Desc);
        assert_eq!(e.element_clause(), "MAX_PURCHASE_PRICE desc");
    }

    #[test]
    fn test_manual_order_overrides_plain_column() {
        let mut e = OrderByElement::new(Some("dfloc"), "MEMBER_STATUS_CODE", OrderDirection::Asc);
        e.with_manual_order(
            ManualOrderOption::new()
                .when(CaseWhen::equal("FML"))
                .when(CaseWhen::equal("WDL")),
        )
        .unwrap();
        assert_eq!(
            e.element_clause(),
            "case when dfloc.MEMBER_STATUS_CODE = 'FML' then 0 \
             when dfloc.MEMBER_STATUS_CODE = 'WDL' then 1 else 2 end asc"
        );
    }

    #[test]
    fn test_empty_manual_order_is_plain() {
        let mut e = element(OrderDirection::Desc);
        e.with_manual_order(ManualOrderOption::new()).unwrap();
        assert_eq!(e.element_clause(), "dfloc.MEMBER_NAME desc");
    }

    #[test]
    fn test_nulls_ordering_wraps_clause() {
        let mut e = element(OrderDirection::Desc);
        e.with_nulls_last(Arc::new(CaseWhenNullsSetupper));
        assert_eq!(
            e.element_clause(),
            "case when dfloc.MEMBER_NAME is null then 1 else 0 end asc, dfloc.MEMBER_NAME desc"
        );
        e.with_nulls_first(Arc::new(NativeNullsSetupper));
        assert_eq!(e.element_clause(), "dfloc.MEMBER_NAME desc nulls first");
    }

    #[test]
    fn test_cipher_is_weakly_held() {
        let manager: Arc<dyn GearedCipherManager> = Arc::new(SingleColumnCipherManager {
            table_db_name: "MEMBER",
            column_db_name: "MEMBER_NAME",
        });
        let mut e = element(OrderDirection::Asc);
        e.with_cipher_manager(&manager, "MEMBER");
        assert_eq!(e.element_clause(), "decrypt_aes(dfloc.MEMBER_NAME) asc");

        drop(manager);
        assert_eq!(e.element_clause(), "dfloc.MEMBER_NAME asc");
    }

    #[test]
    fn test_alias_map_lookup() {
        let mut alias_map = HashMap::new();
        alias_map.insert("dfloc.MEMBER_NAME".to_string(), "MEMBER_NAME".to_string());
        let e = element(OrderDirection::Desc);
        assert_eq!(e.element_clause_with_alias_map(&alias_map).unwrap(), "MEMBER_NAME desc");

        let missing = OrderByElement::new(Some("dfloc"), "BIRTHDATE", OrderDirection::Asc);
        let message = missing.element_clause_with_alias_map(&alias_map).unwrap_err().to_string();
        assert!(message.contains("dfloc.BIRTHDATE"));
        assert!(message.contains("setupSelect"));
        assert!(message.contains("MEMBER_NAME"));
    }

    #[test]
    fn test_clause_list_operations() {
        let mut clause = OrderByClause::default();
        assert_eq!(clause.order_by_clause(), "");
        clause.add_order_by(OrderByElement::new(Some("dfloc"), "A", OrderDirection::Asc));
        clause.add_order_by(OrderByElement::new(Some("dfloc"), "B", OrderDirection::Desc));
        clause.add_order_by(OrderByElement::new(Some("dfrel_0"), "C", OrderDirection::Asc));
        assert_eq!(
            clause.order_by_clause(),
            "order by dfloc.A asc, dfloc.B desc, dfrel_0.C asc"
        );

        clause.reverse_all();
        assert_eq!(
            clause.order_by_clause(),
            "order by dfloc.A desc, dfloc.B asc, dfrel_0.C desc"
        );

        assert!(clause.is_same_as_first_element_column("dfloc.A"));
        clause.exchange_first_for_last();
        assert!(clause.is_same_as_first_element_column("dfloc.B"));
        assert_eq!(clause.elements()[2].column_name(), "A");

        clause.clear();
        assert!(clause.is_empty());
    }
}
