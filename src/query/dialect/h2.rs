use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::dialect::bind_value;
use crate::query::{ClauseBase, SqlClause};
use sea_query::Value;

/// H2: `limit size offset start`, bindable
#[derive(Debug, Clone)]
pub struct SqlClauseH2 {
    base: ClauseBase,
    fetch_scope_sql_suffix: String,
    lock_sql_suffix: String,
    bound_values: Vec<Value>,
}

impl SqlClauseH2 {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_sql_suffix: String::new(),
            lock_sql_suffix: String::new(),
            bound_values: Vec::new(),
        }
    }
}

impl SqlClause for SqlClauseH2 {
    clause_base_accessors!(Dbms::H2);

    fn do_fetch_first(&mut self) {
        let size = self.base.fetch_size();
        if self.base.is_paging_binding() {
            self.fetch_scope_sql_suffix = " limit ?".to_string();
            self.bound_values = vec![bind_value(size)];
        } else {
            self.fetch_scope_sql_suffix = format!(" limit {size}");
            self.bound_values.clear();
        }
    }

    fn do_fetch_page(&mut self) {
        let size = self.base.fetch_size();
        let start = self.base.page_start_index();
        if self.base.is_paging_binding() {
            self.fetch_scope_sql_suffix = " limit ? offset ?".to_string();
            self.bound_values = vec![bind_value(size), bind_value(start)];
        } else {
            self.fetch_scope_sql_suffix = format!(" limit {size} offset {start}");
            self.bound_values.clear();
        }
    }

    fn do_clear_fetch_page_clause(&mut self) {
        self.fetch_scope_sql_suffix.clear();
        self.bound_values.clear();
    }

    fn lock_for_update(&mut self) -> Result<(), CBeanError> {
        self.lock_sql_suffix = " for update".to_string();
        Ok(())
    }

    fn create_select_hint(&self) -> String {
        String::new()
    }

    fn create_from_base_table_hint(&self) -> String {
        String::new()
    }

    fn create_from_hint(&self) -> String {
        String::new()
    }

    fn create_sql_suffix(&self) -> String {
        format!("{}{}", self.fetch_scope_sql_suffix, self.lock_sql_suffix)
    }

    fn paging_binding_values(&self) -> Vec<Value> {
        self.bound_values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_values_follow_placeholder_order() {
        let mut clause = SqlClauseH2::new("MEMBER");
        clause.base_mut().enable_paging_binding();
        clause.fetch_first(25).unwrap();
        clause.fetch_page(2).unwrap();
        assert_eq!(clause.create_sql_suffix(), " limit ? offset ?");
        assert_eq!(
            clause.paging_binding_values(),
            vec![Value::BigInt(Some(25)), Value::BigInt(Some(25))]
        );
    }
}
