use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::nulls::{CaseWhenNullsSetupper, OrderByNullsSetupper};
use crate::query::{ClauseBase, SqlClause};
use std::sync::Arc;

/// SQL Server: `top N` select hint and `with (updlock)` table hint
#[derive(Debug, Clone)]
pub struct SqlClauseSqlServer {
    base: ClauseBase,
    fetch_first_select_hint: String,
    lock_hint: String,
}

impl SqlClauseSqlServer {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_first_select_hint: String::new(),
            lock_hint: String::new(),
        }
    }
}

impl SqlClause for SqlClauseSqlServer {
    clause_base_accessors!(Dbms::SqlServer);

    fn do_fetch_first(&mut self) {
        self.fetch_first_select_hint = format!(" top {}", self.base.fetch_size());
    }

    fn do_fetch_page(&mut self) {
        self.fetch_first_select_hint = format!(" top {}", self.base.page_end_index());
    }

    fn do_clear_fetch_page_clause(&mut self) {
        self.fetch_first_select_hint.clear();
    }

    fn lock_for_update(&mut self) -> Result<(), CBeanError> {
        self.lock_hint = " with (updlock)".to_string();
        Ok(())
    }

    fn create_select_hint(&self) -> String {
        self.fetch_first_select_hint.clone()
    }

    fn create_from_base_table_hint(&self) -> String {
        self.lock_hint.clone()
    }

    fn create_from_hint(&self) -> String {
        String::new()
    }

    fn create_sql_suffix(&self) -> String {
        String::new()
    }

    fn is_fetch_start_index_supported(&self) -> bool {
        false
    }

    fn create_order_by_nulls_setupper(&self) -> Arc<dyn OrderByNullsSetupper> {
        Arc::new(CaseWhenNullsSetupper)
    }
}
