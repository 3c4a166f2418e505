use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::nulls::{CaseWhenNullsSetupper, OrderByNullsSetupper};
use crate::query::{ClauseBase, SqlClause};
use std::sync::Arc;

/// MySQL: `limit [start,] size`
#[derive(Debug, Clone)]
pub struct SqlClauseMySql {
    base: ClauseBase,
    fetch_scope_sql_suffix: String,
    lock_sql_suffix: String,
}

impl SqlClauseMySql {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_sql_suffix: String::new(),
            lock_sql_suffix: String::new(),
        }
    }
}

impl SqlClause for SqlClauseMySql {
    clause_base_accessors!(Dbms::MySql);

    fn do_fetch_first(&mut self) {
        self.fetch_scope_sql_suffix = format!(" limit {}", self.base.fetch_size());
    }

    fn do_fetch_page(&mut self) {
        self.fetch_scope_sql_suffix = format!(
            " limit {}, {}",
            self.base.page_start_index(),
            self.base.fetch_size()
        );
    }

    fn do_clear_fetch_page_clause(&mut self) {
        self.fetch_scope_sql_suffix.clear();
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

    fn create_order_by_nulls_setupper(&self) -> Arc<dyn OrderByNullsSetupper> {
        Arc::new(CaseWhenNullsSetupper)
    }
}
