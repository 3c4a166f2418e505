use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::{ClauseBase, SqlClause};

/// Firebird: `first N skip S` select hint
#[derive(Debug, Clone)]
pub struct SqlClauseFirebird {
    base: ClauseBase,
    fetch_scope_select_hint: String,
    lock_sql_suffix: String,
}

impl SqlClauseFirebird {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_select_hint: String::new(),
            lock_sql_suffix: String::new(),
        }
    }
}

impl SqlClause for SqlClauseFirebird {
    clause_base_accessors!(Dbms::Firebird);

    fn do_fetch_first(&mut self) {
        self.fetch_scope_select_hint = format!(" first {}", self.base.fetch_size());
    }

    fn do_fetch_page(&mut self) {
        self.fetch_scope_select_hint = format!(
            " first {} skip {}",
            self.base.fetch_size(),
            self.base.page_start_index()
        );
    }

    fn do_clear_fetch_page_clause(&mut self) {
        self.fetch_scope_select_hint.clear();
    }

    fn lock_for_update(&mut self) -> Result<(), CBeanError> {
        self.lock_sql_suffix = " for update with lock".to_string();
        Ok(())
    }

    fn create_select_hint(&self) -> String {
        self.fetch_scope_select_hint.clone()
    }

    fn create_from_base_table_hint(&self) -> String {
        String::new()
    }

    fn create_from_hint(&self) -> String {
        String::new()
    }

    fn create_sql_suffix(&self) -> String {
        self.lock_sql_suffix.clone()
    }
}
