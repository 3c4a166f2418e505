use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::{ClauseBase, SqlClause};

/// DB2: `fetch first N rows only` without skip; later pages are narrowed in memory
#[derive(Debug, Clone)]
pub struct SqlClauseDb2 {
    base: ClauseBase,
    fetch_scope_sql_suffix: String,
    lock_sql_suffix: String,
}

impl SqlClauseDb2 {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_sql_suffix: String::new(),
            lock_sql_suffix: String::new(),
        }
    }
}

impl SqlClause for SqlClauseDb2 {
    clause_base_accessors!(Dbms::Db2);

    fn do_fetch_first(&mut self) {
        self.fetch_scope_sql_suffix = format!(" fetch first {} rows only", self.base.fetch_size());
    }

    fn do_fetch_page(&mut self) {
        self.fetch_scope_sql_suffix =
            format!(" fetch first {} rows only", self.base.page_end_index());
    }

    fn do_clear_fetch_page_clause(&mut self) {
        self.fetch_scope_sql_suffix.clear();
    }

    fn lock_for_update(&mut self) -> Result<(), CBeanError> {
        self.lock_sql_suffix = " for update with RS".to_string();
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

    fn is_fetch_start_index_supported(&self) -> bool {
        false
    }
}
