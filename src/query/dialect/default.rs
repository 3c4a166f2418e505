use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::{ClauseBase, SqlClause};

/// Unknown database: no fetch syntax at all, the whole scope is narrowed in memory
#[derive(Debug, Clone)]
pub struct SqlClauseDefault {
    base: ClauseBase,
    lock_sql_suffix: String,
}

impl SqlClauseDefault {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            lock_sql_suffix: String::new(),
        }
    }
}

impl SqlClause for SqlClauseDefault {
    clause_base_accessors!(Dbms::Unknown);

    fn do_fetch_first(&mut self) {}

    fn do_fetch_page(&mut self) {}

    fn do_clear_fetch_page_clause(&mut self) {}

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
        self.lock_sql_suffix.clone()
    }

    fn is_fetch_start_index_supported(&self) -> bool {
        false
    }

    fn is_fetch_size_supported(&self) -> bool {
        false
    }
}
