use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::dialect::lock_unsupported;
use crate::query::{ClauseBase, SqlClause};

/// MS Access: `top N` only, file-based so no row lock
#[derive(Debug, Clone)]
pub struct SqlClauseMsAccess {
    base: ClauseBase,
    fetch_first_select_hint: String,
}

impl SqlClauseMsAccess {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_first_select_hint: String::new(),
        }
    }
}

impl SqlClause for SqlClauseMsAccess {
    clause_base_accessors!(Dbms::MsAccess);

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
        Err(lock_unsupported(&*self))
    }

    fn create_select_hint(&self) -> String {
        self.fetch_first_select_hint.clone()
    }

    fn create_from_base_table_hint(&self) -> String {
        String::new()
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
}
