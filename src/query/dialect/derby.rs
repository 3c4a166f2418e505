use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::{ClauseBase, SqlClause};

/// Derby: SQL:2008 row-limiting clause
#[derive(Debug, Clone)]
pub struct SqlClauseDerby {
    base: ClauseBase,
    fetch_scope_sql_suffix: String,
    lock_sql_suffix: String,
}

impl SqlClauseDerby {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_sql_suffix: String::new(),
            lock_sql_suffix: String::new(),
        }
    }
}

impl SqlClause for SqlClauseDerby {
    clause_base_accessors!(Dbms::Derby);

    fn do_fetch_first(&mut self) {
        self.fetch_scope_sql_suffix = format!(" fetch first {} rows only", self.base.fetch_size());
    }

    fn do_fetch_page(&mut self) {
        self.fetch_scope_sql_suffix = format!(
            " offset {} rows fetch next {} rows only",
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
}
