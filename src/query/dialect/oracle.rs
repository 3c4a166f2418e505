use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::dialect::bind_value;
use crate::query::{ClauseBase, SqlClause};
use sea_query::Value;

/// Oracle: row-limiting clause (`offset .. rows fetch next .. rows only`)
#[derive(Debug, Clone)]
pub struct SqlClauseOracle {
    base: ClauseBase,
    fetch_scope_sql_suffix: String,
    lock_sql_suffix: String,
    bound_values: Vec<Value>,
}

impl SqlClauseOracle {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_sql_suffix: String::new(),
            lock_sql_suffix: String::new(),
            bound_values: Vec::new(),
        }
    }
}

impl SqlClause for SqlClauseOracle {
    clause_base_accessors!(Dbms::Oracle);

    fn do_fetch_first(&mut self) {
        let size = self.base.fetch_size();
        if self.base.is_paging_binding() {
            self.fetch_scope_sql_suffix = " fetch first ? rows only".to_string();
            self.bound_values = vec![bind_value(size)];
        } else {
            self.fetch_scope_sql_suffix = format!(" fetch first {size} rows only");
            self.bound_values.clear();
        }
    }

    fn do_fetch_page(&mut self) {
        let start = self.base.page_start_index();
        let size = self.base.fetch_size();
        if self.base.is_paging_binding() {
            self.fetch_scope_sql_suffix = " offset ? rows fetch next ? rows only".to_string();
            self.bound_values = vec![bind_value(start), bind_value(size)];
        } else {
            self.fetch_scope_sql_suffix = format!(" offset {start} rows fetch next {size} rows only");
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
