use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::dialect::bind_value;
use crate::query::{ClauseBase, SqlClause};
use sea_query::Value;

/// PostgreSQL: `offset start limit size`, bindable for plan caching
#[derive(Debug, Clone)]
pub struct SqlClausePostgreSql {
    base: ClauseBase,
    fetch_scope_sql_suffix: String,
    lock_sql_suffix: String,
    fetch_scope_bound: bool,
}

impl SqlClausePostgreSql {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            base: ClauseBase::new(table_db_name),
            fetch_scope_sql_suffix: String::new(),
            lock_sql_suffix: String::new(),
            fetch_scope_bound: false,
        }
    }
}

impl SqlClause for SqlClausePostgreSql {
    clause_base_accessors!(Dbms::PostgreSql);

    fn do_fetch_first(&mut self) {
        self.do_fetch_page();
    }

    fn do_fetch_page(&mut self) {
        self.fetch_scope_bound = self.base.is_paging_binding();
        self.fetch_scope_sql_suffix = if self.fetch_scope_bound {
            " offset ? limit ?".to_string()
        } else {
            format!(
                " offset {} limit {}",
                self.base.page_start_index(),
                self.base.fetch_size()
            )
        };
    }

    fn do_clear_fetch_page_clause(&mut self) {
        self.fetch_scope_sql_suffix.clear();
        self.fetch_scope_bound = false;
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
        if !self.fetch_scope_bound {
            return Vec::new();
        }
        vec![
            bind_value(self.base.page_start_index()),
            bind_value(self.base.fetch_size()),
        ]
    }
}
