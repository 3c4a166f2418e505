//! The SQL clause contract shared by every dialect.
//!
//! A clause owns the query shape of one table query (select columns, outer
//! joins, where conditions, unions, order-by) in a [`ClauseBase`], plus the
//! dialect-specific hint and suffix state in the implementing struct. The
//! dialect only ever touches its own hint/suffix fields; everything it needs
//! about the fetch scope is read from the base.

use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::query::nulls::{NativeNullsSetupper, OrderByNullsSetupper};
use crate::query::order_by::{OrderByClause, OrderByElement, OrderDirection};
use crate::relation::SelectIndexMap;
use sea_query::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Alias of the base table in every generated statement.
pub const BASE_ALIAS: &str = "dfloc";
/// Alias prefix of outer-joined relation tables (`dfrel_0`, `dfrel_0_1`...).
pub const RELATION_ALIAS_PREFIX: &str = "dfrel";
/// Alias of the derived table wrapping a union for counting.
pub const UNION_COUNT_ALIAS: &str = "dfmain";

/// Table alias for a relation path (empty path is the base table).
pub fn table_alias_of(relation_path: &str) -> String {
    if relation_path.is_empty() {
        BASE_ALIAS.to_string()
    } else {
        format!("{RELATION_ALIAS_PREFIX}{relation_path}")
    }
}

/// One column of the select list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectColumn {
    pub relation_path: String,
    pub table_alias: String,
    pub column_db_name: String,
    pub column_alias: String,
}

impl SelectColumn {
    /// `alias.COLUMN`
    pub fn real_name(&self) -> String {
        format!("{}.{}", self.table_alias, self.column_db_name)
    }
}

/// `left outer join FOREIGN dfrel_0 on dfloc.FK = dfrel_0.PK`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftOuterJoin {
    pub foreign_table_db_name: String,
    pub local_alias: String,
    pub foreign_alias: String,
    pub join_on: Vec<(String, String)>,
}

impl LeftOuterJoin {
    fn render(&self) -> String {
        let on = self
            .join_on
            .iter()
            .map(|(local, foreign)| {
                format!("{}.{} = {}.{}", self.local_alias, local, self.foreign_alias, foreign)
            })
            .collect::<Vec<_>>()
            .join(" and ");
        format!(
            " left outer join {} {} on {}",
            self.foreign_table_db_name, self.foreign_alias, on
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UnionQuery {
    clause: String,
    all: bool,
}

/// Dialect-independent state of a table query
#[derive(Debug, Clone)]
pub struct ClauseBase {
    table_db_name: String,
    select_columns: Vec<SelectColumn>,
    outer_joins: Vec<LeftOuterJoin>,
    where_list: Vec<String>,
    unions: Vec<UnionQuery>,
    order_by: OrderByClause,

    fetch_start_index: usize,
    fetch_size: usize,
    fetch_page_number: usize,
    fetch_scope_effective: bool,
    paging_binding: bool,
}

impl ClauseBase {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            table_db_name: table_db_name.to_string(),
            select_columns: Vec::new(),
            outer_joins: Vec::new(),
            where_list: Vec::new(),
            unions: Vec::new(),
            order_by: OrderByClause::default(),
            fetch_start_index: 0,
            fetch_size: 0,
            fetch_page_number: 1,
            fetch_scope_effective: false,
            paging_binding: false,
        }
    }

    pub fn table_db_name(&self) -> &str {
        &self.table_db_name
    }

    // ===================================================================
    //                                                      Query Shape
    //                                                      ===========
    /// Add a column to the select list. The column alias carries the relation
    /// path as suffix so that relation columns never collide with base ones.
    pub fn register_select_column(&mut self, relation_path: &str, column_db_name: &str) {
        self.select_columns.push(SelectColumn {
            relation_path: relation_path.to_string(),
            table_alias: table_alias_of(relation_path),
            column_db_name: column_db_name.to_string(),
            column_alias: format!("{column_db_name}{relation_path}"),
        });
    }

    pub fn register_outer_join(
        &mut self,
        parent_path: &str,
        relation_path: &str,
        foreign_table_db_name: &str,
        join_on: &[(&str, &str)],
    ) {
        self.outer_joins.push(LeftOuterJoin {
            foreign_table_db_name: foreign_table_db_name.to_string(),
            local_alias: table_alias_of(parent_path),
            foreign_alias: table_alias_of(relation_path),
            join_on: join_on
                .iter()
                .map(|(local, foreign)| (local.to_string(), foreign.to_string()))
                .collect(),
        });
    }

    pub fn register_where(&mut self, condition: impl Into<String>) {
        self.where_list.push(condition.into());
    }

    /// Append another select statement (already rendered) as `union [all]`.
    pub fn register_union(&mut self, clause: impl Into<String>, all: bool) {
        self.unions.push(UnionQuery {
            clause: clause.into(),
            all,
        });
    }

    pub fn has_union(&self) -> bool {
        !self.unions.is_empty()
    }

    /// Order by a column of the base table (empty path) or of a relation.
    pub fn register_order_by(
        &mut self,
        relation_path: &str,
        column_db_name: &str,
        direction: OrderDirection,
    ) -> &mut OrderByElement {
        let alias = table_alias_of(relation_path);
        let element = OrderByElement::new(Some(alias.as_str()), column_db_name, direction);
        self.order_by.add_order_by(element)
    }

    pub fn order_by(&self) -> &OrderByClause {
        &self.order_by
    }

    pub fn order_by_mut(&mut self) -> &mut OrderByClause {
        &mut self.order_by
    }

    pub fn select_columns(&self) -> &[SelectColumn] {
        &self.select_columns
    }

    /// `alias.COLUMN` -> select alias, consumed by union order-by.
    pub fn select_clause_alias_map(&self) -> HashMap<String, String> {
        self.select_columns
            .iter()
            .map(|c| (c.real_name(), c.column_alias.clone()))
            .collect()
    }

    /// Relation path -> column -> result-set index, in select-list order.
    pub fn select_index_map(&self) -> SelectIndexMap {
        let mut map = SelectIndexMap::new();
        for (index, column) in self.select_columns.iter().enumerate() {
            map.register(&column.relation_path, &column.column_db_name, index);
        }
        map
    }

    // ===================================================================
    //                                                      Fetch Scope
    //                                                      ===========
    pub fn fetch_size(&self) -> usize {
        self.fetch_size
    }

    pub fn fetch_start_index(&self) -> usize {
        self.fetch_start_index
    }

    pub fn fetch_page_number(&self) -> usize {
        self.fetch_page_number
    }

    /// First row index (zero-based) of the current page.
    pub fn page_start_index(&self) -> usize {
        self.fetch_start_index + self.fetch_size * (self.fetch_page_number - 1)
    }

    /// Row index just past the current page.
    pub fn page_end_index(&self) -> usize {
        self.fetch_start_index + self.fetch_size * self.fetch_page_number
    }

    pub fn is_fetch_scope_effective(&self) -> bool {
        self.fetch_scope_effective
    }

    pub fn enable_paging_binding(&mut self) {
        self.paging_binding = true;
    }

    pub fn disable_paging_binding(&mut self) {
        self.paging_binding = false;
    }

    pub fn is_paging_binding(&self) -> bool {
        self.paging_binding
    }

    // ===================================================================
    //                                                        Rendering
    //                                                        =========
    fn select_list(&self) -> String {
        if self.select_columns.is_empty() {
            return format!("{BASE_ALIAS}.*");
        }
        self.select_columns
            .iter()
            .map(|c| format!("{} as {}", c.real_name(), c.column_alias))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn outer_join_clause(&self) -> String {
        self.outer_joins.iter().map(LeftOuterJoin::render).collect()
    }

    fn where_clause(&self) -> String {
        if self.where_list.is_empty() {
            String::new()
        } else {
            format!(" where {}", self.where_list.join(" and "))
        }
    }

    fn union_clause(&self) -> String {
        self.unions
            .iter()
            .map(|u| {
                let keyword = if u.all { "union all" } else { "union" };
                format!(" {keyword} {}", u.clause)
            })
            .collect()
    }
}

/// Dialect strategy over a [`ClauseBase`]
///
/// Dialects implement the `do_*` hooks and the four hint/suffix producers;
/// the provided methods drive them. `do_fetch_first`/`do_fetch_page` are only
/// called after the base fetch scope has been updated and validated.
pub trait SqlClause: fmt::Debug {
    fn base(&self) -> &ClauseBase;
    fn base_mut(&mut self) -> &mut ClauseBase;
    fn dbms(&self) -> Dbms;

    // ===================================================================
    //                                                   Dialect Hooks
    //                                                   =============
    fn do_fetch_first(&mut self);
    fn do_fetch_page(&mut self);
    fn do_clear_fetch_page_clause(&mut self);

    /// Lock the selected rows, or fail when the engine has no row lock.
    fn lock_for_update(&mut self) -> Result<(), CBeanError>;

    /// Written right after `select`.
    fn create_select_hint(&self) -> String;
    /// Written right after the base table alias.
    fn create_from_base_table_hint(&self) -> String;
    /// Written after the outer joins.
    fn create_from_hint(&self) -> String;
    /// Written at the very end of the statement.
    fn create_sql_suffix(&self) -> String;

    fn is_fetch_start_index_supported(&self) -> bool {
        true
    }

    fn is_fetch_size_supported(&self) -> bool {
        true
    }

    /// Values of the paging placeholders, in SQL order; empty when inlined.
    fn paging_binding_values(&self) -> Vec<Value> {
        Vec::new()
    }

    /// Null-ordering idiom of this database.
    fn create_order_by_nulls_setupper(&self) -> Arc<dyn OrderByNullsSetupper> {
        Arc::new(NativeNullsSetupper)
    }

    /// Sort nulls before values on the latest order-by column.
    fn add_nulls_first_to_previous_order_by(&mut self) -> Result<(), CBeanError> {
        let setupper = self.create_order_by_nulls_setupper();
        attach_nulls_ordering(self.base_mut(), setupper, true)
    }

    /// Sort nulls after values on the latest order-by column.
    fn add_nulls_last_to_previous_order_by(&mut self) -> Result<(), CBeanError> {
        let setupper = self.create_order_by_nulls_setupper();
        attach_nulls_ordering(self.base_mut(), setupper, false)
    }

    // ===================================================================
    //                                                      Fetch Scope
    //                                                      ===========
    /// Fetch only the first `fetch_size` rows.
    fn fetch_first(&mut self, fetch_size: usize) -> Result<(), CBeanError> {
        if fetch_size == 0 {
            return Err(CBeanError::IllegalState(format!(
                "The fetch size should be plus: table={}",
                self.base().table_db_name()
            )));
        }
        let base = self.base_mut();
        base.fetch_scope_effective = true;
        base.fetch_size = fetch_size;
        base.fetch_page_number = 1;
        self.do_fetch_first();
        Ok(())
    }

    /// Fetch `fetch_size` rows from `fetch_start_index`.
    fn fetch_scope(
        &mut self,
        fetch_start_index: usize,
        fetch_size: usize,
    ) -> Result<(), CBeanError> {
        if fetch_size == 0 {
            return Err(CBeanError::IllegalState(format!(
                "The fetch size should be plus: table={} start={}",
                self.base().table_db_name(),
                fetch_start_index
            )));
        }
        let base = self.base_mut();
        base.fetch_start_index = fetch_start_index;
        base.fetch_size = fetch_size;
        self.fetch_page(1)
    }

    /// Move to `fetch_page_number` (values below 1 mean the first page).
    fn fetch_page(&mut self, fetch_page_number: usize) -> Result<(), CBeanError> {
        if self.base().fetch_size == 0 {
            return Err(CBeanError::IllegalState(format!(
                "Fetch page requires a fetch size: table={} page={}",
                self.base().table_db_name(),
                fetch_page_number
            )));
        }
        let page_number = fetch_page_number.max(1);
        let base = self.base_mut();
        base.fetch_page_number = page_number;
        base.fetch_scope_effective = true;
        if page_number == 1 && base.fetch_start_index == 0 {
            self.do_fetch_first();
        } else {
            self.do_fetch_page();
        }
        Ok(())
    }

    /// Keep the scope settings but stop rendering them.
    fn suppress_fetch_scope(&mut self) {
        self.base_mut().fetch_scope_effective = false;
        self.do_clear_fetch_page_clause();
    }

    /// Render the kept scope settings again.
    fn reflect_fetch_scope(&mut self) {
        if self.base().fetch_size == 0 {
            return;
        }
        self.base_mut().fetch_scope_effective = true;
        if self.base().fetch_page_number == 1 && self.base().fetch_start_index == 0 {
            self.do_fetch_first();
        } else {
            self.do_fetch_page();
        }
    }

    /// Is any part of the scope left to the caller (post-filtering fetched rows)?
    fn is_fetch_narrowing_effective(&self) -> bool {
        self.base().is_fetch_scope_effective()
            && (!self.is_fetch_start_index_supported() || !self.is_fetch_size_supported())
    }

    /// Rows to skip in memory before the page starts.
    fn fetch_narrowing_skip_start_index(&self) -> usize {
        if self.is_fetch_start_index_supported() {
            0
        } else {
            self.base().page_start_index()
        }
    }

    /// Rows to keep in memory after skipping.
    fn fetch_narrowing_loop_count(&self) -> usize {
        self.base().fetch_size()
    }

    // ===================================================================
    //                                                     Whole Clause
    //                                                     ============
    /// Complete select statement for the current state.
    fn clause(&self) -> Result<String, CBeanError> {
        let base = self.base();
        let mut sb = String::new();
        sb.push_str("select");
        sb.push_str(&self.create_select_hint());
        sb.push(' ');
        sb.push_str(&base.select_list());
        sb.push_str(" from ");
        sb.push_str(base.table_db_name());
        sb.push(' ');
        sb.push_str(BASE_ALIAS);
        sb.push_str(&self.create_from_base_table_hint());
        sb.push_str(&base.outer_join_clause());
        sb.push_str(&self.create_from_hint());
        sb.push_str(&base.where_clause());
        if base.has_union() {
            sb.push_str(&base.union_clause());
            if !base.order_by().is_empty() {
                let alias_map = base.select_clause_alias_map();
                sb.push(' ');
                sb.push_str(&base.order_by().order_by_clause_with_alias_map(&alias_map)?);
            }
        } else if !base.order_by().is_empty() {
            sb.push(' ');
            sb.push_str(&base.order_by().order_by_clause());
        }
        sb.push_str(&self.create_sql_suffix());
        Ok(sb)
    }

    /// `select count(*)` over the same rows: no order-by, no fetch scope, no lock.
    fn count_clause(&self) -> String {
        let base = self.base();
        if base.has_union() {
            let mut inner = String::new();
            inner.push_str("select ");
            inner.push_str(&base.select_list());
            inner.push_str(" from ");
            inner.push_str(base.table_db_name());
            inner.push(' ');
            inner.push_str(BASE_ALIAS);
            inner.push_str(&base.outer_join_clause());
            inner.push_str(&base.where_clause());
            inner.push_str(&base.union_clause());
            return format!("select count(*) from ({inner}) {UNION_COUNT_ALIAS}");
        }
        format!(
            "select count(*) from {} {}{}{}",
            base.table_db_name(),
            BASE_ALIAS,
            base.outer_join_clause(),
            base.where_clause()
        )
    }
}

impl dyn SqlClause {
    /// Apply the in-memory part of the fetch scope to rows the database returned.
    pub fn narrow_fetched_rows<T>(&self, rows: Vec<T>) -> Vec<T> {
        if !self.is_fetch_narrowing_effective() {
            return rows;
        }
        let skip = self.fetch_narrowing_skip_start_index();
        let take = self.fetch_narrowing_loop_count();
        rows.into_iter().skip(skip).take(take).collect()
    }
}

fn attach_nulls_ordering(
    base: &mut ClauseBase,
    setupper: Arc<dyn OrderByNullsSetupper>,
    nulls_first: bool,
) -> Result<(), CBeanError> {
    let table_db_name = base.table_db_name().to_string();
    let Some(element) = base.order_by_mut().last_mut() else {
        return Err(CBeanError::IllegalState(format!(
            "Not found the order-by column to set up nulls ordering: table={table_db_name}"
        )));
    };
    if nulls_first {
        element.with_nulls_first(setupper);
    } else {
        element.with_nulls_last(setupper);
    }
    Ok(())
}
