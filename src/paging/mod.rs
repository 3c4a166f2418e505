//! Paging: the paging bean contract, the invoker and the page-number windows.
//!
//! # Architecture
//!
//! - **Bean**: [`PagingBean`] (what page is wanted) and [`SimplePagingBean`] over a dialect clause
//! - **Invoker**: [`PagingInvoker`] decides between count-first and count-later
//! - **Result**: [`PagingResultBean`] carries the selected page and the totals
//! - **Group / Range**: page-number lists for pagination widgets

use crate::error::CBeanError;
use crate::query::SqlClause;

pub mod invoker;
#[doc(inline)]
pub use invoker::{PagingHandler, PagingInvoker};

pub mod result;
#[doc(inline)]
pub use result::{PagingResultBean, PagingSummary};

pub mod group;
#[doc(inline)]
pub use group::{PageGroupBean, PageGroupOption};

pub mod range;
#[doc(inline)]
pub use range::{PageRangeBean, PageRangeOption};

pub mod link;
#[doc(inline)]
pub use link::PageNumberLink;

/// What the paging invoker needs to know about the requested page
pub trait PagingBean {
    /// Name of the queried table, for diagnostics.
    fn table_db_name(&self) -> &str;
    fn fetch_size(&self) -> usize;
    fn fetch_page_number(&self) -> usize;
    fn page_start_index(&self) -> usize;
    fn page_end_index(&self) -> usize;

    /// Has a page been requested (rather than a plain fetch-first)?
    fn is_paging(&self) -> bool;

    /// May the count query be skipped when the page itself proves the total?
    fn can_paging_count_later(&self) -> bool;

    /// May the last page be selected again when the requested one is past the end?
    fn can_paging_reselect(&self) -> bool;

    /// Move to another page, keeping the page size.
    fn fetch_page(&mut self, fetch_page_number: usize) -> Result<(), CBeanError>;
}

/// Paging bean backed by a dialect clause
///
/// The clause renders the fetch scope; this bean adds the paging switches.
#[derive(Debug)]
pub struct SimplePagingBean {
    clause: Box<dyn SqlClause>,
    paging: bool,
    count_later: bool,
    reselect: bool,
}

impl SimplePagingBean {
    pub fn new(clause: Box<dyn SqlClause>) -> Self {
        Self {
            clause,
            paging: false,
            count_later: false,
            reselect: true,
        }
    }

    /// Request page `page_number` of `page_size` rows.
    pub fn paging(&mut self, page_size: usize, page_number: usize) -> Result<(), CBeanError> {
        if page_size == 0 {
            return Err(CBeanError::IllegalState(format!(
                "The page size should be plus: table={} page={}",
                self.clause.base().table_db_name(),
                page_number
            )));
        }
        self.clause.fetch_first(page_size)?;
        self.clause.fetch_page(page_number)?;
        self.paging = true;
        Ok(())
    }

    /// Only the first `fetch_size` rows, no paging totals.
    pub fn fetch_first(&mut self, fetch_size: usize) -> Result<(), CBeanError> {
        self.clause.fetch_first(fetch_size)?;
        self.paging = false;
        Ok(())
    }

    pub fn enable_paging_count_later(&mut self) {
        self.count_later = true;
    }

    pub fn disable_paging_count_later(&mut self) {
        self.count_later = false;
    }

    pub fn enable_paging_reselect(&mut self) {
        self.reselect = true;
    }

    pub fn disable_paging_reselect(&mut self) {
        self.reselect = false;
    }

    pub fn clause(&self) -> &dyn SqlClause {
        self.clause.as_ref()
    }

    pub fn clause_mut(&mut self) -> &mut dyn SqlClause {
        self.clause.as_mut()
    }

    pub fn into_clause(self) -> Box<dyn SqlClause> {
        self.clause
    }
}

impl PagingBean for SimplePagingBean {
    fn table_db_name(&self) -> &str {
        self.clause.base().table_db_name()
    }

    fn fetch_size(&self) -> usize {
        self.clause.base().fetch_size()
    }

    fn fetch_page_number(&self) -> usize {
        self.clause.base().fetch_page_number()
    }

    fn page_start_index(&self) -> usize {
        self.clause.base().page_start_index()
    }

    fn page_end_index(&self) -> usize {
        self.clause.base().page_end_index()
    }

    fn is_paging(&self) -> bool {
        self.paging
    }

    fn can_paging_count_later(&self) -> bool {
        self.count_later
    }

    fn can_paging_reselect(&self) -> bool {
        self.reselect
    }

    fn fetch_page(&mut self, fetch_page_number: usize) -> Result<(), CBeanError> {
        self.clause.fetch_page(fetch_page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbms::Dbms;

    #[test]
    fn test_paging_sets_scope() {
        let mut bean = SimplePagingBean::new(Dbms::MySql.create_sql_clause("MEMBER"));
        assert!(!bean.is_paging());
        bean.paging(20, 3).unwrap();
        assert!(bean.is_paging());
        assert_eq!(bean.fetch_size(), 20);
        assert_eq!(bean.fetch_page_number(), 3);
        assert_eq!(bean.page_start_index(), 40);
        assert_eq!(bean.page_end_index(), 60);
        assert_eq!(
            bean.clause().clause().unwrap(),
            "select dfloc.* from MEMBER dfloc limit 40, 20"
        );
    }

    #[test]
    fn test_fetch_first_is_not_paging() {
        let mut bean = SimplePagingBean::new(Dbms::H2.create_sql_clause("MEMBER"));
        bean.paging(10, 2).unwrap();
        bean.fetch_first(5).unwrap();
        assert!(!bean.is_paging());
        assert_eq!(bean.fetch_page_number(), 1);
    }

    #[test]
    fn test_invalid_page_size() {
        let mut bean = SimplePagingBean::new(Dbms::H2.create_sql_clause("MEMBER"));
        let err = bean.paging(0, 1).unwrap_err();
        assert!(err.is_illegal_state());
        assert!(err.to_string().contains("MEMBER"));
    }

    #[test]
    fn test_switches() {
        let mut bean = SimplePagingBean::new(Dbms::H2.create_sql_clause("MEMBER"));
        assert!(!bean.can_paging_count_later());
        assert!(bean.can_paging_reselect());
        bean.enable_paging_count_later();
        bean.disable_paging_reselect();
        assert!(bean.can_paging_count_later());
        assert!(!bean.can_paging_reselect());
    }
}
