//! The paging invoker: one page plus the total record count, in as few round
//! trips as possible.
//!
//! Count-first reads `count()` and skips `paging()` when nothing exists.
//! Count-later reads `paging()` first and derives the total from a short
//! page, falling back to `count()` only when the page came back full.

use crate::error::CBeanError;
use crate::paging::{PagingBean, PagingResultBean};
use crate::tracing_helpers;

/// Caller-supplied database access for one paging query
///
/// Errors raised here pass through the invoker unchanged.
pub trait PagingHandler {
    type Row;

    /// Number of all records matching the query, ignoring the fetch scope.
    fn count(&mut self, paging_bean: &dyn PagingBean) -> Result<usize, CBeanError>;

    /// Rows of the page the paging bean currently points at.
    fn paging(&mut self, paging_bean: &dyn PagingBean) -> Result<Vec<Self::Row>, CBeanError>;
}

/// Drives a [`PagingHandler`] for a [`PagingBean`]
///
/// Stateless: the table name and the scope are read from the bean.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagingInvoker;

impl PagingInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Select the page and its totals.
    ///
    /// # Errors
    ///
    /// `IllegalState` when the bean is not paging; otherwise whatever the
    /// handler raises.
    pub fn invoke_paging<H: PagingHandler>(
        &self,
        paging_bean: &mut dyn PagingBean,
        handler: &mut H,
    ) -> Result<PagingResultBean<H::Row>, CBeanError> {
        if !paging_bean.is_paging() {
            return Err(CBeanError::IllegalState(format!(
                "The paging bean should be paging before invoking paging: \
                 table={} fetchSize={} pageNumber={}",
                paging_bean.table_db_name(),
                paging_bean.fetch_size(),
                paging_bean.fetch_page_number()
            )));
        }
        let table_db_name = paging_bean.table_db_name().to_string();
        let page_size = paging_bean.fetch_size();
        let _span =
            tracing_helpers::paging_span(&table_db_name, paging_bean.fetch_page_number(), page_size)
                .entered();

        let (selected_list, all_record_count) = if paging_bean.can_paging_count_later() {
            log::debug!("paging count later: table={table_db_name}");
            let selected_list = self.select_page(paging_bean, handler)?;
            let all_record_count = if self.is_current_last_page(&selected_list, paging_bean) {
                let derived =
                    self.derive_all_record_count_by_last_page(&selected_list, paging_bean);
                log::debug!("all record count derived from the last page: {derived}");
                derived
            } else {
                self.read_count(paging_bean, handler)?
            };
            (selected_list, all_record_count)
        } else {
            let all_record_count = self.read_count(paging_bean, handler)?;
            if all_record_count == 0 {
                log::debug!("no record exists, paging skipped: table={table_db_name}");
                return Ok(PagingResultBean::empty(page_size, paging_bean.fetch_page_number()));
            }
            (self.select_page(paging_bean, handler)?, all_record_count)
        };

        let result = PagingResultBean::new(
            selected_list,
            all_record_count,
            page_size,
            paging_bean.fetch_page_number(),
        );
        if self.is_necessary_to_read_page_again(&result) && paging_bean.can_paging_reselect() {
            return self.reselect(paging_bean, handler, result);
        }
        Ok(result)
    }

    /// Is the page short, so nothing can follow it?
    ///
    /// An empty page beyond the first one proves nothing: the requested page
    /// may simply be past the end.
    pub fn is_current_last_page<T>(
        &self,
        selected_list: &[T],
        paging_bean: &dyn PagingBean,
    ) -> bool {
        if selected_list.is_empty() && paging_bean.fetch_page_number() > 1 {
            return false;
        }
        selected_list.len() < paging_bean.fetch_size()
    }

    /// `page_size * (page - 1) + selected` for a last page.
    pub fn derive_all_record_count_by_last_page<T>(
        &self,
        selected_list: &[T],
        paging_bean: &dyn PagingBean,
    ) -> usize {
        let page_number = paging_bean.fetch_page_number().max(1);
        paging_bean.fetch_size() * (page_number - 1) + selected_list.len()
    }

    /// Records exist but the selected page is empty (past the end, or deleted meanwhile).
    pub fn is_necessary_to_read_page_again<T>(&self, result: &PagingResultBean<T>) -> bool {
        result.all_record_count() > 0 && result.is_empty()
    }

    fn reselect<H: PagingHandler>(
        &self,
        paging_bean: &mut dyn PagingBean,
        handler: &mut H,
        stale: PagingResultBean<H::Row>,
    ) -> Result<PagingResultBean<H::Row>, CBeanError> {
        let last_page_number = stale.all_page_count();
        log::debug!(
            "re-select the last page: table={} requested={} last={}",
            paging_bean.table_db_name(),
            stale.current_page_number(),
            last_page_number
        );
        paging_bean.fetch_page(last_page_number)?;
        let selected_list = self.select_page(paging_bean, handler)?;
        Ok(PagingResultBean::new(
            selected_list,
            stale.all_record_count(),
            stale.page_size(),
            paging_bean.fetch_page_number(),
        ))
    }

    fn read_count<H: PagingHandler>(
        &self,
        paging_bean: &dyn PagingBean,
        handler: &mut H,
    ) -> Result<usize, CBeanError> {
        let _span = tracing_helpers::count_span(paging_bean.table_db_name()).entered();
        handler.count(paging_bean)
    }

    fn select_page<H: PagingHandler>(
        &self,
        paging_bean: &dyn PagingBean,
        handler: &mut H,
    ) -> Result<Vec<H::Row>, CBeanError> {
        let page_number = paging_bean.fetch_page_number();
        let _span = tracing_helpers::select_span(paging_bean.table_db_name(), page_number).entered();
        handler.paging(paging_bean)
    }
}
