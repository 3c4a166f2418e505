use crate::error::CBeanError;
use crate::paging::{PageGroupBean, PageGroupOption, PageRangeBean, PageRangeOption};
use serde::Serialize;

/// One selected page with the totals of the whole query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagingResultBean<T> {
    selected_list: Vec<T>,
    all_record_count: usize,
    page_size: usize,
    current_page_number: usize,
}

/// Template-facing numbers of a [`PagingResultBean`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagingSummary {
    pub all_record_count: usize,
    pub all_page_count: usize,
    pub page_size: usize,
    pub current_page_number: usize,
    pub current_start_record_number: usize,
    pub current_end_record_number: usize,
    pub exists_previous_page: bool,
    pub exists_next_page: bool,
}

impl<T> PagingResultBean<T> {
    pub fn new(
        selected_list: Vec<T>,
        all_record_count: usize,
        page_size: usize,
        current_page_number: usize,
    ) -> Self {
        Self {
            selected_list,
            all_record_count,
            page_size,
            current_page_number: current_page_number.max(1),
        }
    }

    /// No record at all.
    pub fn empty(page_size: usize, current_page_number: usize) -> Self {
        Self::new(Vec::new(), 0, page_size, current_page_number)
    }

    pub fn selected_list(&self) -> &[T] {
        &self.selected_list
    }

    pub fn into_selected_list(self) -> Vec<T> {
        self.selected_list
    }

    pub fn len(&self) -> usize {
        self.selected_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_list.is_empty()
    }

    pub fn all_record_count(&self) -> usize {
        self.all_record_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page_number(&self) -> usize {
        self.current_page_number
    }

    /// `ceil(all_record_count / page_size)`, at least 1.
    pub fn all_page_count(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.all_record_count.div_ceil(self.page_size).max(1)
    }

    pub fn exists_previous_page(&self) -> bool {
        self.current_page_number > 1
    }

    pub fn exists_next_page(&self) -> bool {
        self.current_page_number < self.all_page_count()
    }

    /// One-based number of the first record on this page, 0 when nothing was selected.
    pub fn current_start_record_number(&self) -> usize {
        if self.selected_list.is_empty() {
            return 0;
        }
        self.page_size * (self.current_page_number - 1) + 1
    }

    /// One-based number of the last record on this page, 0 when nothing was selected.
    pub fn current_end_record_number(&self) -> usize {
        if self.selected_list.is_empty() {
            return 0;
        }
        self.current_start_record_number() + self.selected_list.len() - 1
    }

    pub fn page_group(&self, option: PageGroupOption) -> Result<PageGroupBean, CBeanError> {
        PageGroupBean::new(option, self.current_page_number, self.all_page_count())
    }

    pub fn page_range(&self, option: PageRangeOption) -> Result<PageRangeBean, CBeanError> {
        PageRangeBean::new(option, self.current_page_number, self.all_page_count())
    }

    pub fn summary(&self) -> PagingSummary {
        PagingSummary {
            all_record_count: self.all_record_count,
            all_page_count: self.all_page_count(),
            page_size: self.page_size,
            current_page_number: self.current_page_number,
            current_start_record_number: self.current_start_record_number(),
            current_end_record_number: self.current_end_record_number(),
            exists_previous_page: self.exists_previous_page(),
            exists_next_page: self.exists_next_page(),
        }
    }

    /// Convert the rows, keeping the totals.
    pub fn map_selected<U, F>(self, f: F) -> PagingResultBean<U>
    where
        F: FnMut(T) -> U,
    {
        PagingResultBean {
            selected_list: self.selected_list.into_iter().map(f).collect(),
            all_record_count: self.all_record_count,
            page_size: self.page_size,
            current_page_number: self.current_page_number,
        }
    }
}
