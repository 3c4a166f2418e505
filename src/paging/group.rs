//! Page group: fixed blocks of page numbers (1-10, 11-20, ...).

use crate::error::CBeanError;
use crate::paging::link::build_links;
use crate::paging::PageNumberLink;
use once_cell::unsync::OnceCell;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageGroupOption {
    pub page_group_size: usize,
}

impl PageGroupOption {
    pub fn new(page_group_size: usize) -> Self {
        Self { page_group_size }
    }
}

/// Page numbers of the group holding the current page
///
/// The list is computed once per bean; build a new bean for another page.
#[derive(Debug, Clone)]
pub struct PageGroupBean {
    option: PageGroupOption,
    current_page_number: usize,
    all_page_count: usize,
    page_number_list: OnceCell<Vec<usize>>,
}

impl PageGroupBean {
    /// # Errors
    ///
    /// `IllegalState` when the group size is 0 or 1.
    pub fn new(
        option: PageGroupOption,
        current_page_number: usize,
        all_page_count: usize,
    ) -> Result<Self, CBeanError> {
        let all_page_count = all_page_count.max(1);
        let bean = Self {
            option,
            current_page_number: current_page_number.clamp(1, all_page_count),
            all_page_count,
            page_number_list: OnceCell::new(),
        };
        if option.page_group_size <= 1 {
            return Err(bean.illegal_state("The page group size should be greater than 1"));
        }
        Ok(bean)
    }

    pub fn option(&self) -> PageGroupOption {
        self.option
    }

    pub fn current_page_number(&self) -> usize {
        self.current_page_number
    }

    pub fn all_page_count(&self) -> usize {
        self.all_page_count
    }

    fn group_start(&self) -> usize {
        let size = self.option.page_group_size;
        (self.current_page_number - 1) / size * size + 1
    }

    /// Contiguous page numbers of the current group.
    pub fn create_page_number_list(&self) -> &[usize] {
        self.page_number_list.get_or_init(|| {
            let start = self.group_start();
            let end = (start + self.option.page_group_size - 1).min(self.all_page_count);
            (start..=end).collect()
        })
    }

    pub fn exists_previous_group(&self) -> bool {
        self.current_page_number > self.option.page_group_size
    }

    pub fn exists_next_group(&self) -> bool {
        self.group_start() + self.option.page_group_size <= self.all_page_count
    }

    /// Last page of the previous group.
    pub fn previous_group_nearest_page_number(&self) -> Result<usize, CBeanError> {
        if !self.exists_previous_group() {
            return Err(self.illegal_state("The previous page group does not exist"));
        }
        Ok(self.group_start() - 1)
    }

    /// First page of the next group.
    pub fn next_group_nearest_page_number(&self) -> Result<usize, CBeanError> {
        if !self.exists_next_group() {
            return Err(self.illegal_state("The next page group does not exist"));
        }
        Ok(self.group_start() + self.option.page_group_size)
    }

    pub fn build_page_number_link_list<F>(&self, href_builder: F) -> Vec<PageNumberLink>
    where
        F: FnMut(usize) -> String,
    {
        build_links(self.create_page_number_list(), self.current_page_number, href_builder)
    }

    fn illegal_state(&self, notice: &str) -> CBeanError {
        CBeanError::IllegalState(format!(
            "{notice}.\n\
             [Current Page Number]\n{}\n\
             [All Page Count]\n{}\n\
             [Page Group Option]\n{:?}",
            self.current_page_number, self.all_page_count, self.option
        ))
    }
}
