//! Page range: a window of page numbers centred on the current page.

use crate::error::CBeanError;
use crate::paging::link::build_links;
use crate::paging::PageNumberLink;
use once_cell::unsync::OnceCell;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRangeOption {
    /// Pages shown on each side of the current page
    pub page_range_size: usize,
    /// Keep the window at full width near the first/last page
    pub fill_limit: bool,
}

impl PageRangeOption {
    pub fn new(page_range_size: usize) -> Self {
        Self {
            page_range_size,
            fill_limit: false,
        }
    }

    pub fn fill_limit(mut self) -> Self {
        self.fill_limit = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct PageRangeBean {
    option: PageRangeOption,
    current_page_number: usize,
    all_page_count: usize,
    page_number_list: OnceCell<Vec<usize>>,
}

impl PageRangeBean {
    /// # Errors
    ///
    /// `IllegalState` when the range size is 0.
    pub fn new(
        option: PageRangeOption,
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
        if option.page_range_size == 0 {
            return Err(bean.illegal_state("The page range size should be plus"));
        }
        Ok(bean)
    }

    pub fn option(&self) -> PageRangeOption {
        self.option
    }

    pub fn current_page_number(&self) -> usize {
        self.current_page_number
    }

    pub fn all_page_count(&self) -> usize {
        self.all_page_count
    }

    /// Contiguous page numbers around the current page.
    pub fn create_page_number_list(&self) -> &[usize] {
        self.page_number_list.get_or_init(|| {
            let (start, end) = self.window();
            (start..=end).collect()
        })
    }

    fn window(&self) -> (usize, usize) {
        let size = self.option.page_range_size;
        let current = self.current_page_number;
        let all = self.all_page_count;
        let mut start = current.saturating_sub(size).max(1);
        let mut end = (current + size).min(all);
        if self.option.fill_limit {
            let width = size * 2 + 1;
            let actual = end - start + 1;
            if actual < width {
                let lack = width - actual;
                if start == 1 {
                    end = (end + lack).min(all);
                } else if end == all {
                    start = start.saturating_sub(lack).max(1);
                }
            }
        }
        (start, end)
    }

    pub fn exists_previous_range(&self) -> bool {
        self.window().0 > 1
    }

    pub fn exists_next_range(&self) -> bool {
        self.window().1 < self.all_page_count
    }

    /// Page just before the window.
    pub fn previous_range_nearest_page_number(&self) -> Result<usize, CBeanError> {
        if !self.exists_previous_range() {
            return Err(self.illegal_state("The previous page range does not exist"));
        }
        Ok(self.window().0 - 1)
    }

    /// Page just after the window.
    pub fn next_range_nearest_page_number(&self) -> Result<usize, CBeanError> {
        if !self.exists_next_range() {
            return Err(self.illegal_state("The next page range does not exist"));
        }
        Ok(self.window().1 + 1)
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
             [Page Range Option]\n{:?}",
            self.current_page_number, self.all_page_count, self.option
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(option: PageRangeOption, current: usize, all: usize) -> PageRangeBean {
        PageRangeBean::new(option, current, all).unwrap()
    }

    #[test]
    fn test_symmetric_window() {
        let bean = range(PageRangeOption::new(3), 10, 20);
        assert_eq!(bean.create_page_number_list(), &[7, 8, 9, 10, 11, 12, 13]);
        assert_eq!(bean.previous_range_nearest_page_number().unwrap(), 6);
        assert_eq!(bean.next_range_nearest_page_number().unwrap(), 14);
    }

    #[test]
    fn test_clipped_without_fill() {
        let head = range(PageRangeOption::new(3), 2, 20);
        assert_eq!(head.create_page_number_list(), &[1, 2, 3, 4, 5]);
        let tail = range(PageRangeOption::new(3), 19, 20);
        assert_eq!(tail.create_page_number_list(), &[16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_fill_limit_shifts_toward_open_side() {
        let option = PageRangeOption::new(3).fill_limit();
        assert_eq!(range(option, 2, 20).create_page_number_list(), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(range(option, 19, 20).create_page_number_list(), &[14, 15, 16, 17, 18, 19, 20]);
        assert_eq!(range(option, 2, 4).create_page_number_list(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_range_properties_hold_for_all_pages() {
        for size in 1..5 {
            for all in 1..25 {
                for current in 1..=all {
                    let option = PageRangeOption::new(size).fill_limit();
                    let bean = range(option, current, all);
                    let list = bean.create_page_number_list();
                    assert!(list.contains(&current));
                    assert!(list.windows(2).all(|w| w[1] == w[0] + 1));
                    assert_eq!(list.len(), (size * 2 + 1).min(all));
                }
            }
        }
    }

    #[test]
    fn test_edges_have_no_neighbour_range() {
        let bean = range(PageRangeOption::new(2), 1, 3);
        assert!(!bean.exists_previous_range());
        assert!(!bean.exists_next_range());
        let err = bean.previous_range_nearest_page_number().unwrap_err();
        assert!(err.is_illegal_state());
        assert!(err.to_string().contains("page_range_size: 2"));
        assert!(bean.next_range_nearest_page_number().is_err());
    }

    #[test]
    fn test_invalid_range_size() {
        assert!(PageRangeBean::new(PageRangeOption::new(0), 1, 10).unwrap_err().is_illegal_state());
    }

    #[test]
    fn test_links_mark_current() {
        let links =
            range(PageRangeOption::new(1), 5, 9).build_page_number_link_list(|n| n.to_string());
        let pages: Vec<usize> = links.iter().map(|l| l.page_number).collect();
        assert_eq!(pages, vec![4, 5, 6]);
        assert!(links[1].current);
    }
}
