//! Span helpers around the externally supplied callbacks.
//!
//! With the `tracing` feature off every helper returns a [`NoopSpan`], so call
//! sites stay the same: `let _span = tracing_helpers::count_span(..).entered();`

#[cfg(feature = "tracing")]
mod imp {
    pub fn paging_span(table_db_name: &str, page_number: usize, page_size: usize) -> tracing::Span {
        tracing::info_span!("cbean.paging", table = table_db_name, page_number, page_size)
    }

    pub fn count_span(table_db_name: &str) -> tracing::Span {
        tracing::debug_span!("cbean.paging.count", table = table_db_name)
    }

    pub fn select_span(table_db_name: &str, page_number: usize) -> tracing::Span {
        tracing::debug_span!("cbean.paging.select", table = table_db_name, page_number)
    }

    pub fn relation_cache_span(table_db_name: &str) -> tracing::Span {
        tracing::debug_span!("cbean.relation.property_cache", table = table_db_name)
    }
}

#[cfg(not(feature = "tracing"))]
mod imp {
    /// Stand-in for `tracing::Span` when the feature is disabled
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NoopSpan;

    impl NoopSpan {
        pub fn entered(self) -> Self {
            self
        }
    }

    pub fn paging_span(_table_db_name: &str, _page_number: usize, _page_size: usize) -> NoopSpan {
        NoopSpan
    }

    pub fn count_span(_table_db_name: &str) -> NoopSpan {
        NoopSpan
    }

    pub fn select_span(_table_db_name: &str, _page_number: usize) -> NoopSpan {
        NoopSpan
    }

    pub fn relation_cache_span(_table_db_name: &str) -> NoopSpan {
        NoopSpan
    }
}

pub use imp::*;
