//! Pagination state and slicing
//!
//! Pages are 1-based and fixed-size. Slicing is clamped: a page past the end
//! yields an empty tail, never an error.

use crate::core::record::Record;
use serde::{Deserialize, Serialize};

/// Current page position and size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
}

impl PageState {
    /// Create a state on page 1; a zero size is clamped to 1
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), current_page: 1 }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Move to a page; pages below 1 are clamped to 1
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Change the page size, keeping the current page position
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Back to page 1 (filter or search outcome changed)
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(20)
    }
}

/// The slice of `records` for the state's current page
///
/// Pages below 1 (possible via a deserialized state) read as page 1.
pub fn page<'a>(records: &'a [Record], state: &PageState) -> &'a [Record] {
    let start = (state.current_page.max(1) - 1).saturating_mul(state.page_size);
    let start = start.min(records.len());
    let end = start.saturating_add(state.page_size).min(records.len());
    &records[start..end]
}

/// Pagination metadata for the host's paging controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub page: usize,
    /// Number of items per page
    pub page_size: usize,
    /// Total number of items after filters and search
    pub total: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(page_size) };
        let start = (page - 1) * page_size;

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: start + page_size < total,
            has_prev: page > 1,
        }
    }
}
