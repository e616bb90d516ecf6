//! Fixed-size pagination.

/// Rows per page for every paginated question listing.
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
}

impl PageRequest {
    /// Returns None for pages below 1.
    pub fn new(page: i64) -> Option<Self> {
        (page >= 1).then_some(PageRequest { page })
    }

    pub fn first() -> Self {
        PageRequest { page: 1 }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        QUESTIONS_PER_PAGE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of rows plus the total number of rows matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
}

impl<T> Page<T> {
    /// An empty page past the first one does not exist.
    pub fn is_out_of_range(&self) -> bool {
        self.items.is_empty() && self.page > 1
    }
}
