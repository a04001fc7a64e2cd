//! Pagination

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page used when none is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1")]
    InvalidPage,

    #[error("limit must be between 1 and {MAX_LIMIT}")]
    InvalidLimit,
}

/// Validated page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, applying defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns an error when `page` is zero or `limit` is outside `1..=MAX_LIMIT`.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page == 0 {
            return Err(PaginationError::InvalidPage);
        }

        if limit == 0 || limit > MAX_LIMIT {
            return Err(PaginationError::InvalidLimit);
        }

        Ok(Self { page, limit })
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results with the metadata needed to fetch the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            pages: total.div_ceil(u64::from(request.limit)),
        }
    }

    /// Convert every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            pages: self.pages,
        }
    }

    /// Slice an already sorted, complete result set down to the requested page.
    #[must_use]
    pub fn from_sorted(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = request.limit as usize;

        let items = all.into_iter().skip(offset).take(limit).collect();

        Self::new(items, total, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_missing() -> Result<(), PaginationError> {
        let request = PageRequest::new(None, None)?;

        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);

        Ok(())
    }

    #[test]
    fn rejects_zero_page_and_out_of_range_limit() {
        assert_eq!(PageRequest::new(Some(0), None), Err(PaginationError::InvalidPage));
        assert_eq!(PageRequest::new(None, Some(0)), Err(PaginationError::InvalidLimit));
        assert_eq!(PageRequest::new(None, Some(101)), Err(PaginationError::InvalidLimit));
    }

    #[test]
    fn second_page_skips_first_limit_records() -> Result<(), PaginationError> {
        let request = PageRequest::new(Some(2), Some(10))?;
        let page = Page::from_sorted((1..=25).collect(), request);

        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 3);

        Ok(())
    }

    #[test]
    fn page_past_the_end_is_empty() -> Result<(), PaginationError> {
        let page = Page::from_sorted(vec![1, 2, 3], PageRequest::new(Some(5), Some(2))?);

        assert!(page.items.is_empty());
        assert_eq!(page.pages, 2);

        Ok(())
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<u8> = Page::new(Vec::new(), 0, PageRequest::default());

        assert_eq!(page.pages, 0);
    }
}
