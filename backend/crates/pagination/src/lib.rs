//! Offset pagination primitives shared by catalog list endpoints.
//!
//! A [`PageRequest`] validates the caller-supplied page number and page
//! size before any query runs; a [`PageInfo`] describes the resulting
//! window once the filtered total is known. Keeping the arithmetic here
//! means the backend's handlers and repositories never hand-roll
//! offset/limit maths.
//!
//! # Examples
//! ```
//! use pagination::{PageInfo, PageRequest};
//!
//! let request = PageRequest::new(2, 10).expect("valid request");
//! assert_eq!(request.offset(), 10);
//! assert_eq!(request.limit(), 10);
//!
//! let info = PageInfo::compute(&request, 35);
//! assert_eq!(info.total_pages(), 4);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Page sizes accepted by list endpoints.
pub const ALLOWED_PAGE_SIZES: [u32; 3] = [10, 20, 50];

/// Default page number when the caller omits one.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the caller omits one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Validation errors raised while constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are 1-based; zero is never a valid window.
    #[error("page must be 1 or greater, got {page}")]
    PageOutOfRange {
        /// The rejected page number.
        page: u32,
    },
    /// The page size is outside the fixed allowed set.
    #[error("page size must be 10, 20, or 50, got {page_size}")]
    UnsupportedPageSize {
        /// The rejected page size.
        page_size: u32,
    },
}

/// Validated pagination window requested by a caller.
///
/// ## Invariants
/// - `page >= 1`.
/// - `page_size` is one of [`ALLOWED_PAGE_SIZES`].
///
/// No upper bound is applied to `page`; a window past the end of the
/// result set simply yields zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate a page number and page size pair.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::PageOutOfRange`] for `page == 0` and
    /// [`PageRequestError::UnsupportedPageSize`] for sizes outside
    /// [`ALLOWED_PAGE_SIZES`].
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange { page });
        }
        if !ALLOWED_PAGE_SIZES.contains(&page_size) {
            return Err(PageRequestError::UnsupportedPageSize { page_size });
        }
        Ok(Self { page, page_size })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before the window starts.
    ///
    /// Widened to `i64` because that is what SQL OFFSET clauses take.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    /// Maximum rows in the window, widened for SQL LIMIT clauses.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    current_page: u32,
    total_pages: u32,
    page_size: u32,
}

impl PageInfo {
    /// Derive page metadata from the request and the filtered total.
    ///
    /// `total_pages` is the ceiling of `total_count / page_size`; an
    /// empty result set yields zero pages.
    #[must_use]
    pub fn compute(request: &PageRequest, total_count: u64) -> Self {
        let pages = total_count.div_ceil(u64::from(request.page_size));
        Self {
            current_page: request.page,
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
            page_size: request.page_size,
        }
    }

    /// The page the caller asked for.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages available under the current filter.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page size echoed back to the caller.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}
