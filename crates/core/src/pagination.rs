//! Page request validation for paged listings.
//!
//! Pages are 1-based. Missing values fall back to the defaults below,
//! non-positive values are rejected and oversized pages are clamped.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Page returned when the caller does not ask for one.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound applied when the server configuration does not override it.
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 50;

/* --------------------------------------------------------------------------
Page request
-------------------------------------------------------------------------- */

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a page request from optional query values.
    ///
    /// `page_size` above `max_page_size` is clamped rather than rejected.
    pub fn new(
        page_number: Option<i64>,
        page_size: Option<i64>,
        max_page_size: i64,
    ) -> Result<Self, CoreError> {
        let page_number = page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page_number < 1 {
            return Err(CoreError::Validation(format!(
                "pageNumber must be at least 1 (got {page_number})"
            )));
        }
        if page_size < 1 {
            return Err(CoreError::Validation(format!(
                "pageSize must be at least 1 (got {page_size})"
            )));
        }

        Ok(Self {
            page_number,
            page_size: page_size.min(max_page_size.max(1)),
        })
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Rows in one page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
