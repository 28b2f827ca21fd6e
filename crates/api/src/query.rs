//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Paging parameters (`?pageNumber=&pageSize=`).
///
/// Validated and clamped by `catalog_core::pagination::PageRequest`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}
