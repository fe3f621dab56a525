//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use portfoliofy_core::types::PageRequest;

/// Query parameters for paginated endpoints.
///
/// Listings are unpaginated unless `page` or `per_page` is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page (max 100).
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`, if any paging was asked for.
    pub fn page_request(&self) -> Option<PageRequest> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let defaults = PageRequest::default();
        Some(PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.page_size),
        ))
    }
}
