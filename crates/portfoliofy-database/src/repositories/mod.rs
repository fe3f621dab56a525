//! PostgreSQL implementations of the store traits.

pub mod access_request;
pub mod notification;
pub mod portfolio;
pub mod user;
pub mod view_log;

pub use access_request::AccessRequestRepository;
pub use notification::NotificationRepository;
pub use portfolio::PortfolioRepository;
pub use user::UserRepository;
pub use view_log::ViewLogRepository;

use portfoliofy_core::types::PageRequest;

/// `LIMIT` / `OFFSET` bind values. `LIMIT NULL` means no limit.
pub(crate) fn page_bounds(page: Option<PageRequest>) -> (Option<i64>, i64) {
    match page {
        Some(p) => (
            Some(i64::try_from(p.limit()).unwrap_or(i64::MAX)),
            i64::try_from(p.offset()).unwrap_or(i64::MAX),
        ),
        None => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_unpaged() {
        assert_eq!(page_bounds(None), (None, 0));
    }

    #[test]
    fn test_page_bounds_clamp_offset() {
        let (limit, offset) = page_bounds(Some(PageRequest::new(u64::MAX, 100)));
        assert_eq!(limit, Some(100));
        assert_eq!(offset, i64::MAX);
    }
}
