//! Offset/limit pagination envelope shared by every listing endpoint.

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// serde default helpers for filter DTOs.
pub fn default_page() -> u64 {
    DEFAULT_PAGE
}

pub fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// A page of results plus the totals a client needs to render pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paginated<T: ToSchema> {
    /// The rows of the requested page
    pub data: Vec<T>,
    /// Total number of rows matching the filter, across all pages
    pub total: u64,
    /// 1-based page number that was requested
    pub page: u64,
    /// Page size that was applied
    pub limit: u64,
    /// ceil(total / limit)
    pub total_pages: u64,
}

impl<T: ToSchema> Paginated<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            data,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// Row offset for a 1-based page.
pub fn offset_for(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1) * limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Paginated<String> = Paginated::new(vec![], 45, 3, 20);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        let page: Paginated<String> = Paginated::new(vec![], 40, 1, 20);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_total_pages_empty_result() {
        let page: Paginated<String> = Paginated::new(vec![], 0, 1, 20);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_page_past_the_end_keeps_totals() {
        // page 4 of 45 rows at limit 20: empty data, same totals
        let page: Paginated<String> = Paginated::new(vec![], 45, 4, 20);
        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages, 3);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_offset_law() {
        assert_eq!(offset_for(1, 20), 0);
        assert_eq!(offset_for(3, 20), 40);
        assert_eq!(offset_for(2, 7), 7);
    }

    #[test]
    fn test_limit_bounds_are_consistent() {
        assert!(DEFAULT_LIMIT <= MAX_LIMIT);
        assert!(DEFAULT_PAGE >= 1);
    }
}
