//! Offset pagination utilities for list endpoints.

use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound on page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Pagination info returned alongside list data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Builds pagination metadata from a clamped page request and the
    /// total row count.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Clamps raw query parameters into a valid `(page, per_page, offset)`
/// triple. Out-of-range input is corrected, never rejected.
pub fn clamp_page(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let offset = (page - 1) * per_page;
    (page, per_page, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_defaults() {
        assert_eq!(clamp_page(None, None), (1, DEFAULT_PER_PAGE, 0));
    }

    #[test]
    fn test_clamp_page_bounds() {
        assert_eq!(clamp_page(Some(0), Some(0)), (1, 1, 0));
        assert_eq!(clamp_page(Some(-5), Some(1000)), (1, MAX_PER_PAGE, 0));
    }

    #[test]
    fn test_clamp_page_offset() {
        let (page, per_page, offset) = clamp_page(Some(3), Some(10));
        assert_eq!((page, per_page, offset), (3, 10, 20));
    }

    #[test]
    fn test_pagination_total_pages() {
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).total_pages, 2);
        assert_eq!(Pagination::new(1, 20, 59).total_pages, 3);
    }
}
