use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// Sort direction
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

pub fn default_page() -> i64 {
    1
}

pub fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }
}

pub fn page_limit(page_size: i64) -> i64 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_limit(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(page_limit(0), 1);
        assert_eq!(page_limit(25), 25);
        assert_eq!(page_limit(1000), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_uses_clamped_limit() {
        let query = PaginationQuery {
            page: 3,
            page_size: 500,
        };
        assert_eq!(query.offset(), 2 * MAX_PAGE_SIZE);
        assert_eq!(PaginationQuery::default().offset(), 0);
        assert_eq!(page_offset(-4, 10), 0);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        assert_eq!(page_offset(i64::MAX, 10), i64::MAX);
        let query = PaginationQuery {
            page: i64::MAX,
            page_size: i64::MAX,
        };
        assert!(query.offset() > 0);
    }
}
