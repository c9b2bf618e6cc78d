//! Shared pagination types for API query parameters.
//!
//! Offset-based pagination with `limit` and `offset`. The limit is always
//! clamped server-side so a single request can never read an unbounded slice
//! of a user's detection history.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Default number of items to return per page.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of items that can be requested per page.
pub const MAX_LIMIT: i64 = 200;

/// Standard pagination parameters for list endpoints.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Maximum number of items to return (default: 50, max: 200)
    #[param(default = 50, minimum = 1, maximum = 200)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,

    /// Number of items to skip (default: 0)
    #[param(default = 0, minimum = 0)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub offset: Option<i64>,
}

impl Pagination {
    /// Get the limit value, clamped between 1 and MAX_LIMIT.
    /// Defaults to DEFAULT_LIMIT if not specified.
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Get the offset value, defaulting to 0 if not specified.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let p = Pagination::default();
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_limit_clamping() {
        // Zero is clamped to 1
        let p = Pagination {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(p.limit(), 1);

        // Negative is clamped to 1
        let p = Pagination {
            limit: Some(-5),
            offset: None,
        };
        assert_eq!(p.limit(), 1);

        // Over max is clamped to MAX_LIMIT
        let p = Pagination {
            limit: Some(100_000),
            offset: None,
        };
        assert_eq!(p.limit(), MAX_LIMIT);

        // Valid value passes through
        let p = Pagination {
            limit: Some(50),
            offset: None,
        };
        assert_eq!(p.limit(), 50);
    }

    #[test]
    fn test_offset_clamping() {
        // Negative is clamped to 0
        let p = Pagination {
            limit: None,
            offset: Some(-10),
        };
        assert_eq!(p.offset(), 0);

        // Valid value passes through
        let p = Pagination {
            limit: None,
            offset: Some(100),
        };
        assert_eq!(p.offset(), 100);
    }
}
