//! Rate-limit quota extraction
//!
//! The API reports request quotas on every response through the
//! `x-ratelimit-*` headers. A missing or non-numeric header yields an absent
//! value rather than zero or an error, so a partially-populated snapshot is
//! still usable for diagnostics.

use serde::{Deserialize, Serialize};

/// Response header carrying the total request quota.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Response header carrying the remaining request quota.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Response header carrying the quota reset time.
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate-limit snapshot derived fresh from a single HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub limit: Option<i64>,
    pub remaining: Option<i64>,
    pub reset: Option<i64>,
}

impl RateLimitInfo {
    /// Build a snapshot from raw header values.
    pub fn from_parts(
        limit: Option<&str>,
        remaining: Option<&str>,
        reset: Option<&str>,
    ) -> Self {
        Self {
            limit: parse_int_header(limit),
            remaining: parse_int_header(remaining),
            reset: parse_int_header(reset),
        }
    }
}

/// Parse an integer header value, tolerating surrounding whitespace.
pub fn parse_int_header(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_header_numeric() {
        assert_eq!(parse_int_header(Some("100")), Some(100));
        assert_eq!(parse_int_header(Some(" 0 ")), Some(0));
    }

    #[test]
    fn test_parse_int_header_missing_or_garbage() {
        assert_eq!(parse_int_header(None), None);
        assert_eq!(parse_int_header(Some("")), None);
        assert_eq!(parse_int_header(Some("soon")), None);
        assert_eq!(parse_int_header(Some("12.5")), None);
    }

    #[test]
    fn test_from_parts_full_snapshot() {
        let info = RateLimitInfo::from_parts(Some("30"), Some("0"), Some("1700000000"));
        assert_eq!(info.limit, Some(30));
        assert_eq!(info.remaining, Some(0));
        assert_eq!(info.reset, Some(1700000000));
    }

    #[test]
    fn test_from_parts_partial_snapshot() {
        let info = RateLimitInfo::from_parts(None, Some("5"), Some("n/a"));
        assert_eq!(info.limit, None);
        assert_eq!(info.remaining, Some(5));
        assert_eq!(info.reset, None);
    }
}
