//! Shared pagination utilities for GraphQL resolvers
//!
//! This module provides constants and helper functions for consistent
//! pagination across all page queries.

/// Maximum items per page for top-level page queries
pub const MAX_LIMIT: i32 = 100;

/// Default page size when the client does not ask for one
pub const DEFAULT_LIMIT: i32 = 20;

/// Clamp pagination limit to valid range
#[inline]
pub fn clamp_limit(limit: i32, max: i32) -> i64 {
    limit.clamp(1, max) as i64
}

/// Clamp skip to non-negative
#[inline]
pub fn clamp_skip(skip: i32) -> i64 {
    skip.max(0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit_valid() {
        assert_eq!(clamp_limit(50, 100), 50);
    }

    #[test]
    fn test_clamp_limit_too_high() {
        assert_eq!(clamp_limit(200, 100), 100);
    }

    #[test]
    fn test_clamp_limit_too_low() {
        assert_eq!(clamp_limit(0, 100), 1);
        assert_eq!(clamp_limit(-5, 100), 1);
    }

    #[test]
    fn test_clamp_skip_valid() {
        assert_eq!(clamp_skip(10), 10);
    }

    #[test]
    fn test_clamp_skip_negative() {
        assert_eq!(clamp_skip(-5), 0);
    }
}
