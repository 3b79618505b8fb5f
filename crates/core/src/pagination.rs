//! Page/limit parsing for list endpoints.
//!
//! Query values arrive as raw strings and must be plain ASCII digits; signs,
//! whitespace, and decimals are rejected rather than coerced.

use crate::error::CoreError;

/// Page size used when the client does not send `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A resolved page window, ready to hand to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub page: i64,
    /// Maximum number of records to return.
    pub limit: i64,
}

impl Page {
    /// Number of records to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Build a page window from raw `page` / `limit` query values.
    ///
    /// `page` defaults to 1 and must be at least 1. `limit` defaults to
    /// [`DEFAULT_PAGE_SIZE`] and is clamped into `1..=MAX_PAGE_SIZE`.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Result<Self, CoreError> {
        let page = parse_digits("page", page)?.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation("page must be at least 1".into()));
        }
        let limit = clamp_limit(parse_digits("limit", limit)?, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        Ok(Self { page, limit })
    }
}

/// Clamp a user-provided limit into `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Parse an optional digits-only query value. Empty strings count as absent.
fn parse_digits(name: &str, raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "{name} must contain digits only"
        )));
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("{name} is out of range")))
}
