//! List query parameters for admin endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted page size.
pub const MIN_LIMIT: u64 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u64 = 100;

/// Window parameters for list queries.
///
/// Out-of-range limits are rejected rather than clamped, matching the
/// public contract of the admin list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    /// Maximum number of rows to return (1-100).
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of rows to skip.
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Rejection for out-of-range list parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListQueryError {
    /// The limit falls outside the accepted window.
    #[error("limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {0}")]
    LimitOutOfRange(u64),
}

impl ListQuery {
    /// Checks the limit against the accepted window.
    ///
    /// # Errors
    ///
    /// Returns `ListQueryError::LimitOutOfRange` when the limit is outside
    /// 1-100.
    pub const fn validate(&self) -> Result<(), ListQueryError> {
        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(ListQueryError::LimitOutOfRange(self.limit));
        }
        Ok(())
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }
}
