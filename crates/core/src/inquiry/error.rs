//! Inquiry error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Inquiry operation errors.
#[derive(Debug, Error)]
pub enum InquiryError {
    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Inquiry not found.
    #[error("inquiry not found: {0}")]
    NotFound(i32),

    /// Photo payload could not be decoded.
    #[error("invalid photo payload: {0}")]
    InvalidPayload(String),

    /// Object storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl InquiryError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub const fn not_found(id: i32) -> Self {
        Self::NotFound(id)
    }

    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
