//! Centralized error handling for the Therapease ecosystem.
//!
//! Every variant maps to exactly one HTTP status in the API layer; the
//! display string is what callers see in the response envelope, so messages
//! stay short and free of internal detail.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Missing/malformed/out-of-range input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credential (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Role or ownership mismatch (403)
    #[error("{0}")]
    Forbidden(String),

    /// Duplicate action or already-terminal state (400)
    #[error("{0}")]
    Conflict(String),

    /// Unclassified failure (500, logged server-side)
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }
}

/// A specialized Result type for Therapease domain logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
