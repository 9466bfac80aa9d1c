//! Cross-cutting error types for SMART-TDAH.
//!
//! Domain-specific errors (`AuthError`, `DatabaseError`) live in their own
//! crates. They converge into `ApiError` in `tdah-server`.

use thiserror::Error;

/// Errors that can be raised by any SMART-TDAH crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The entity already exists (duplicate email, duplicate link).
    #[error("{0}")]
    Conflict(String),

    /// Caller input failed validation (filter field, paging, ids).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Parse a path segment as a numeric entity id.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `what` if the segment is not an integer.
pub fn parse_id(raw: &str, what: &str) -> Result<i64, CoreError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::validation(format!("Invalid {what} ID")))
}
