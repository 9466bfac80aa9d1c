//! Database error types for tdah-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be read.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The addressed row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The write would duplicate an existing row.
    #[error("{0}")]
    Conflict(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this is a `UNIQUE` or `PRIMARY KEY` violation from `SQLite`.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().contains("UNIQUE constraint failed"),
            _ => false,
        }
    }

    /// Whether this is a `FOREIGN KEY` violation from `SQLite`.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().contains("FOREIGN KEY constraint failed"),
            _ => false,
        }
    }
}
