//! Database error types for depot-db.

use depot_core::errors::CoreError;
use thiserror::Error;

use crate::transient::is_transient_libsql_error;

/// Errors from ledger storage operations.
///
/// A missing event is never an error: lookups return `None` and deletes of
/// unknown ids succeed.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The backing store cannot be reached, or is busy. Safe to retry.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Event rejected by the validation hook.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[source] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether the caller may retry the same operation unchanged.
    ///
    /// Writes are idempotent upserts keyed by event id, so retrying a
    /// transient failure cannot duplicate a record.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::LibSql(e) => is_transient_libsql_error(e),
            _ => false,
        }
    }
}

impl From<libsql::Error> for DatabaseError {
    fn from(e: libsql::Error) -> Self {
        if is_transient_libsql_error(&e) {
            tracing::warn!(error = %e, "transient store failure");
            Self::Unavailable(e.to_string())
        } else {
            Self::LibSql(e)
        }
    }
}
