//! Cross-cutting error types for the depot.
//!
//! Storage errors (`DatabaseError`) live in `depot-db`. The binary converges
//! everything into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any depot crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
