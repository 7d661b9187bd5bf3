//! Domain-level error type shared across the workspace.

/// Errors produced by domain validation and lookups.
///
/// Transport-level failures are represented separately in
/// `reelnote-store`; `CoreError` covers everything that can go wrong
/// before a network call is attempted.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup failed.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    /// Input failed a validation rule. Fully recoverable; nothing was
    /// mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested change conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}
