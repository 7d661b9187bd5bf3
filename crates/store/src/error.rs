//! Store-level error type.

use reelnote_core::CoreError;

/// Errors produced by store operations.
///
/// Domain validation failures pass through as [`CoreError`]; the
/// remaining variants classify what went wrong talking to the record
/// store. All of them are scoped to the single attempted operation and
/// retryable by repeating the user action.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `reelnote-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request never completed (connection, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The record store answered with a non-success status.
    #[error("Record store error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The record store answered with a body we could not decode.
    #[error("Malformed record store response: {0}")]
    Decode(String),
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
