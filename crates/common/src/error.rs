//! Domain error taxonomy for backend interactions.

use thiserror::Error;

use crate::page::InvalidPage;

/// Errors surfaced by backend operations.
///
/// Only the two well-known failure classes are carried as domain errors;
/// everything else is an operational anomaly that keeps its original
/// status and body text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend has no record for the requested key.
    #[error("{0}")]
    NotFound(String),

    /// The backend rejected the request as unprocessable.
    #[error("{0}")]
    InvalidInput(String),

    /// The backend answered with a status outside the known failure classes.
    #[error("unexpected status {status} from backend: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The request never produced a response (connect, timeout, decode).
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<InvalidPage> for BackendError {
    fn from(err: InvalidPage) -> Self {
        BackendError::InvalidInput(err.to_string())
    }
}
