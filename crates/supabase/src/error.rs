//! Error type for backend calls.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's human-readable error message. The only
    /// message inspected programmatically is the stock-shortage
    /// constraint, via [`SupabaseError::is_stock_shortage`].
    #[error("backend error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Backend-provided message, empty if the body had none.
        message: String,
    },

    /// A response body did not match the expected typed record.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single-row lookup matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// An operation requiring a signed-in user was called without one.
    #[error("no active session")]
    MissingSession,
}

impl SupabaseError {
    /// Whether this error is the backend's stock-shortage constraint
    /// violation (matched by message substring, as the backend offers no
    /// structured code for it).
    #[must_use]
    pub fn is_stock_shortage(&self) -> bool {
        matches!(self, Self::Api { message, .. } if message.contains("Not enough stock"))
    }
}
