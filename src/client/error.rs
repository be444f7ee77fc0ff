//! Error types for API calls.

use thiserror::Error;

/// Errors surfaced to callers of the API client.
///
/// Transport-level failures (`Network`, `Timeout`) have already been
/// through the single-retry wake policy by the time a caller sees them.
/// Well-formed HTTP error responses are passed through as `Api` untouched,
/// except 401 which is terminal for the session.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received (connection, DNS, protocol error).
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded its deadline with no response.
    #[error("Request timed out")]
    Timeout,

    /// The backend rejected the session token (HTTP 401). The stored
    /// session has been cleared; the user must log in again.
    #[error("Session expired or invalid, log in again")]
    Unauthorized,

    /// The backend answered with a non-2xx status.
    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body doesn't match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status of an `Api` error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
