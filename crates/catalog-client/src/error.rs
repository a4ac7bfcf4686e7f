//! Error types for the catalog API client.
//!
//! Every failure mode of a request surfaces as a [`ClientError`]. Callers
//! receive it unchanged: the client does not retry, classify further, or
//! substitute fallback data.

use std::time::Duration;

/// Errors that can occur while talking to the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("{0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not valid JSON of the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// A path segment cannot be expressed in a URL. `.` and `..` are
    /// resolved away by URL parsing, so they are refused instead of sent.
    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

impl ClientError {
    /// Whether the backend reported that the resource does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
