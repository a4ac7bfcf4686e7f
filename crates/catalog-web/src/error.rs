//! Error types for the view server.
//!
//! [`WebError`] covers failures of the server itself (templates,
//! configuration). Upstream catalog failures are not `WebError`s: the store
//! records them and the view renders the message with a 502 status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the view layer.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A template failed to load or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A view context could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        tracing::error!(error = %self, "view rendering failed");

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
