//! Forwarding errors and their HTTP mapping.
//!
//! Every forwarding failure is a `502 Bad Gateway` whose text starts with
//! `Upstream error: `, whether the upstream could not be reached, answered
//! with something that is not JSON, or the caller's body could not be read
//! as JSON. Upstream non-success statuses are not errors; they are relayed
//! as-is.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::proxy::origin::OriginError;

/// Errors raised while forwarding a single request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The outbound call failed (DNS, connect, reset, body read).
    #[error("Upstream error: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// The upstream reported success but its body is not JSON.
    #[error("Upstream error: invalid JSON in upstream response: {0}")]
    InvalidUpstreamJson(#[source] serde_json::Error),

    /// The caller's body is not JSON. Nothing is sent upstream.
    #[error("Upstream error: invalid JSON body: {0}")]
    InvalidRequestJson(#[source] serde_json::Error),

    #[error("route '{0}' requires a path parameter")]
    MissingParam(&'static str),
}

impl ProxyError {
    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Transport(_)
            | ProxyError::InvalidUpstreamJson(_)
            | ProxyError::InvalidRequestJson(_) => StatusCode::BAD_GATEWAY,
            ProxyError::MissingParam(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Errors raised while building a `Forwarder`.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid upstream origin: {0}")]
    Origin(#[from] OriginError),

    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Render an error and all of its sources, `outer: inner: root`.
///
/// reqwest keeps the interesting part ("connection refused") in the source
/// chain rather than in its own message.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
