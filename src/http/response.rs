//! Response construction for relayed upstream replies.
//!
//! # Design Decisions
//! - Upstream bodies are relayed byte-for-byte
//! - Only the status and `Content-Type` survive from the upstream reply;
//!   other upstream headers are dropped

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;

/// Build a response carrying `body` unchanged with the given status.
pub fn relay(status: StatusCode, content_type: Option<HeaderValue>, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    response
}
