//! Local API routes.
//!
//! Each handler only picks its `ProxyRoute` and hands the request to the
//! shared `Forwarder`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::proxy::route::{
    ANALYZE_PROFILE, CREATE_PROFILE, DELETE_PROFILE, GENERATE_SCRIPTS, LIST_FEED, LIST_PROFILES,
    UPDATE_PROFILE,
};
use crate::proxy::ForwardRequest;

/// Build the route table. State is attached by the caller.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/feed", get(list_feed))
        .route("/api/inspirations", get(list_profiles).post(create_profile))
        .route(
            "/api/inspirations/{id}",
            put(update_profile).delete(delete_profile),
        )
        .route("/api/inspirations/{id}/analyze", post(analyze_profile))
        .route(
            "/api/documents/{id}/generate-scripts",
            post(generate_scripts),
        )
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_feed(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state
        .forwarder
        .forward(&LIST_FEED, ForwardRequest::from_headers(&headers))
        .await
}

async fn list_profiles(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state
        .forwarder
        .forward(&LIST_PROFILES, ForwardRequest::from_headers(&headers))
        .await
}

async fn create_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = ForwardRequest::from_headers(&headers).body(body);
    state.forwarder.forward(&CREATE_PROFILE, request).await
}

async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = ForwardRequest::from_headers(&headers).param(id).body(body);
    state.forwarder.forward(&UPDATE_PROFILE, request).await
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let request = ForwardRequest::from_headers(&headers).param(id);
    state.forwarder.forward(&DELETE_PROFILE, request).await
}

async fn analyze_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let request = ForwardRequest::from_headers(&headers).param(id);
    state.forwarder.forward(&ANALYZE_PROFILE, request).await
}

async fn generate_scripts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let request = ForwardRequest::from_headers(&headers).param(id);
    state.forwarder.forward(&GENERATE_SCRIPTS, request).await
}
