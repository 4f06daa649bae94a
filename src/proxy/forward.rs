//! The forwarding helper shared by every route.
//!
//! # Responsibilities
//! - Build the upstream URL from the origin and the route template
//! - Forward the JSON body verbatim when the route carries one
//! - Relay upstream status and body bytes unchanged
//! - Map transport failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - Exactly one outbound attempt per inbound request (no retries)
//! - No timeouts beyond the runtime's defaults
//! - Nothing is cached; read routes are marked `no-store`

use std::time::Instant;

use axum::body::Bytes;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::de::IgnoredAny;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::request::{RequestIdExt, X_REQUEST_ID};
use crate::http::response::relay;
use crate::observability::metrics;
use crate::proxy::error::{ProxyError, SetupError};
use crate::proxy::origin::UpstreamOrigin;
use crate::proxy::route::{BodyPolicy, CachePolicy, ProxyRoute};

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// The per-request inputs to `Forwarder::forward`.
#[derive(Debug, Clone, Default)]
pub struct ForwardRequest {
    /// Value substituted for `{id}` in the route template.
    pub param: Option<String>,
    /// Inbound body; only sent for `BodyPolicy::Json` routes.
    pub body: Option<Bytes>,
    /// Correlation id propagated to the upstream.
    pub request_id: Option<String>,
}

impl ForwardRequest {
    /// Start a request, picking up the inbound request id.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            request_id: headers.request_id().map(str::to_string),
            ..Self::default()
        }
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

/// Forwards requests to the configured upstream.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    origin: UpstreamOrigin,
}

impl Forwarder {
    /// Create a forwarder from an already-built client.
    pub fn new(origin: UpstreamOrigin, client: reqwest::Client) -> Self {
        Self { client, origin }
    }

    /// Parse the origin and build the outbound client.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, SetupError> {
        let origin = UpstreamOrigin::parse(&config.origin)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("inspiration-gateway/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(SetupError::Client)?;

        Ok(Self::new(origin, client))
    }

    pub fn origin(&self) -> &UpstreamOrigin {
        &self.origin
    }

    /// The upstream URL a route resolves to.
    pub fn target_url(&self, route: &ProxyRoute, param: Option<&str>) -> Result<Url, ProxyError> {
        let segments = route.segments(param)?;
        Ok(self.origin.url_for(segments.as_slice()))
    }

    /// Forward one request and produce the response for the caller.
    ///
    /// Never fails: every error is already mapped to a response.
    pub async fn forward(&self, route: &ProxyRoute, request: ForwardRequest) -> Response {
        let start = Instant::now();
        let request_id = request.request_id.clone();

        let mut response = match self.try_forward(route, request).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    ProxyError::InvalidRequestJson(_) => tracing::debug!(
                        request_id = request_id.as_deref().unwrap_or("unknown"),
                        route = route.name,
                        error = %e,
                        "Rejected request body"
                    ),
                    _ => tracing::error!(
                        request_id = request_id.as_deref().unwrap_or("unknown"),
                        route = route.name,
                        error = %e,
                        "Upstream error"
                    ),
                }
                e.into_response()
            }
        };

        if route.cache == CachePolicy::NoStore {
            response
                .headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }

        metrics::record_request(route.name, route.method.as_str(), response.status().as_u16(), start);
        response
    }

    async fn try_forward(&self, route: &ProxyRoute, request: ForwardRequest) -> Result<Response, ProxyError> {
        let url = self.target_url(route, request.param.as_deref())?;
        let request_id = request.request_id.as_deref().unwrap_or("unknown");

        let mut outbound = self.client.request(route.method.clone(), url.clone());
        if let Some(id) = &request.request_id {
            outbound = outbound.header(X_REQUEST_ID, id);
        }
        if route.body == BodyPolicy::Json {
            let body = request.body.unwrap_or_default();
            serde_json::from_slice::<IgnoredAny>(&body).map_err(ProxyError::InvalidRequestJson)?;
            outbound = outbound.header(CONTENT_TYPE, APPLICATION_JSON).body(body);
        }

        tracing::debug!(
            request_id = %request_id,
            route = route.name,
            method = %route.method,
            url = %url,
            "Forwarding request"
        );

        let started = Instant::now();
        let upstream = outbound.send().await?;
        let status = upstream.status();
        let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
        let body = upstream.bytes().await?;

        tracing::info!(
            request_id = %request_id,
            route = route.name,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Upstream responded"
        );

        if !status.is_success() {
            let content_type =
                content_type.unwrap_or_else(|| HeaderValue::from_static(TEXT_PLAIN));
            return Ok(relay(status, Some(content_type), body));
        }

        if body.is_empty() {
            return Ok(relay(status, None, body));
        }

        serde_json::from_slice::<IgnoredAny>(&body).map_err(ProxyError::InvalidUpstreamJson)?;
        Ok(relay(status, Some(HeaderValue::from_static(APPLICATION_JSON)), body))
    }
}
