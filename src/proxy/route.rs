//! Static route descriptors.
//!
//! Every local route forwards to exactly one upstream path. A descriptor names
//! the upstream method, the path template, and how the request body and
//! response caching are treated; `Forwarder::forward` does the rest.

use axum::http::Method;

use crate::proxy::error::ProxyError;

/// Placeholder substituted with the route's path parameter.
pub const PARAM_PLACEHOLDER: &str = "{id}";

/// Response caching directive attached to relayed responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Leave caching headers alone.
    Default,
    /// Always send `Cache-Control: no-store` (read routes).
    NoStore,
}

/// What the route sends upstream as a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// No body is forwarded, whatever the caller sent.
    Empty,
    /// The inbound body must be JSON and is forwarded verbatim.
    Json,
}

/// A local route's forwarding contract.
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    /// Route identifier for logging/metrics.
    pub name: &'static str,
    pub method: Method,
    /// Upstream path, e.g. `/profiles/{id}/analyze`.
    pub template: &'static str,
    pub cache: CachePolicy,
    pub body: BodyPolicy,
}

impl ProxyRoute {
    /// Split the template into path segments, substituting `param`.
    pub fn segments<'a>(&'a self, param: Option<&'a str>) -> Result<Vec<&'a str>, ProxyError> {
        self.template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                if segment == PARAM_PLACEHOLDER {
                    param.ok_or(ProxyError::MissingParam(self.name))
                } else {
                    Ok(segment)
                }
            })
            .collect()
    }
}

/// `GET /api/feed` → `GET /feed`
pub static LIST_FEED: ProxyRoute = ProxyRoute {
    name: "list_feed",
    method: Method::GET,
    template: "/feed",
    cache: CachePolicy::NoStore,
    body: BodyPolicy::Empty,
};

/// `GET /api/inspirations` → `GET /profiles`
pub static LIST_PROFILES: ProxyRoute = ProxyRoute {
    name: "list_profiles",
    method: Method::GET,
    template: "/profiles",
    cache: CachePolicy::NoStore,
    body: BodyPolicy::Empty,
};

/// `POST /api/inspirations` → `POST /profiles`
pub static CREATE_PROFILE: ProxyRoute = ProxyRoute {
    name: "create_profile",
    method: Method::POST,
    template: "/profiles",
    cache: CachePolicy::Default,
    body: BodyPolicy::Json,
};

/// `PUT /api/inspirations/{id}` → `PUT /profiles/{id}`
pub static UPDATE_PROFILE: ProxyRoute = ProxyRoute {
    name: "update_profile",
    method: Method::PUT,
    template: "/profiles/{id}",
    cache: CachePolicy::Default,
    body: BodyPolicy::Json,
};

/// `DELETE /api/inspirations/{id}` → `DELETE /profiles/{id}`
pub static DELETE_PROFILE: ProxyRoute = ProxyRoute {
    name: "delete_profile",
    method: Method::DELETE,
    template: "/profiles/{id}",
    cache: CachePolicy::Default,
    body: BodyPolicy::Empty,
};

/// `POST /api/inspirations/{id}/analyze` → `POST /profiles/{id}/analyze`
pub static ANALYZE_PROFILE: ProxyRoute = ProxyRoute {
    name: "analyze_profile",
    method: Method::POST,
    template: "/profiles/{id}/analyze",
    cache: CachePolicy::Default,
    body: BodyPolicy::Empty,
};

/// `POST /api/documents/{id}/generate-scripts` → `POST /generate-scripts/{id}`
pub static GENERATE_SCRIPTS: ProxyRoute = ProxyRoute {
    name: "generate_scripts",
    method: Method::POST,
    template: "/generate-scripts/{id}",
    cache: CachePolicy::Default,
    body: BodyPolicy::Empty,
};

/// Every forwarded route, in registration order.
pub static ALL_ROUTES: [&ProxyRoute; 7] = [
    &LIST_FEED,
    &LIST_PROFILES,
    &CREATE_PROFILE,
    &UPDATE_PROFILE,
    &DELETE_PROFILE,
    &ANALYZE_PROFILE,
    &GENERATE_SCRIPTS,
];
