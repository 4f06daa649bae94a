//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use inspiration_gateway::config::GatewayConfig;
use inspiration_gateway::http::GatewayServer;
use inspiration_gateway::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// What the mock upstream saw.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: Bytes,
}

pub type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

/// A canned upstream reply.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: &'static str,
}

impl Canned {
    pub fn json(status: u16, body: &'static str) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body,
        }
    }

    pub fn text(status: u16, body: &'static str) -> Self {
        Self {
            status,
            content_type: None,
            body,
        }
    }
}

/// Start a mock upstream that records every request and answers with `reply`.
pub async fn start_upstream(reply: Canned) -> (SocketAddr, Recorder) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorder: Recorder = Arc::new(Mutex::new(Vec::new()));

    let seen = recorder.clone();
    let app = Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
        let seen = seen.clone();
        let reply = reply.clone();
        async move {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            seen.lock().unwrap().push(RecordedRequest {
                method,
                path: uri.path().to_string(),
                content_type: header("content-type"),
                request_id: header("x-request-id"),
                body,
            });
            canned_response(&reply)
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorder)
}

fn canned_response(reply: &Canned) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap();
    match reply.content_type {
        Some(ct) => (status, [("content-type", ct)], reply.body).into_response(),
        None => {
            let mut response = (status, reply.body).into_response();
            response.headers_mut().remove("content-type");
            response
        }
    }
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Gateway config pointing at `origin`, isolated from proxy env vars.
pub fn gateway_config(origin: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.origin = origin.to_string();
    config.upstream.use_system_proxy = false;
    config
}

/// Run a gateway on an ephemeral port. Returns its base URL.
pub async fn start_gateway(config: GatewayConfig, shutdown: &Shutdown) -> String {
    let server = GatewayServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{}", addr)
}

/// A client that never goes through an environment proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
