//! Inspiration Gateway Library
//!
//! Forwards the content-management UI's `/api/...` routes to the beads backend.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod proxy;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use proxy::Forwarder;
