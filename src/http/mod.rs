//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → routes.rs (pick the ProxyRoute for the path)
//!     → proxy::Forwarder (single upstream call)
//!     → response.rs (relay status + body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use request::{MakeRequestUuid4, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, GatewayServer};
