//! Upstream proxy subsystem.
//!
//! # Data Flow
//! ```text
//! handler (routes.rs)
//!     → route.rs (static ProxyRoute: method, template, policies)
//!     → origin.rs (origin + segments → upstream URL)
//!     → forward.rs (one outbound call, relay or map error)
//!     → error.rs (502 / 500 mapping)
//! ```
//!
//! # Design Decisions
//! - Stateless: the only shared value is the immutable `Forwarder`
//! - Payloads are opaque bytes; JSON is checked, never rewritten

pub mod error;
pub mod forward;
pub mod origin;
pub mod route;

pub use error::{ProxyError, SetupError};
pub use forward::{ForwardRequest, Forwarder};
pub use origin::{OriginError, UpstreamOrigin};
pub use route::{BodyPolicy, CachePolicy, ProxyRoute};
