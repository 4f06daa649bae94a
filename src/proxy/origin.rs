//! Upstream origin handling.
//!
//! # Responsibilities
//! - Parse the configured backend origin once at startup
//! - Normalize trailing slashes so joined paths never contain `//`
//! - Join fixed path segments and path parameters onto the origin
//!
//! # Design Decisions
//! - Path parameters are inserted as a single percent-encoded segment,
//!   so an id can never add path components of its own
//! - Query and fragment of the configured origin are discarded

use thiserror::Error;
use url::Url;

/// Errors produced while parsing an origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    #[error("origin is empty")]
    Empty,

    #[error("'{origin}' is not a valid URL: {source}")]
    Parse {
        origin: String,
        source: url::ParseError,
    },

    #[error("unsupported scheme '{0}' (expected http or https)")]
    Scheme(String),

    #[error("'{0}' cannot be used as a base URL")]
    NotABase(String),
}

/// The backend origin all routes forward to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamOrigin {
    base: Url,
}

impl UpstreamOrigin {
    /// Parse and normalize an origin such as `https://api.example.com/`.
    pub fn parse(origin: &str) -> Result<Self, OriginError> {
        let origin = origin.trim();
        if origin.is_empty() {
            return Err(OriginError::Empty);
        }

        let mut base = Url::parse(origin).map_err(|source| OriginError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        match base.scheme() {
            "http" | "https" => {}
            other => return Err(OriginError::Scheme(other.to_string())),
        }
        if base.cannot_be_a_base() {
            return Err(OriginError::NotABase(origin.to_string()));
        }

        let path = base.path().trim_end_matches('/').to_string();
        base.set_path(&path);
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    /// Origin without a trailing slash, for logging.
    pub fn as_str(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Append path segments to the origin. Each segment is percent-encoded.
    pub fn url_for<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.iter().map(AsRef::<str>::as_ref));
        }
        url
    }
}

impl std::fmt::Display for UpstreamOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
