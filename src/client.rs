//! Typed client for the gateway's local API.
//!
//! Non-success statuses are not errors here: the gateway relays the
//! backend's status and text, and callers decide what to do with it.
//! Ids are sent as a single percent-encoded path segment.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::http::request::X_REQUEST_ID;
use crate::models::{FeedPage, ProfileDraft, ProfileList};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway could not be reached or the reply could not be read.
    #[error("request to gateway failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid gateway URL '{0}'")]
    BaseUrl(String),
}

/// A relayed reply: the status and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: StatusCode,
    pub body: String,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body, treating non-success statuses as errors.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if !self.is_success() {
            return Err(ClientError::Status {
                status: self.status,
                body: self.body.clone(),
            });
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub struct GatewayClient {
    client: Client,
    base_url: String,
    request_id: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_id: None,
        }
    }

    /// Send this request ID with every call instead of letting the gateway mint one.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub async fn feed(&self) -> Result<GatewayReply, ClientError> {
        self.send::<()>(Method::GET, &["api", "feed"], None).await
    }

    pub async fn feed_page(&self) -> Result<FeedPage, ClientError> {
        self.feed().await?.json()
    }

    pub async fn list_profiles(&self) -> Result<GatewayReply, ClientError> {
        self.send::<()>(Method::GET, &["api", "inspirations"], None).await
    }

    pub async fn profile_list(&self) -> Result<ProfileList, ClientError> {
        self.list_profiles().await?.json()
    }

    pub async fn create_profile(&self, draft: &ProfileDraft) -> Result<GatewayReply, ClientError> {
        self.send(Method::POST, &["api", "inspirations"], Some(draft)).await
    }

    pub async fn update_profile(&self, id: &str, draft: &ProfileDraft) -> Result<GatewayReply, ClientError> {
        self.send(Method::PUT, &["api", "inspirations", id], Some(draft))
            .await
    }

    pub async fn delete_profile(&self, id: &str) -> Result<GatewayReply, ClientError> {
        self.send::<()>(Method::DELETE, &["api", "inspirations", id], None)
            .await
    }

    /// Ask the backend to (re)analyze a profile's sources.
    pub async fn analyze_profile(&self, id: &str) -> Result<GatewayReply, ClientError> {
        self.send::<()>(Method::POST, &["api", "inspirations", id, "analyze"], None)
            .await
    }

    /// Regenerate bead scripts for a document using its profile's style.
    pub async fn generate_scripts(&self, document_id: &str) -> Result<GatewayReply, ClientError> {
        let segments = ["api", "documents", document_id, "generate-scripts"];
        self.send::<()>(Method::POST, &segments, None).await
    }

    /// The gateway URL for `segments`, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::BaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<GatewayReply, ClientError> {
        let mut request = self.client.request(method, self.endpoint(segments)?);
        if let Some(id) = &self.request_id {
            request = request.header(X_REQUEST_ID, id);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(GatewayReply { status, body })
    }
}
