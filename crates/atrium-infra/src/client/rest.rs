//! Upstream REST client.
//!
//! One `reqwest` client serves every resource. All responses are decoded
//! through the shared [`Envelope`] and surfaced as [`ApiResult`]; transport
//! failures are folded into the same structured error shape so handlers
//! never deal with raw client errors.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use atrium_core::SessionToken;
use atrium_core::ports::{AuthClient, ResourceClient, SessionStore};
use atrium_shared::dto::{LoginRequest, SessionResponse};
use atrium_shared::{ApiError, ApiResult, Envelope};

/// Connection settings for the upstream backend.
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Base URL of the backend API, e.g. `http://localhost:9000/api/`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000/api/".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Error constructing the client.
#[derive(Debug, thiserror::Error)]
pub enum RestClientError {
    #[error("invalid base url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("building http client failed: {0}")]
    Http(String),
}

/// Shared HTTP client carrying the injected session context.
///
/// The current token is read from the [`SessionStore`] on every request and
/// attached as a bearer credential when present.
pub struct RestClient {
    http: reqwest::Client,
    base: Url,
    sessions: Arc<dyn SessionStore>,
}

impl RestClient {
    pub fn new(
        config: RestClientConfig,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, RestClientError> {
        // Url::join treats a base without a trailing slash as a file and
        // would drop its last segment.
        let normalized = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base = Url::parse(&normalized).map_err(|e| RestClientError::BaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RestClientError::Http(e.to_string()))?;
        Ok(Self {
            http,
            base,
            sessions,
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::transport(format!("invalid endpoint {path:?}: {e}")))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.sessions.get();
        if token.is_present() {
            req.bearer_auth(token.as_str())
        } else {
            req
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status().as_u16();
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::transport(format!("decoding response failed: {e}")).with_status(status))?;
        envelope.into_result().map_err(|e| e.with_status(status))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET upstream");
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("request failed: {e}")))?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST upstream");
        let response = self
            .authorize(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("request failed: {e}")))?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AuthClient for RestClient {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<SessionResponse> {
        self.post_json("auth/login", credentials).await
    }

    async fn logout(&self, token: &SessionToken) -> ApiResult<()> {
        let url = self.endpoint("auth/logout")?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("request failed: {e}")))?;
        // Logout carries no payload; any 2xx means the backend dropped the
        // token.
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::transport(format!("decoding response failed: {e}")))?;
        envelope
            .into_result()
            .map(|_| ())
            .map_err(|e| e.with_status(status.as_u16()))
    }
}

/// Typed handle for one backend resource collection.
///
/// Binding the collection path once keeps every resource on the same
/// `list_all`/`get_one` contract without per-entity client code.
pub struct RestResource<T> {
    client: Arc<RestClient>,
    path: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> RestResource<T> {
    pub fn new(client: Arc<RestClient>, path: &'static str) -> Self {
        Self {
            client,
            path,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T> ResourceClient<T> for RestResource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn list_all(&self) -> ApiResult<Vec<T>> {
        self.client.get_json(self.path).await
    }

    async fn get_one(&self, id: &str) -> ApiResult<T> {
        self.client.get_json(&format!("{}/{}", self.path, id)).await
    }
}
