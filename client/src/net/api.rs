//! HTTP client wrapper for the REST backend.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` is shared by every clone of [`ApiClient`]. The bearer
//! token lives in a [`TokenStore`] so login, logout and 401 handling all see
//! the same value.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any endpoint clears the token and bumps the login-required
//! counter before the error reaches the caller. Front-ends watch the counter
//! to send the user back to the login page. Non-success bodies of the form
//! `{"detail": ...}` are surfaced as [`ApiError::Status`] detail text.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};
use wire::ErrorBody;

use crate::config::ClientConfig;
use crate::error::ApiError;

// =============================================================================
// TOKEN STORE
// =============================================================================

/// Shared slot for the current bearer token.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(token.filter(|t| !t.is_empty()))) }
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = (!token.is_empty()).then_some(token);
    }

    /// Remove the token, returning whether one was present.
    pub fn clear(&self) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("set", &self.is_set())
            .finish()
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Cheaply cloneable handle to the backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    tokens: TokenStore,
    login_required: Arc<watch::Sender<u64>>,
}

impl ApiClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the base URL is not an absolute
    /// http(s) URL, or [`ApiError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base = config.api_base_url.trim_end_matches('/');
        let parsed = Url::parse(base).map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!("{base}: scheme must be http or https")));
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        let (login_required, _) = watch::channel(0);
        Ok(Self { http, base_url: Arc::from(base), tokens: TokenStore::default(), login_required: Arc::new(login_required) })
    }

    /// Attach an existing token (for example one passed on the command line).
    #[must_use]
    pub fn with_token(self, token: Option<String>) -> Self {
        if let Some(token) = token {
            self.tokens.set(token);
        }
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Receiver whose value increments every time a 401 forces a re-login.
    #[must_use]
    pub fn login_required(&self) -> watch::Receiver<u64> {
        self.login_required.subscribe()
    }

    /// How many times a 401 has forced a re-login on this client.
    #[must_use]
    pub fn login_required_count(&self) -> u64 {
        *self.login_required.borrow()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // -------------------------------------------------------------------------
    // verbs
    // -------------------------------------------------------------------------

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// POST with no body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path)).await
    }

    /// POST with query parameters and no body.
    pub(crate) async fn post_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).query(query)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_owned();
        let bytes = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            let had_token = self.tokens.clear();
            self.login_required.send_modify(|n| *n += 1);
            warn!(path = %url, had_token, "backend rejected credentials; login required");
            return Err(ApiError::Unauthorized { detail: error_detail(&bytes) });
        }
        if !status.is_success() {
            let detail = error_detail(&bytes);
            debug!(path = %url, status = status.as_u16(), ?detail, "backend returned error status");
            return Err(ApiError::Status { status: status.as_u16(), detail });
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("{url}: {e}")))
    }
}

/// Detail text from a `{"detail": ...}` error body, if the body has one.
fn error_detail(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(bytes)
        .map_or(None, |body| body.message())
}
