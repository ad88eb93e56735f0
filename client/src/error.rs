//! Errors produced by backend calls.

/// Errors produced by [`crate::ApiClient`] requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401. The stored token has already been cleared.
    #[error("not authenticated: {}", detail.as_deref().unwrap_or("please log in again"))]
    Unauthorized { detail: Option<String> },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The call needs a logged-in user and there is none.
    #[error("not logged in")]
    MissingToken,
}

impl ApiError {
    /// Backend-supplied detail text, if the error carried any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
