//! Account endpoints.

use wire::{AuthResponse, LoginRequest, RegisterRequest, User};

use super::api::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /api/auth/login`. Does not store the returned token; see
    /// [`crate::state::auth::AuthState`].
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        self.post("/api/auth/login", &body).await
    }

    /// `POST /api/auth/register`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn register(&self, email: &str, password: &str, username: &str) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            username: username.to_owned(),
        };
        self.post("/api/auth/register", &body).await
    }

    /// `GET /api/auth/me` with the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] without a request when no token is
    /// stored.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        if !self.tokens().is_set() {
            return Err(ApiError::MissingToken);
        }
        self.get("/api/auth/me").await
    }
}
