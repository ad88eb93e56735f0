//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page controllers read the user from here to guard routes and to address
//! user-scoped endpoints. The bearer token itself lives in the client's
//! [`crate::net::api::TokenStore`]; this struct keeps the decoded user next
//! to it so pages never re-fetch `/api/auth/me`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use tracing::{info, warn};
use wire::{AuthResponse, User, UserPatch};

use crate::error::ApiError;
use crate::net::api::ApiClient;

/// Current user and loading status.
#[derive(Debug, Clone)]
pub struct AuthState {
    api: ApiClient,
    user: Option<User>,
    loading: bool,
}

impl AuthState {
    /// Fresh state; `loading` until [`AuthState::init`] runs.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, user: None, loading: true }
    }

    /// Resolve the stored token into a user. A rejected or unreachable token
    /// is dropped and the state ends up logged out.
    pub async fn init(&mut self) {
        if self.api.tokens().is_set() {
            match self.api.current_user().await {
                Ok(user) => {
                    info!(user_id = %user.id, "session restored");
                    self.user = Some(user);
                }
                Err(e) => {
                    warn!(error = %e, "auth initialization failed");
                    self.api.tokens().clear();
                    self.user = None;
                }
            }
        }
        self.loading = false;
    }

    /// Log in and store the token.
    ///
    /// # Errors
    ///
    /// Propagates the backend error; state is unchanged on failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, ApiError> {
        let response = self.api.login(email, password).await?;
        Ok(self.accept(response))
    }

    /// Create an account and store the token.
    ///
    /// # Errors
    ///
    /// Propagates the backend error; state is unchanged on failure.
    pub async fn register(&mut self, email: &str, password: &str, username: &str) -> Result<&User, ApiError> {
        let response = self.api.register(email, password, username).await?;
        Ok(self.accept(response))
    }

    pub fn logout(&mut self) {
        self.api.tokens().clear();
        self.user = None;
        info!("logged out");
    }

    /// Merge partial fields into the current user. No-op when logged out.
    pub fn update_user(&mut self, patch: UserPatch) {
        if let Some(user) = self.user.as_mut() {
            user.apply(patch);
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.api.tokens().get()
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Drop the user if a 401 has cleared the token since the last check.
    pub fn sync_with_token(&mut self) {
        if !self.api.tokens().is_set() && self.user.take().is_some() {
            warn!("token cleared by backend; user logged out");
        }
    }

    fn accept(&mut self, response: AuthResponse) -> &User {
        self.api.tokens().set(response.access_token);
        self.loading = false;
        info!(user_id = %response.user.id, "authenticated");
        self.user.insert(response.user)
    }
}
