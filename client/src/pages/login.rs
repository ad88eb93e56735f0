//! Login page: email + password, with a register mode.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use tracing::warn;

use crate::pages::Route;
use crate::state::auth::AuthState;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const AUTH_FAILED: &str = "Authentication failed";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{}", USERNAME_REQUIRED)]
    UsernameRequired,
    #[error("{0}")]
    Failed(String),
}

/// Form state for the login screen.
#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    pub username: String,
    error: Option<String>,
}

impl LoginPage {
    #[must_use]
    pub fn new(mode: LoginMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::Login => LoginMode::Register,
            LoginMode::Register => LoginMode::Login,
        };
        self.error = None;
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form. On success the user is stored in `auth` and the
    /// front-end should go to [`Route::Home`].
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure, also kept in [`LoginPage::error`].
    pub async fn submit(&mut self, auth: &mut AuthState) -> Result<Route, LoginError> {
        self.error = None;
        let username = self.username.trim().to_owned();
        if self.mode == LoginMode::Register && username.is_empty() {
            self.error = Some(USERNAME_REQUIRED.to_owned());
            return Err(LoginError::UsernameRequired);
        }

        let result = match self.mode {
            LoginMode::Login => auth.login(self.email.trim(), &self.password).await.map(|_| ()),
            LoginMode::Register => auth
                .register(self.email.trim(), &self.password, &username)
                .await
                .map(|_| ()),
        };

        match result {
            Ok(()) => Ok(Route::Home),
            Err(e) => {
                warn!(error = %e, mode = ?self.mode, "authentication failed");
                let message = e.detail().unwrap_or(AUTH_FAILED).to_owned();
                self.error = Some(message.clone());
                Err(LoginError::Failed(message))
            }
        }
    }
}
