//! Auth endpoint payloads and the user record.

use std::fmt;

use serde::{Deserialize, Serialize};

fn default_level() -> u32 {
    1
}

/// The authenticated user as returned by `/api/auth/me` and the login routes.
///
/// Login and register responses carry a subset of fields; the rest default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default = "default_level")]
    pub current_level: u32,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub city_restoration_progress: u32,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl User {
    /// Merge a partial update into this user, leaving absent fields untouched.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(total_xp) = patch.total_xp {
            self.total_xp = total_xp;
        }
        if let Some(level) = patch.current_level {
            self.current_level = level;
        }
        if let Some(progress) = patch.city_restoration_progress {
            self.city_restoration_progress = progress;
        }
    }
}

/// Partial user update applied locally after XP sync or building restoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub total_xp: Option<u64>,
    pub current_level: Option<u32>,
    pub city_restoration_progress: Option<u32>,
}

/// Body for `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body for `POST /api/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Token-issuing response shared by login and register.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("user", &self.user)
            .finish()
    }
}
