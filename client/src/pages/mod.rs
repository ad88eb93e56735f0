//! Page controllers for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it loads what the screen needs,
//! holds the screen's state, and turns user actions into backend calls. How
//! the state is shown is left to the front-end.
//!
//! Pages that need a user or a session refuse to load without one and name
//! the route to go to instead ([`PageError::Redirect`]).

pub mod analytics;
pub mod game;
pub mod home;
pub mod login;
pub mod results;

use std::fmt;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Game,
    Results,
    Analytics,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/",
            Self::Game => "/game",
            Self::Results => "/results",
            Self::Analytics => "/analytics",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The page cannot be shown; go to this route instead.
    #[error("redirect to {0}")]
    Redirect(Route),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PageError {
    /// Where the front-end should go next, if anywhere.
    #[must_use]
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Redirect(route) => Some(*route),
            Self::Api(e) if e.is_unauthorized() => Some(Route::Login),
            Self::Api(_) => None,
        }
    }
}
