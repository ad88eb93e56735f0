//! Async client runtime for Code Runner.
//!
//! This crate talks to the REST backend and owns every piece of work that
//! waits on something: HTTP calls, the camera, and the timers that drive
//! emotion detection and stats refresh. Game rules live in the `game` crate;
//! page controllers here feed backend results into them and expose the
//! resulting display state to a front-end (the `cli` binary).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`net`] | [`net::api::ApiClient`] plus typed service calls per backend area |
//! | [`webcam`] | Camera acquisition and release behind the [`webcam::MediaDevices`] seam |
//! | [`detection`] | Periodic emotion detection task and its shared state |
//! | [`state`] | Auth state shared across pages |
//! | [`pages`] | Page controllers: Login, Home, Game, Results, Analytics |
//! | [`tasks`] | Abort-on-drop ownership of background tasks |
//! | [`config`] | Environment-driven client configuration |
//! | [`error`] | Error types for the HTTP layer |

pub mod config;
pub mod detection;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod tasks;
pub mod webcam;

#[cfg(test)]
pub(crate) mod test_backend;

pub use config::ClientConfig;
pub use error::ApiError;
pub use net::api::ApiClient;
