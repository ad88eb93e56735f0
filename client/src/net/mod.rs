//! Networking modules for talking to the Code Runner backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`api::ApiClient`] owns transport concerns (base URL, bearer token, 401
//! handling, error bodies). Every other module adds typed calls for one
//! backend area as an `impl ApiClient` block, so a page needs only one
//! client handle.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod emotion;
pub mod questions;
pub mod session;
pub mod story;
