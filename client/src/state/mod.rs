//! State shared across pages.

pub mod auth;
