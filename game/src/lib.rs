//! Pure game logic for the Code Runner client.
//!
//! Nothing here touches the network, a clock, or a camera. The async `client`
//! crate feeds backend responses and timer ticks in, and reads display state
//! back out, which keeps every rule in this crate testable with plain values.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Question progression state machine ([`session::GameState`]) |
//! | [`hints`] | Hint-recommendation gating keyed per question |
//! | [`emotion`] | Emotion labels and the bounded local history |
//! | [`story`] | City restoration, XP sync ledger, level-up detection |
//! | [`summary`] | Results and analytics summaries for display |
//! | [`progress`] | Level arithmetic and time formatting |
//! | [`consts`] | Shared constants (topics, buildings, XP per level) |

pub mod consts;
pub mod emotion;
pub mod hints;
pub mod progress;
pub mod session;
pub mod story;
pub mod summary;
