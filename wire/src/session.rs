//! Play-session payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of `POST /api/session/create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/session/{id}/stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    #[serde(rename = "sessionId", default)]
    pub session_id: String,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub questions_solved: u32,
    #[serde(default)]
    pub questions_attempted: u32,
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub emotion_data: EmotionData,
}

/// Emotion checks recorded server-side for a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionData {
    #[serde(default)]
    pub total_checks: u32,
    /// The most recent checks (the backend caps this at ten).
    #[serde(default)]
    pub recent_emotions: Vec<EmotionSample>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionSample {
    pub emotion: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub dominant: Option<String>,
    #[serde(default)]
    pub raw_emotions: BTreeMap<String, f64>,
}
