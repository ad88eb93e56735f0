//! Analytics, XP and leaderboard payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of `GET /api/analytics/{user_id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAnalytics {
    pub user_info: UserInfo,
    pub performance: Performance,
    /// Emotion label to number of recorded attempts.
    #[serde(default)]
    pub emotion_analysis: BTreeMap<String, u64>,
    /// Free-form per-difficulty breakdown; the backend does not fix its shape.
    #[serde(default)]
    pub difficulty_performance: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub current_level: u32,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub city_restoration: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default)]
    pub total_questions_attempted: u64,
    #[serde(default)]
    pub total_questions_solved: u64,
    /// Percentage, already rounded by the backend.
    #[serde(default)]
    pub accuracy: f64,
    /// Seconds.
    #[serde(default)]
    pub total_time_spent: f64,
    /// Seconds.
    #[serde(default)]
    pub average_time_per_question: f64,
}

/// Body for `POST /api/analytics/update`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsUpdate {
    pub user_id: String,
    pub correct: bool,
    /// Seconds.
    pub time_taken: f64,
    pub emotion: String,
}

/// Body for `POST /api/user/update-xp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateXpRequest {
    pub user_id: String,
    pub xp_to_add: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateXpResponse {
    #[serde(default)]
    pub success: bool,
    pub total_xp: u64,
    pub current_level: u32,
}

/// Response of `GET /api/leaderboard`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub city_restoration: u32,
}

/// Generic `{"success": true}` acknowledgement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}
