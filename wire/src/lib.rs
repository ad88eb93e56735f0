//! Shared REST DTOs for the Code Runner backend contract.
//!
//! This crate owns the JSON shapes exchanged with the backend. Both the
//! `client` services and the `game` state machine consume these types, so the
//! field names here are the wire names (camelCase where the backend uses it).
//!
//! DESIGN
//! ======
//! Question and story payloads are treated as opaque: optional fields default
//! instead of failing, so a backend that adds or drops a field never breaks
//! decoding on the client.

pub mod analytics;
pub mod auth;
pub mod emotion;
pub mod question;
pub mod session;
pub mod story;

pub use analytics::{
    AnalyticsUpdate, Leaderboard, LeaderboardEntry, Performance, SuccessResponse, UpdateXpRequest,
    UpdateXpResponse, UserAnalytics, UserInfo,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, User, UserPatch};
pub use emotion::{DetectEmotionRequest, DetectEmotionResponse, HintAction, HintRecommendation};
pub use question::{
    Difficulty, GenerateQuestionsRequest, Question, QuestionList, QuestionQuery, SubmitAnswerRequest,
    SubmitAnswerResponse,
};
pub use session::{CreateSessionResponse, EmotionData, EmotionSample, SessionStats};
pub use story::{Building, Chapter, RestoreBuildingQuery, RestoreBuildingResponse, StoryProgress};

use serde::{Deserialize, Serialize};

/// Error returned when parsing an enumerated wire value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The difficulty string is not one of `easy`, `medium`, `hard`.
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

/// Error body returned by the backend on non-2xx responses.
///
/// The backend emits `{"detail": "..."}` for handled errors and
/// `{"detail": [...]}` for request validation failures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail text, if the body carried any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .map(ToOwned::to_owned)
                    .collect();
                if parts.is_empty() { None } else { Some(parts.join("; ")) }
            }
            other => Some(other.to_string()),
        }
    }
}
