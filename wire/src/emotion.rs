//! Emotion detection payloads and adaptive hint recommendations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body for `POST /api/detect-emotion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectEmotionRequest {
    /// Frame encoded as a `data:image/jpeg;base64,...` URL.
    pub image: String,
    pub question_id: String,
    /// Seconds of detection elapsed on this question.
    pub time_spent: f64,
    pub session_id: String,
}

/// Classification result for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectEmotionResponse {
    pub emotion: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub raw_emotions: BTreeMap<String, f64>,
    #[serde(default)]
    pub hint_recommendation: Option<HintRecommendation>,
}

impl DetectEmotionResponse {
    /// The recommendation, if one is present and actionable.
    #[must_use]
    pub fn actionable_hint(&self) -> Option<&HintRecommendation> {
        self.hint_recommendation
            .as_ref()
            .filter(|hint| hint.action != HintAction::None)
    }
}

/// What the backend suggests doing in response to a detected emotion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HintAction {
    ProvideHint,
    BonusChallenge,
    Encouragement,
    #[default]
    None,
    /// Action label this client does not know; kept verbatim.
    Other(String),
}

impl HintAction {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ProvideHint => "provide_hint",
            Self::BonusChallenge => "bonus_challenge",
            Self::Encouragement => "encouragement",
            Self::None => "none",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for HintAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "provide_hint" => Self::ProvideHint,
            "bonus_challenge" => Self::BonusChallenge,
            "encouragement" => Self::Encouragement,
            "none" | "" => Self::None,
            _ => Self::Other(value),
        }
    }
}

impl From<HintAction> for String {
    fn from(value: HintAction) -> Self {
        value.as_str().to_owned()
    }
}

/// Adaptive action embedded in a detection response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRecommendation {
    #[serde(default)]
    pub action: HintAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_mistakes: Vec<String>,
    /// Bonus challenge text for `bonus_challenge` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_bonus: Option<u32>,
}
