//! Question retrieval, generation and answer grading payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Question difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseError::UnknownDifficulty(s.to_owned())),
        }
    }
}

/// A coding question. Opaque to the client beyond display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: String,
    /// Problem statement.
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub example_input: String,
    #[serde(default)]
    pub example_output: String,
    #[serde(default)]
    pub hint_level_1: Option<String>,
    #[serde(default)]
    pub hint_level_2: Option<String>,
    #[serde(default)]
    pub hint_level_3: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub bonus_challenge: Option<String>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub time_complexity: Option<String>,
    #[serde(default)]
    pub space_complexity: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of both `GET /api/questions` and `POST /api/generate-questions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionList {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Query string for `GET /api/questions`. Absent filters are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuestionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body for `POST /api/generate-questions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub count: u32,
}

/// Body for `POST /api/submit-answer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub session_id: String,
    pub question_id: String,
    pub answer: String,
    /// Seconds spent on the question.
    pub time_taken: f64,
}

/// Grading result for a submitted answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    #[serde(default)]
    pub xp_earned: u64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub total_xp: Option<u64>,
    #[serde(default)]
    pub questions_solved: Option<u32>,
}
