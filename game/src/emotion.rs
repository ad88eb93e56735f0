//! Emotion labels and the client-local rolling history.
//!
//! The history is display-only; the backend keeps the authoritative record
//! and computes analytics from it.

#[cfg(test)]
#[path = "emotion_test.rs"]
mod emotion_test;

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::EMOTION_HISTORY_CAPACITY;

/// Game-level emotion as reported by the detection endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Happy,
    Bored,
    Frustrated,
    Confused,
    #[default]
    Focused,
    Sad,
    /// A label this client does not know.
    Other(String),
}

impl Emotion {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Happy => "happy",
            Self::Bored => "bored",
            Self::Frustrated => "frustrated",
            Self::Confused => "confused",
            Self::Focused => "focused",
            Self::Sad => "sad",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Bored => "😐",
            Self::Frustrated => "😤",
            Self::Confused => "😕",
            Self::Focused => "🎯",
            Self::Sad => "😢",
            Self::Other(_) => "❔",
        }
    }
}

impl From<&str> for Emotion {
    fn from(value: &str) -> Self {
        match value {
            "happy" => Self::Happy,
            "bored" => Self::Bored,
            "frustrated" => Self::Frustrated,
            "confused" => Self::Confused,
            "focused" => Self::Focused,
            "sad" => Self::Sad,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Emotion {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Emotion> for String {
    fn from(value: Emotion) -> Self {
        value.label().to_owned()
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub emotion: Emotion,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// Bounded history of detected emotions, oldest first.
#[derive(Clone, Debug)]
pub struct EmotionHistory {
    records: VecDeque<EmotionRecord>,
    capacity: usize,
}

impl Default for EmotionHistory {
    fn default() -> Self {
        Self::with_capacity(EMOTION_HISTORY_CAPACITY)
    }
}

impl EmotionHistory {
    /// A history holding at most `capacity` records (minimum one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { records: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a record, evicting the oldest once full.
    pub fn push(&mut self, emotion: Emotion, timestamp_ms: i64) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(EmotionRecord { emotion, timestamp_ms });
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmotionRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
