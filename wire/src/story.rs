//! Narrative and city-restoration payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A story chapter from `GET /api/story/chapter/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: String,
    /// Building ids restored over the course of this chapter, in order.
    #[serde(default)]
    pub buildings: Vec<String>,
    #[serde(default)]
    pub required_xp: u64,
    #[serde(default)]
    pub questions_to_complete: u32,
}

/// A city building and its restoration flavor text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub restoration_text: String,
}

/// Per-user progress from `GET /api/story/progress/{user_id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryProgress {
    pub current_chapter: u32,
    #[serde(default)]
    pub chapter_data: Option<Chapter>,
    #[serde(default)]
    pub completed_chapters: Vec<u32>,
    #[serde(default)]
    pub city_buildings_restored: Vec<String>,
    #[serde(default)]
    pub buildings_data: BTreeMap<String, Building>,
}

impl StoryProgress {
    #[must_use]
    pub fn is_restored(&self, building_id: &str) -> bool {
        self.city_buildings_restored.iter().any(|b| b == building_id)
    }
}

/// Query string for `POST /api/story/restore-building`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreBuildingQuery {
    pub user_id: String,
    pub building_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreBuildingResponse {
    #[serde(default)]
    pub success: bool,
    pub building: Building,
    /// Percentage of the whole city restored, 0-100.
    #[serde(default)]
    pub restoration_progress: u32,
}
