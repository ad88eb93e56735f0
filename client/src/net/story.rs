//! Story and city restoration endpoints.

#[cfg(test)]
#[path = "story_test.rs"]
mod story_test;

use wire::{Chapter, RestoreBuildingQuery, RestoreBuildingResponse, StoryProgress};

use super::api::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /api/story/progress/{user_id}`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn story_progress(&self, user_id: &str) -> Result<StoryProgress, ApiError> {
        self.get(&format!("/api/story/progress/{user_id}")).await
    }

    /// `GET /api/story/chapter/{chapter_id}`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn story_chapter(&self, chapter_id: u32) -> Result<Chapter, ApiError> {
        self.get(&format!("/api/story/chapter/{chapter_id}")).await
    }

    /// `POST /api/story/restore-building?user_id=..&building_id=..` with no body.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn restore_building(&self, user_id: &str, building_id: &str) -> Result<RestoreBuildingResponse, ApiError> {
        let query = RestoreBuildingQuery { user_id: user_id.to_owned(), building_id: building_id.to_owned() };
        self.post_query("/api/story/restore-building", &query).await
    }
}
