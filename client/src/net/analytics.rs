//! Analytics, XP and leaderboard endpoints.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use game::emotion::Emotion;
use wire::{
    AnalyticsUpdate, Leaderboard, LeaderboardEntry, SuccessResponse, UpdateXpRequest, UpdateXpResponse,
    UserAnalytics,
};

use super::api::ApiClient;
use crate::error::ApiError;

/// Rows requested for the leaderboard when the caller does not say.
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

impl ApiClient {
    /// `GET /api/analytics/{user_id}`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn user_analytics(&self, user_id: &str) -> Result<UserAnalytics, ApiError> {
        self.get(&format!("/api/analytics/{user_id}")).await
    }

    /// `POST /api/analytics/update` for one attempt.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn update_analytics(
        &self,
        user_id: &str,
        correct: bool,
        time_taken: f64,
        emotion: &Emotion,
    ) -> Result<SuccessResponse, ApiError> {
        let body = AnalyticsUpdate {
            user_id: user_id.to_owned(),
            correct,
            time_taken,
            emotion: emotion.label().to_owned(),
        };
        self.post("/api/analytics/update", &body).await
    }

    /// `POST /api/user/update-xp`. `xp_to_add` is a delta, not a total.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn update_xp(&self, user_id: &str, xp_to_add: u64) -> Result<UpdateXpResponse, ApiError> {
        let body = UpdateXpRequest { user_id: user_id.to_owned(), xp_to_add };
        self.post("/api/user/update-xp", &body).await
    }

    /// `GET /api/leaderboard?limit=N`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let board: Leaderboard = self.get_query("/api/leaderboard", &[("limit", limit)]).await?;
        Ok(board.leaderboard)
    }
}
