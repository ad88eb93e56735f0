//! Analytics page: long-term performance and the leaderboard.
//!
//! Analytics and leaderboard are fetched concurrently; either failing fails
//! the page.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use game::summary::AnalyticsSummary;
use tracing::info;

use crate::net::analytics::DEFAULT_LEADERBOARD_LIMIT;
use crate::pages::{PageError, Route};
use crate::state::auth::AuthState;

#[derive(Debug, Clone)]
pub struct AnalyticsPage {
    summary: AnalyticsSummary,
}

impl AnalyticsPage {
    /// # Errors
    ///
    /// [`PageError::Redirect`] to login without a user; otherwise the first
    /// request error.
    pub async fn load(auth: &AuthState) -> Result<Self, PageError> {
        let user = auth.user().ok_or(PageError::Redirect(Route::Login))?;
        let api = auth.api();
        let (analytics, leaderboard) =
            tokio::join!(api.user_analytics(&user.id), api.leaderboard(DEFAULT_LEADERBOARD_LIMIT));
        let summary = AnalyticsSummary::new(&analytics?, leaderboard?);
        info!(user_id = %user.id, rows = summary.leaderboard.len(), "analytics loaded");
        Ok(Self { summary })
    }

    #[must_use]
    pub fn summary(&self) -> &AnalyticsSummary {
        &self.summary
    }
}
