//! Results page: summary of a finished session.

#[cfg(test)]
#[path = "results_test.rs"]
mod results_test;

use game::summary::ResultsSummary;
use tracing::info;
use wire::SessionStats;

use crate::net::api::ApiClient;
use crate::pages::{PageError, Route};

#[derive(Debug, Clone)]
pub struct ResultsPage {
    stats: SessionStats,
    summary: ResultsSummary,
}

impl ResultsPage {
    /// Load the stats of `session_id` and derive the summary.
    ///
    /// # Errors
    ///
    /// [`PageError::Redirect`] home when there is no session to show;
    /// otherwise the stats request error.
    pub async fn load(api: &ApiClient, session_id: Option<&str>) -> Result<Self, PageError> {
        let session_id = session_id
            .filter(|id| !id.is_empty())
            .ok_or(PageError::Redirect(Route::Home))?;
        let stats = api.session_stats(session_id).await?;
        let summary = ResultsSummary::from_stats(&stats);
        info!(%session_id, solved = summary.solved, accuracy = summary.accuracy, "session results loaded");
        Ok(Self { stats, summary })
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn summary(&self) -> &ResultsSummary {
        &self.summary
    }
}
