//! Play-session endpoints: create, grade, stats.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use wire::{CreateSessionResponse, SessionStats, SubmitAnswerRequest, SubmitAnswerResponse};

use super::api::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /api/session/create`. Returns the new session id.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn create_session(&self) -> Result<String, ApiError> {
        let response: CreateSessionResponse = self.post_empty("/api/session/create").await?;
        Ok(response.session_id)
    }

    /// `GET /api/session/{id}/stats`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn session_stats(&self, session_id: &str) -> Result<SessionStats, ApiError> {
        self.get(&format!("/api/session/{session_id}/stats")).await
    }

    /// `POST /api/submit-answer`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn submit_answer(&self, request: &SubmitAnswerRequest) -> Result<SubmitAnswerResponse, ApiError> {
        self.post("/api/submit-answer", request).await
    }
}
