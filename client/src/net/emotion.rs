//! Emotion detection endpoint.

#[cfg(test)]
#[path = "emotion_test.rs"]
mod emotion_test;

use wire::{DetectEmotionRequest, DetectEmotionResponse};

use super::api::ApiClient;
use crate::detection::EmotionDetector;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /api/detect-emotion`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn detect_emotion(&self, request: &DetectEmotionRequest) -> Result<DetectEmotionResponse, ApiError> {
        self.post("/api/detect-emotion", request).await
    }
}

#[async_trait::async_trait]
impl EmotionDetector for ApiClient {
    async fn detect(&self, request: DetectEmotionRequest) -> Result<DetectEmotionResponse, ApiError> {
        self.detect_emotion(&request).await
    }
}
