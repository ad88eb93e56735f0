//! Periodic emotion detection.
//!
//! DESIGN
//! ======
//! One task per active question. Every interval it grabs a frame from the
//! camera stream, posts it with the elapsed detection time, and hands the
//! result to a handler. Elapsed time is read off the clock and floored to a
//! whole number of intervals, so skipped ticks still count. The request is awaited inside the loop, so at most
//! one is in flight; ticks that come due while a request is outstanding are
//! skipped, not queued.
//!
//! [`Detection`] owns the task. Stopping or dropping it aborts the loop,
//! including any request still waiting on the backend.
//!
//! Recommendations are kept together with the question they were detected
//! on. A result for the previous question that lands after a restart is
//! never shown against the new one.
//!
//! ERROR HANDLING
//! ==============
//! No frame yet, capture errors and failed requests are logged and the tick
//! is skipped. Detection never stops on its own.

#[cfg(test)]
#[path = "detection_test.rs"]
mod detection_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use game::emotion::{Emotion, EmotionHistory};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use wire::{DetectEmotionRequest, DetectEmotionResponse, HintRecommendation};

use crate::error::ApiError;
use crate::webcam::MediaStream;

/// Backend seam for frame classification.
#[async_trait::async_trait]
pub trait EmotionDetector: Send + Sync {
    async fn detect(&self, request: DetectEmotionRequest) -> Result<DetectEmotionResponse, ApiError>;
}

/// What a detection task needs to label its requests.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionParams {
    pub session_id: String,
    pub question_id: String,
    pub interval: Duration,
}

/// Handle to a running detection task.
#[derive(Debug)]
pub struct Detection {
    handle: Option<JoinHandle<()>>,
    question_id: String,
}

/// Detection time for a request sent `elapsed` after start: whole intervals only.
fn floored_elapsed(elapsed: Duration, period: Duration) -> f64 {
    let ticks = elapsed.as_nanos() / period.as_nanos().max(1);
    period.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX)).as_secs_f64()
}

impl Detection {
    /// Start polling `source` every `params.interval`.
    ///
    /// The first request goes out one interval after start.
    pub fn spawn<H>(
        detector: Arc<dyn EmotionDetector>,
        source: Arc<dyn MediaStream>,
        params: DetectionParams,
        mut on_result: H,
    ) -> Self
    where
        H: FnMut(DetectEmotionResponse) + Send + 'static,
    {
        let question_id = params.question_id.clone();
        info!(question_id = %params.question_id, interval_ms = params.interval.as_millis(), "emotion detection started");
        let handle = tokio::spawn(async move {
            let period = params.interval;
            let started = Instant::now();
            let mut ticker = tokio::time::interval_at(started + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let time_spent = floored_elapsed(started.elapsed(), period);

                let frame = match source.capture_frame() {
                    Ok(Some(frame)) => frame,
                    Ok(None) => {
                        debug!(question_id = %params.question_id, "no frame ready; skipping tick");
                        continue;
                    }
                    Err(e) => {
                        warn!(question_id = %params.question_id, error = %e, "frame capture failed");
                        continue;
                    }
                };

                let request = DetectEmotionRequest {
                    image: frame.to_data_url(),
                    question_id: params.question_id.clone(),
                    time_spent,
                    session_id: params.session_id.clone(),
                };
                match detector.detect(request).await {
                    Ok(result) => on_result(result),
                    Err(e) => warn!(question_id = %params.question_id, error = %e, "emotion detection failed"),
                }
            }
        });
        Self { handle: Some(handle), question_id }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!(question_id = %self.question_id, "emotion detection stopped");
        }
    }
}

impl Drop for Detection {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// SHARED STATE
// =============================================================================

/// Latest detection results, shared between the task and the page.
#[derive(Debug, Clone, Default)]
pub struct DetectionState {
    current: Emotion,
    last_result: Option<DetectEmotionResponse>,
    recommendation: Option<(String, HintRecommendation)>,
    history: EmotionHistory,
}

impl DetectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detection result taken while `question_id` was active.
    pub fn apply(&mut self, question_id: &str, result: DetectEmotionResponse, timestamp_ms: i64) {
        let emotion = Emotion::from(result.emotion.as_str());
        self.history.push(emotion.clone(), timestamp_ms);
        self.current = emotion;
        if let Some(hint) = result.actionable_hint() {
            self.recommendation = Some((question_id.to_owned(), hint.clone()));
        }
        self.last_result = Some(result);
    }

    #[must_use]
    pub fn current_emotion(&self) -> &Emotion {
        &self.current
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&DetectEmotionResponse> {
        self.last_result.as_ref()
    }

    /// Latest recommendation, if it was detected on `question_id`.
    #[must_use]
    pub fn recommendation_for(&self, question_id: &str) -> Option<&HintRecommendation> {
        self.recommendation
            .as_ref()
            .filter(|(source, _)| source == question_id)
            .map(|(_, hint)| hint)
    }

    pub fn clear_recommendation(&mut self) {
        self.recommendation = None;
    }

    #[must_use]
    pub fn history(&self) -> &EmotionHistory {
        &self.history
    }
}

/// [`DetectionState`] behind a mutex, cloneable into a detection handler.
#[derive(Debug, Clone, Default)]
pub struct SharedDetection(Arc<Mutex<DetectionState>>);

impl SharedDetection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the state locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut DetectionState) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Handler that records results for `question_id`, stamped with wall time.
    pub fn handler(&self, question_id: &str) -> impl FnMut(DetectEmotionResponse) + Send + 'static {
        let shared = self.clone();
        let question_id = question_id.to_owned();
        move |result| shared.with(|state| state.apply(&question_id, result, now_ms()))
    }

    #[must_use]
    pub fn current_emotion(&self) -> Emotion {
        self.with(|s| s.current_emotion().clone())
    }

    #[must_use]
    pub fn recommendation_for(&self, question_id: &str) -> Option<HintRecommendation> {
        self.with(|s| s.recommendation_for(question_id).cloned())
    }

    pub fn clear_recommendation(&self) {
        self.with(DetectionState::clear_recommendation);
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
