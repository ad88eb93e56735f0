//! Game page: one play session from first question to completion.
//!
//! DESIGN
//! ======
//! The page owns everything that runs while a game is on screen: the session
//! id, the [`GameState`] machine, the hint gate, the camera, the detection
//! task and the periodic stats refresh. Each submit runs the follow-ups of a
//! solve in order: analytics update, XP sync, then city restoration when it
//! is due. Level-ups and restored buildings are queued as [`Notice`]s for the
//! front-end to drain.
//!
//! ERROR HANDLING
//! ==============
//! Only session creation and the initial question load fail the page. After
//! that every backend failure is logged and absorbed. A failed submit shows
//! retryable feedback; a failed XP sync is retried on the next solve.
//!
//! Stopping or dropping the page aborts every task it started and releases
//! the camera.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use std::sync::{Arc, Mutex, PoisonError};

use game::emotion::Emotion;
use game::hints::HintGate;
use game::progress::level_for_xp;
use game::session::{Advance, GameState, SolvedEvent, SubmitError};
use game::story::{CityView, RestorationTracker, XpLedger, level_up};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use wire::{Building, HintRecommendation, SessionStats, StoryProgress, SubmitAnswerRequest, UserPatch};

use crate::config::ClientConfig;
use crate::detection::{Detection, DetectionParams, EmotionDetector, SharedDetection};
use crate::net::api::ApiClient;
use crate::net::questions::QuestionService;
use crate::pages::home::GameParams;
use crate::pages::{PageError, Route};
use crate::state::auth::AuthState;
use crate::tasks::TaskSet;
use crate::webcam::{CameraError, MediaDevices, Webcam};

/// Something the player should be told about once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BuildingRestored { building_id: String, building: Building },
    LevelUp(u32),
}

pub struct GamePage {
    api: ApiClient,
    config: ClientConfig,
    user_id: String,
    session_id: String,
    state: GameState,
    hints: HintGate,
    detection: SharedDetection,
    detector: Option<Detection>,
    webcam: Option<Webcam>,
    story: Option<StoryProgress>,
    restoration: RestorationTracker,
    ledger: XpLedger,
    stats: Arc<Mutex<Option<SessionStats>>>,
    tasks: TaskSet,
    notices: Vec<Notice>,
}

impl GamePage {
    /// Create a session, load the questions and start the stats refresh.
    ///
    /// # Errors
    ///
    /// [`PageError::Redirect`] to login without a user; otherwise the
    /// session or question error.
    pub async fn start(
        auth: &AuthState,
        config: &ClientConfig,
        questions: &mut QuestionService,
        params: &GameParams,
    ) -> Result<Self, PageError> {
        let user_id = auth.user().map(|u| u.id.clone()).ok_or(PageError::Redirect(Route::Login))?;
        let api = auth.api().clone();

        let session_id = api.create_session().await?;
        info!(%session_id, topic = %params.topic, difficulty = %params.difficulty, "game session created");

        let loaded = questions
            .load_questions(&params.topic, params.difficulty, config.question_count)
            .await?;
        let mut state = GameState::new();
        state.load(loaded);

        let story = match api.story_progress(&user_id).await {
            Ok(progress) => Some(progress),
            Err(e) => {
                warn!(error = %e, "failed to load story; restoration disabled");
                None
            }
        };

        let mut hints = HintGate::new();
        hints.set_question(state.current_question().map(|q| q.id.as_str()));

        let mut page = Self {
            api,
            config: config.clone(),
            user_id,
            session_id,
            state,
            hints,
            detection: SharedDetection::new(),
            detector: None,
            webcam: None,
            story,
            restoration: RestorationTracker::new(),
            ledger: XpLedger::new(),
            stats: Arc::new(Mutex::new(None)),
            tasks: TaskSet::new(),
            notices: Vec::new(),
        };
        page.spawn_stats_refresh();
        Ok(page)
    }

    fn spawn_stats_refresh(&mut self) {
        let api = self.api.clone();
        let session_id = self.session_id.clone();
        let slot = Arc::clone(&self.stats);
        let period = self.config.stats_refresh;
        self.tasks.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match api.session_stats(&session_id).await {
                    Ok(stats) => *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(stats),
                    Err(e) => warn!(%session_id, error = %e, "stats refresh failed"),
                }
            }
        });
    }

    // =========================================================================
    // CAMERA AND DETECTION
    // =========================================================================

    /// Open the camera and start detecting on the current question.
    ///
    /// # Errors
    ///
    /// The device error. The game goes on without detection and
    /// [`GamePage::webcam_error`] holds the message to show.
    pub async fn attach_camera(&mut self, devices: Arc<dyn MediaDevices>) -> Result<(), CameraError> {
        let mut webcam = Webcam::new(devices);
        let started = webcam.start().await;
        self.webcam = Some(webcam);
        started?;
        self.restart_detection();
        Ok(())
    }

    fn restart_detection(&mut self) {
        if let Some(mut old) = self.detector.take() {
            old.stop();
        }
        let Some(source) = self.webcam.as_ref().and_then(Webcam::source) else {
            return;
        };
        let Some(question) = self.state.current_question() else {
            return;
        };
        let handler = self.detection.handler(&question.id);
        let params = DetectionParams {
            session_id: self.session_id.clone(),
            question_id: question.id.clone(),
            interval: self.config.emotion_interval,
        };
        let detector: Arc<dyn EmotionDetector> = Arc::new(self.api.clone());
        self.detector = Some(Detection::spawn(detector, source, params, handler));
    }

    #[must_use]
    pub fn webcam_error(&self) -> Option<&str> {
        self.webcam.as_ref().and_then(Webcam::error)
    }

    #[must_use]
    pub fn is_detecting(&self) -> bool {
        self.detector.as_ref().is_some_and(Detection::is_running)
    }

    #[must_use]
    pub fn detection(&self) -> &SharedDetection {
        &self.detection
    }

    #[must_use]
    pub fn current_emotion(&self) -> Emotion {
        self.detection.current_emotion()
    }

    // =========================================================================
    // BOARD
    // =========================================================================

    /// One-second timer tick.
    pub fn tick(&mut self) {
        self.state.tick();
    }

    /// Grade an answer and run the follow-ups of a solve.
    ///
    /// # Errors
    ///
    /// Refused before reaching the backend (blank answer, nothing active, or
    /// feedback already showing). Backend failures are shown as feedback.
    pub async fn submit(&mut self, answer: &str, auth: &mut AuthState) -> Result<(), SubmitError> {
        let ticket = self.state.begin_submit(answer)?;
        let request = SubmitAnswerRequest {
            session_id: self.session_id.clone(),
            question_id: ticket.question_id.clone(),
            answer: ticket.answer.clone(),
            time_taken: ticket.time_taken,
        };

        match self.api.submit_answer(&request).await {
            Ok(response) => {
                info!(question_id = %ticket.question_id, correct = response.correct, xp = response.xp_earned, "answer graded");
                if let Some(event) = self.state.apply_result(&ticket, &response) {
                    self.on_solved(&event, auth).await;
                }
            }
            Err(e) => {
                warn!(question_id = %ticket.question_id, error = %e, "submit failed");
                self.state.apply_failure(&ticket);
                auth.sync_with_token();
            }
        }
        Ok(())
    }

    async fn on_solved(&mut self, event: &SolvedEvent, auth: &mut AuthState) {
        let emotion = self.detection.current_emotion();
        if let Err(e) = self
            .api
            .update_analytics(&self.user_id, event.correct, event.time_taken, &emotion)
            .await
        {
            warn!(question_id = %event.question_id, error = %e, "analytics update failed");
        }
        self.sync_xp(auth).await;
        self.restore_if_due(auth).await;
    }

    async fn sync_xp(&mut self, auth: &mut AuthState) {
        let session_xp = self.state.xp();
        let Some(delta) = self.ledger.pending(session_xp) else {
            return;
        };
        match self.api.update_xp(&self.user_id, delta).await {
            Ok(response) => {
                self.ledger.mark_synced(session_xp);
                let stored_level = auth.user().map_or(1, |u| u.current_level);
                if let Some(level) = level_up(response.total_xp, stored_level) {
                    info!(level, "level up");
                    self.notices.push(Notice::LevelUp(level));
                }
                auth.update_user(UserPatch {
                    total_xp: Some(response.total_xp),
                    current_level: Some(response.current_level.max(level_for_xp(response.total_xp))),
                    ..UserPatch::default()
                });
            }
            Err(e) => warn!(delta, error = %e, "xp sync failed; will retry on next solve"),
        }
    }

    async fn restore_if_due(&mut self, auth: &mut AuthState) {
        let Some(story) = self.story.as_ref() else {
            return;
        };
        let Some(building_id) = self.restoration.due(self.state.solved(), story).map(ToOwned::to_owned) else {
            return;
        };

        match self.api.restore_building(&self.user_id, &building_id).await {
            Ok(response) => {
                info!(%building_id, progress = response.restoration_progress, "building restored");
                auth.update_user(UserPatch {
                    city_restoration_progress: Some(response.restoration_progress),
                    ..UserPatch::default()
                });
                self.notices.push(Notice::BuildingRestored { building_id, building: response.building });
                match self.api.story_progress(&self.user_id).await {
                    Ok(progress) => self.story = Some(progress),
                    Err(e) => warn!(error = %e, "story refresh failed"),
                }
            }
            Err(e) => warn!(%building_id, error = %e, "building restoration failed"),
        }
    }

    /// Clear incorrect feedback and answer the same question again.
    pub fn retry(&mut self) -> bool {
        self.state.retry()
    }

    /// Move on. A new question resets the hint gate and restarts detection.
    pub fn next(&mut self) -> Advance {
        let advance = self.state.next();
        match advance {
            Advance::Moved(_) => {
                self.hints.set_question(self.state.current_question().map(|q| q.id.as_str()));
                self.detection.clear_recommendation();
                self.restart_detection();
            }
            Advance::Completed => {
                info!(session_id = %self.session_id, solved = self.state.solved(), "all questions complete");
                if let Some(mut detector) = self.detector.take() {
                    detector.stop();
                }
                self.hints.set_question(None);
            }
            Advance::Stayed => {}
        }
        advance
    }

    // =========================================================================
    // HINTS
    // =========================================================================

    /// Offer the latest detection recommendation to the gate and return what
    /// should be on screen. Recommendations detected on another question are
    /// ignored.
    pub fn poll_hint(&mut self) -> Option<&HintRecommendation> {
        let recommendation = self
            .state
            .current_question()
            .and_then(|q| self.detection.recommendation_for(&q.id));
        if let Some(recommendation) = recommendation {
            self.hints.offer(&recommendation);
        }
        self.hints.visible()
    }

    pub fn dismiss_hint(&mut self) {
        self.hints.dismiss();
    }

    /// Use the visible recommendation.
    pub fn accept_hint(&mut self) -> Option<HintRecommendation> {
        let accepted = self.hints.accept()?;
        self.detection.clear_recommendation();
        Some(accepted)
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Latest stats from the periodic refresh.
    #[must_use]
    pub fn stats(&self) -> Option<SessionStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn story(&self) -> Option<&StoryProgress> {
        self.story.as_ref()
    }

    #[must_use]
    pub fn city(&self) -> CityView<'_> {
        CityView::new(
            self.story
                .as_ref()
                .map_or(&[][..], |p| p.city_buildings_restored.as_slice()),
        )
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Stop detection, the camera and the stats refresh. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut detector) = self.detector.take() {
            detector.stop();
        }
        if let Some(webcam) = self.webcam.as_mut() {
            webcam.stop();
        }
        self.tasks.abort_all();
    }
}

impl Drop for GamePage {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for GamePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamePage")
            .field("session_id", &self.session_id)
            .field("phase", &self.state.phase())
            .field("index", &self.state.index())
            .finish_non_exhaustive()
    }
}
