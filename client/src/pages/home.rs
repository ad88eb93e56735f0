//! Home page: story progress, city, topic and difficulty selection.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use std::collections::HashSet;

use game::consts::{DEFAULT_TOPIC, TOPICS};
use game::story::CityView;
use tracing::warn;
use wire::{Chapter, Difficulty, StoryProgress, User};

use crate::pages::{PageError, Route};
use crate::state::auth::AuthState;

/// What the game page needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParams {
    pub topic: String,
    pub difficulty: Difficulty,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic `{0}`")]
pub struct UnknownTopic(pub String);

#[derive(Debug, Clone)]
pub struct HomePage {
    user: User,
    progress: Option<StoryProgress>,
    chapter: Option<Chapter>,
    topic: String,
    difficulty: Difficulty,
    seen_intros: HashSet<u32>,
}

impl HomePage {
    /// Load story progress and the current chapter for the logged-in user.
    /// Story failures are logged and leave the story sections empty.
    ///
    /// # Errors
    ///
    /// [`PageError::Redirect`] to login when no user is logged in.
    pub async fn load(auth: &AuthState) -> Result<Self, PageError> {
        let api = auth.api();
        let user = auth.user().cloned().ok_or(PageError::Redirect(Route::Login))?;

        let (progress, chapter) = match api.story_progress(&user.id).await {
            Ok(progress) => {
                let chapter = match api.story_chapter(progress.current_chapter).await {
                    Ok(chapter) => Some(chapter),
                    Err(e) => {
                        warn!(error = %e, chapter = progress.current_chapter, "failed to load chapter");
                        None
                    }
                };
                (Some(progress), chapter)
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "failed to load story");
                (None, None)
            }
        };

        Ok(Self {
            user,
            progress,
            chapter,
            topic: DEFAULT_TOPIC.to_owned(),
            difficulty: Difficulty::Easy,
            seen_intros: HashSet::new(),
        })
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn progress(&self) -> Option<&StoryProgress> {
        self.progress.as_ref()
    }

    #[must_use]
    pub fn chapter(&self) -> Option<&Chapter> {
        self.chapter.as_ref()
    }

    /// City view over the restored buildings (empty if the story failed to load).
    #[must_use]
    pub fn city(&self) -> CityView<'_> {
        CityView::new(
            self.progress
                .as_ref()
                .map_or(&[][..], |p| p.city_buildings_restored.as_slice()),
        )
    }

    /// The chapter intro, the first time it is asked for per chapter.
    pub fn take_intro(&mut self) -> Option<&Chapter> {
        let id = self.progress.as_ref()?.current_chapter;
        if !self.seen_intros.insert(id) {
            return None;
        }
        self.chapter.as_ref()
    }

    #[must_use]
    pub fn topics(&self) -> &'static [&'static str] {
        &TOPICS
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// # Errors
    ///
    /// Rejects topics outside the offered list.
    pub fn select_topic(&mut self, topic: &str) -> Result<(), UnknownTopic> {
        let topic = topic.trim();
        if !TOPICS.contains(&topic) {
            return Err(UnknownTopic(topic.to_owned()));
        }
        self.topic = topic.to_owned();
        Ok(())
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    #[must_use]
    pub fn game_params(&self) -> GameParams {
        GameParams { topic: self.topic.clone(), difficulty: self.difficulty, user_id: self.user.id.clone() }
    }
}
