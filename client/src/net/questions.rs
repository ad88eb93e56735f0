//! Question endpoints and the per-topic question cache.
//!
//! DESIGN
//! ======
//! [`QuestionService`] caches question sets by `topic_difficulty` for the
//! life of the service. A miss fetches stored questions first and only asks
//! the backend to generate new ones when none exist. Errors are not cached.

#[cfg(test)]
#[path = "questions_test.rs"]
mod questions_test;

use std::collections::HashMap;

use tracing::info;
use wire::{Difficulty, GenerateQuestionsRequest, Question, QuestionList, QuestionQuery};

use super::api::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /api/questions` with optional filters.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn questions(&self, query: &QuestionQuery) -> Result<QuestionList, ApiError> {
        self.get_query("/api/questions", query).await
    }

    /// `GET /api/questions/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn question(&self, question_id: &str) -> Result<Question, ApiError> {
        self.get(&format!("/api/questions/{question_id}")).await
    }

    /// `POST /api/generate-questions`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn generate_questions(&self, request: &GenerateQuestionsRequest) -> Result<QuestionList, ApiError> {
        self.post("/api/generate-questions", request).await
    }
}

/// Question loader with an in-memory cache per topic and difficulty.
#[derive(Debug)]
pub struct QuestionService {
    api: ApiClient,
    cache: HashMap<String, Vec<Question>>,
}

impl QuestionService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, cache: HashMap::new() }
    }

    /// Questions for a topic and difficulty, generating them if the backend
    /// has none stored.
    ///
    /// # Errors
    ///
    /// Propagates the fetch or generate error; nothing is cached on failure.
    pub async fn load_questions(
        &mut self,
        topic: &str,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<Question>, ApiError> {
        let key = cache_key(topic, difficulty);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let query = QuestionQuery { topic: Some(topic.to_owned()), difficulty: Some(difficulty), limit: Some(count) };
        let mut list = self.api.questions(&query).await?;
        if list.count == 0 {
            info!(topic, %difficulty, count, "no stored questions; generating");
            let request = GenerateQuestionsRequest { topic: topic.to_owned(), difficulty, count };
            list = self.api.generate_questions(&request).await?;
        }

        self.cache.insert(key, list.questions.clone());
        Ok(list.questions)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn is_cached(&self, topic: &str, difficulty: Difficulty) -> bool {
        self.cache.contains_key(&cache_key(topic, difficulty))
    }
}

fn cache_key(topic: &str, difficulty: Difficulty) -> String {
    format!("{topic}_{difficulty}")
}
