//! Game progression state machine.
//!
//! DESIGN
//! ======
//! `Idle -> QuestionActive -> AnswerSubmitted(correct|incorrect)
//!   -> QuestionActive(next) | AllComplete`.
//!
//! Submission is split in two halves so the async caller owns the network
//! call: [`GameState::begin_submit`] validates and hands out a
//! [`SubmitTicket`], and the caller reports back with either
//! [`GameState::apply_result`] or [`GameState::apply_failure`]. A ticket
//! issued for one question is ignored if a reload has replaced it by the
//! time it resolves.
//!
//! [`GameState::next`] only leaves a question once it has been answered.
//!
//! `AllComplete` is a client-only pseudo-state. Nothing here is persisted; a
//! fresh `GameState` starts over.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use wire::{Question, SubmitAnswerResponse};

use crate::consts::{ALL_COMPLETE_MESSAGE, SUBMIT_FAILED_EXPLANATION};
use crate::progress::level_for_xp;

/// Where the player is in the current set of questions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No questions loaded.
    #[default]
    Idle,
    /// A question is shown and accepts answers.
    QuestionActive,
    /// A graded (or failed) submission is being shown.
    AnswerSubmitted(Verdict),
    /// The last question has been passed.
    AllComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Feedback panel contents after a submission or on completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub xp_earned: u64,
    pub explanation: String,
    pub hints_used: u32,
    /// Set only on the terminal completion message.
    pub all_complete: bool,
}

/// Why a submission was refused before reaching the backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("answer is empty")]
    BlankAnswer,
    #[error("no question is active")]
    NoActiveQuestion,
    #[error("an answer for this question is already being shown")]
    AlreadyAnswered,
}

/// A validated submission waiting on the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitTicket {
    pub question_id: String,
    pub answer: String,
    /// Seconds spent on the question when the answer was sent.
    pub time_taken: f64,
}

/// Emitted on a correct answer; feeds the analytics callback.
#[derive(Clone, Debug, PartialEq)]
pub struct SolvedEvent {
    pub correct: bool,
    pub time_taken: f64,
    pub question_id: String,
}

/// Result of [`GameState::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index.
    Moved(usize),
    /// Passed the last question; emitted exactly once.
    Completed,
    /// Nothing to advance (idle, or already complete).
    Stayed,
}

#[derive(Clone, Debug, Default)]
pub struct GameState {
    questions: Vec<Question>,
    index: usize,
    xp: u64,
    solved: u32,
    attempts: u32,
    time_spent: u64,
    phase: Phase,
    feedback: Option<Feedback>,
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the question list and start from the first question.
    ///
    /// XP and solved counts carry over; they belong to the player, not the
    /// question set.
    pub fn load(&mut self, questions: Vec<Question>) {
        self.phase = if questions.is_empty() { Phase::Idle } else { Phase::QuestionActive };
        self.questions = questions;
        self.index = 0;
        self.time_spent = 0;
        self.feedback = None;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The question on screen, if any. Still set while `AllComplete`.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }

    #[must_use]
    pub fn solved(&self) -> u32 {
        self.solved
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whole seconds spent on the current question.
    #[must_use]
    pub fn time_spent(&self) -> u64 {
        self.time_spent
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::AllComplete
    }

    /// One-second timer tick for the current question.
    pub fn tick(&mut self) {
        if matches!(self.phase, Phase::QuestionActive | Phase::AnswerSubmitted(_)) {
            self.time_spent = self.time_spent.saturating_add(1);
        }
    }

    /// Validate an answer and produce the request the caller should send.
    ///
    /// # Errors
    ///
    /// Refuses blank answers, answers with no active question, and a second
    /// answer while feedback is still showing.
    pub fn begin_submit(&self, answer: &str) -> Result<SubmitTicket, SubmitError> {
        match self.phase {
            Phase::QuestionActive => {}
            Phase::AnswerSubmitted(_) => return Err(SubmitError::AlreadyAnswered),
            Phase::Idle | Phase::AllComplete => return Err(SubmitError::NoActiveQuestion),
        }
        if answer.trim().is_empty() {
            return Err(SubmitError::BlankAnswer);
        }
        let question = self.current_question().ok_or(SubmitError::NoActiveQuestion)?;
        #[allow(clippy::cast_precision_loss)]
        let time_taken = self.time_spent as f64;
        Ok(SubmitTicket { question_id: question.id.clone(), answer: answer.to_owned(), time_taken })
    }

    /// Apply a graded response.
    ///
    /// Returns the analytics event when the answer was correct. Responses for
    /// a question that is no longer active are dropped.
    pub fn apply_result(&mut self, ticket: &SubmitTicket, response: &SubmitAnswerResponse) -> Option<SolvedEvent> {
        if !self.ticket_is_current(ticket) {
            return None;
        }
        self.attempts = self.attempts.saturating_add(1);
        self.feedback = Some(Feedback {
            correct: response.correct,
            xp_earned: response.xp_earned,
            explanation: response.explanation.clone(),
            hints_used: response.hints_used,
            all_complete: false,
        });
        if response.correct {
            self.xp = self.xp.saturating_add(response.xp_earned);
            self.solved = self.solved.saturating_add(1);
            self.phase = Phase::AnswerSubmitted(Verdict::Correct);
            Some(SolvedEvent { correct: true, time_taken: ticket.time_taken, question_id: ticket.question_id.clone() })
        } else {
            self.phase = Phase::AnswerSubmitted(Verdict::Incorrect);
            None
        }
    }

    /// The submit request failed in transit. Shows retryable fallback feedback.
    pub fn apply_failure(&mut self, ticket: &SubmitTicket) {
        if !self.ticket_is_current(ticket) {
            return;
        }
        self.feedback = Some(Feedback {
            correct: false,
            explanation: SUBMIT_FAILED_EXPLANATION.to_owned(),
            ..Feedback::default()
        });
        self.phase = Phase::AnswerSubmitted(Verdict::Incorrect);
    }

    /// Clear incorrect feedback and let the player answer the same question again.
    ///
    /// Returns `false` when there is nothing to retry.
    pub fn retry(&mut self) -> bool {
        if self.phase != Phase::AnswerSubmitted(Verdict::Incorrect) {
            return false;
        }
        self.feedback = None;
        self.phase = Phase::QuestionActive;
        true
    }

    /// Move to the next question, or finish the set.
    ///
    /// Only allowed once the active question has been answered.
    pub fn next(&mut self) -> Advance {
        match self.phase {
            Phase::Idle | Phase::QuestionActive | Phase::AllComplete => return Advance::Stayed,
            Phase::AnswerSubmitted(_) => {}
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.time_spent = 0;
            self.feedback = None;
            self.phase = Phase::QuestionActive;
            Advance::Moved(self.index)
        } else {
            self.feedback = Some(Feedback {
                correct: true,
                explanation: ALL_COMPLETE_MESSAGE.to_owned(),
                all_complete: true,
                ..Feedback::default()
            });
            self.phase = Phase::AllComplete;
            Advance::Completed
        }
    }

    fn ticket_is_current(&self, ticket: &SubmitTicket) -> bool {
        self.phase == Phase::QuestionActive
            && self
                .current_question()
                .is_some_and(|q| q.id == ticket.question_id)
    }
}
