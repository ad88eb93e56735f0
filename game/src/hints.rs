//! Hint-recommendation gating.
//!
//! DESIGN
//! ======
//! Detection runs every few seconds and the backend keeps recommending the
//! same hint until its own state moves on. The gate shows a recommendation
//! once per `(question, action, hint level)` key: dismissing or accepting it
//! suppresses that key until the active question changes.

#[cfg(test)]
#[path = "hints_test.rs"]
mod hints_test;

use std::collections::HashSet;

use wire::{HintAction, HintRecommendation};

/// Identity of a recommendation for suppression purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HintKey {
    pub question_id: String,
    pub action: HintAction,
    pub hint_level: Option<u8>,
}

impl HintKey {
    #[must_use]
    pub fn new(question_id: &str, recommendation: &HintRecommendation) -> Self {
        Self {
            question_id: question_id.to_owned(),
            action: recommendation.action.clone(),
            hint_level: recommendation.hint_level,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HintGate {
    question_id: Option<String>,
    suppressed: HashSet<HintKey>,
    last_shown: Option<HintKey>,
    visible: Option<HintRecommendation>,
}

impl HintGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the gate at the active question. A change clears every suppression.
    pub fn set_question(&mut self, question_id: Option<&str>) {
        if self.question_id.as_deref() == question_id {
            return;
        }
        self.question_id = question_id.map(ToOwned::to_owned);
        self.suppressed.clear();
        self.last_shown = None;
        self.visible = None;
    }

    /// Offer a recommendation. Returns `true` if it should be shown now.
    pub fn offer(&mut self, recommendation: &HintRecommendation) -> bool {
        if recommendation.action == HintAction::None {
            return false;
        }
        let Some(question_id) = self.question_id.as_deref() else {
            return false;
        };
        let key = HintKey::new(question_id, recommendation);
        if self.suppressed.contains(&key) || self.last_shown.as_ref() == Some(&key) {
            return false;
        }
        self.last_shown = Some(key);
        self.visible = Some(recommendation.clone());
        true
    }

    /// The recommendation currently on screen.
    #[must_use]
    pub fn visible(&self) -> Option<&HintRecommendation> {
        self.visible.as_ref()
    }

    /// Close the visible recommendation without using it.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Use the visible recommendation. Returns it so the caller can act on it.
    pub fn accept(&mut self) -> Option<HintRecommendation> {
        self.close()
    }

    fn close(&mut self) -> Option<HintRecommendation> {
        let recommendation = self.visible.take()?;
        if let Some(question_id) = self.question_id.as_deref() {
            self.suppressed
                .insert(HintKey::new(question_id, &recommendation));
        }
        Some(recommendation)
    }
}

/// Heading for a recommendation panel.
#[must_use]
pub fn title(recommendation: &HintRecommendation) -> String {
    match recommendation.action {
        HintAction::ProvideHint => {
            format!("Hint Level {}", recommendation.hint_level.unwrap_or(1))
        }
        HintAction::BonusChallenge => "Bonus Challenge Available!".to_owned(),
        HintAction::Encouragement => "Keep Going!".to_owned(),
        HintAction::None | HintAction::Other(_) => "Notification".to_owned(),
    }
}

/// Label of the accept action, if the recommendation has one.
#[must_use]
pub fn accept_label(action: &HintAction) -> Option<&'static str> {
    match action {
        HintAction::ProvideHint => Some("Use Hint (-2 XP)"),
        HintAction::BonusChallenge => Some("Accept Challenge"),
        HintAction::Encouragement | HintAction::None | HintAction::Other(_) => None,
    }
}
