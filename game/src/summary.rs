//! End-of-session results and long-term analytics, derived for display.
//!
//! DESIGN
//! ======
//! Both summaries are pure functions of one backend payload. Sorting is
//! stable so equal counts keep the order the backend reported them in, which
//! keeps the "dominant" pick deterministic.

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;

use std::collections::BTreeMap;

use wire::{LeaderboardEntry, SessionStats, UserAnalytics};

use crate::emotion::Emotion;
use crate::progress::{level_for_xp, percent, round1};

// =============================================================================
// ACHIEVEMENTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Achievement {
    FirstSolve,
    OnFire,
    NoHints,
    LevelUp,
    Sharpshooter,
    CameraReady,
}

impl Achievement {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::FirstSolve => "First Blood",
            Self::OnFire => "On Fire",
            Self::NoHints => "Big Brain",
            Self::LevelUp => "Level Up",
            Self::Sharpshooter => "Sharpshooter",
            Self::CameraReady => "Camera Ready",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::FirstSolve => "Solved your first question",
            Self::OnFire => "Solved 3+ questions",
            Self::NoHints => "No hints used",
            Self::LevelUp => "Reached level 2 or higher",
            Self::Sharpshooter => "80%+ accuracy",
            Self::CameraReady => "10+ emotion checks",
        }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: u64,
    /// Share of all emotion checks in the session, rounded to a whole percent.
    pub percent_of_checks: f64,
}

/// What the results page shows for one finished session.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsSummary {
    pub level: u32,
    pub total_xp: u64,
    pub solved: u32,
    pub attempted: u32,
    pub hints_used: u32,
    /// Percentage with one decimal; 0 when nothing was attempted.
    pub accuracy: f64,
    pub total_checks: u32,
    /// Counts over the recent emotions, most frequent first.
    pub emotions: Vec<EmotionCount>,
    pub achievements: Vec<Achievement>,
}

impl ResultsSummary {
    #[must_use]
    pub fn from_stats(stats: &SessionStats) -> Self {
        let level = level_for_xp(stats.total_xp);
        let accuracy = round1(percent(
            u64::from(stats.questions_solved),
            u64::from(stats.questions_attempted),
        ));
        let total_checks = stats.emotion_data.total_checks;

        let mut counts: Vec<(Emotion, u64)> = Vec::new();
        for sample in &stats.emotion_data.recent_emotions {
            let emotion = Emotion::from(sample.emotion.as_str());
            match counts.iter_mut().find(|(e, _)| *e == emotion) {
                Some((_, n)) => *n += 1,
                None => counts.push((emotion, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        let emotions = counts
            .into_iter()
            .map(|(emotion, count)| EmotionCount {
                emotion,
                count,
                percent_of_checks: percent(count, u64::from(total_checks)).round(),
            })
            .collect();

        let solved = stats.questions_solved;
        let mut achievements = Vec::new();
        if solved > 0 {
            achievements.push(Achievement::FirstSolve);
        }
        if solved >= 3 {
            achievements.push(Achievement::OnFire);
        }
        if stats.hints_used == 0 && solved > 0 {
            achievements.push(Achievement::NoHints);
        }
        if level >= 2 {
            achievements.push(Achievement::LevelUp);
        }
        if accuracy >= 80.0 {
            achievements.push(Achievement::Sharpshooter);
        }
        if total_checks >= 10 {
            achievements.push(Achievement::CameraReady);
        }

        Self {
            level,
            total_xp: stats.total_xp,
            solved,
            attempted: stats.questions_attempted,
            hints_used: stats.hints_used,
            accuracy,
            total_checks,
            emotions,
            achievements,
        }
    }

    /// Most frequent recent emotion, if any were recorded.
    #[must_use]
    pub fn dominant_emotion(&self) -> Option<&EmotionCount> {
        self.emotions.first()
    }
}

// =============================================================================
// ANALYTICS
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct EmotionShare {
    pub emotion: Emotion,
    pub count: u64,
    /// Percentage of all recorded attempts, one decimal.
    pub percent: f64,
}

/// What the analytics dashboard shows for a user.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsSummary {
    pub username: String,
    pub level: u32,
    pub total_xp: u64,
    pub city_restoration: u32,
    pub attempted: u64,
    pub solved: u64,
    pub accuracy: f64,
    pub total_minutes: u64,
    pub average_seconds: u64,
    pub streak: u32,
    /// Difficulty with the highest accuracy; `None` until one has been played.
    pub best_difficulty: Option<String>,
    /// Emotion shares, highest count first.
    pub emotions: Vec<EmotionShare>,
    pub achievements: Vec<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl AnalyticsSummary {
    #[must_use]
    pub fn new(analytics: &UserAnalytics, leaderboard: Vec<LeaderboardEntry>) -> Self {
        let total: u64 = analytics.emotion_analysis.values().sum();
        let mut emotions: Vec<EmotionShare> = analytics
            .emotion_analysis
            .iter()
            .map(|(label, &count)| EmotionShare {
                emotion: Emotion::from(label.as_str()),
                count,
                percent: round1(percent(count, total)),
            })
            .collect();
        emotions.sort_by(|a, b| b.count.cmp(&a.count));

        let perf = &analytics.performance;
        Self {
            username: analytics.user_info.username.clone(),
            level: analytics.user_info.current_level,
            total_xp: analytics.user_info.total_xp,
            city_restoration: analytics.user_info.city_restoration,
            attempted: perf.total_questions_attempted,
            solved: perf.total_questions_solved,
            accuracy: round1(perf.accuracy),
            total_minutes: whole_units(perf.total_time_spent / 60.0),
            average_seconds: whole_units(perf.average_time_per_question),
            streak: analytics.streak,
            best_difficulty: best_difficulty(&analytics.difficulty_performance),
            emotions,
            achievements: analytics.achievements.clone(),
            leaderboard,
        }
    }

    #[must_use]
    pub fn top_emotion(&self) -> Option<&EmotionShare> {
        self.emotions.first()
    }
}

/// Key with the highest numeric value. Ties keep the first key; non-numeric
/// values are skipped.
fn best_difficulty(performance: &BTreeMap<String, serde_json::Value>) -> Option<String> {
    performance
        .iter()
        .filter_map(|(difficulty, value)| value.as_f64().map(|accuracy| (difficulty, accuracy)))
        .fold(None, |best: Option<(&String, f64)>, (difficulty, accuracy)| match best {
            Some((_, top)) if top >= accuracy => best,
            _ => Some((difficulty, accuracy)),
        })
        .map(|(difficulty, _)| difficulty.clone())
}

/// Floor of a non-negative float; negatives and NaN become zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_units(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}
