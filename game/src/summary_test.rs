#![allow(clippy::float_cmp)]

use super::*;
use std::collections::BTreeMap;
use wire::{EmotionData, EmotionSample, Performance, UserInfo};

fn sample(emotion: &str) -> EmotionSample {
    EmotionSample { emotion: emotion.to_owned(), ..EmotionSample::default() }
}

fn stats(solved: u32, attempted: u32, hints: u32, xp: u64, checks: u32, recent: &[&str]) -> SessionStats {
    SessionStats {
        session_id: "S1".to_owned(),
        total_xp: xp,
        questions_solved: solved,
        questions_attempted: attempted,
        hints_used: hints,
        emotion_data: EmotionData {
            total_checks: checks,
            recent_emotions: recent.iter().map(|e| sample(e)).collect(),
        },
    }
}

// --- results ---

#[test]
fn accuracy_rounds_to_one_decimal() {
    let summary = ResultsSummary::from_stats(&stats(2, 3, 0, 20, 0, &[]));
    assert_eq!(summary.accuracy, 66.7);
}

#[test]
fn accuracy_is_zero_when_nothing_attempted() {
    let summary = ResultsSummary::from_stats(&stats(0, 0, 0, 0, 0, &[]));
    assert_eq!(summary.accuracy, 0.0);
    assert!(summary.achievements.is_empty());
    assert!(summary.dominant_emotion().is_none());
}

#[test]
fn emotion_counts_sorted_with_stable_ties() {
    let summary = ResultsSummary::from_stats(&stats(
        1,
        1,
        0,
        10,
        4,
        &["confused", "focused", "focused", "confused"],
    ));
    let labels: Vec<&str> = summary.emotions.iter().map(|c| c.emotion.label()).collect();
    assert_eq!(labels, vec!["confused", "focused"]);
    assert_eq!(summary.dominant_emotion().map(|c| c.count), Some(2));
    assert_eq!(summary.emotions[0].percent_of_checks, 50.0);
}

#[test]
fn emotion_percent_uses_total_checks() {
    let summary = ResultsSummary::from_stats(&stats(0, 0, 0, 0, 3, &["happy"]));
    assert_eq!(summary.emotions[0].percent_of_checks, 33.0);
}

#[test]
fn all_achievements_unlock() {
    let summary = ResultsSummary::from_stats(&stats(4, 5, 0, 120, 12, &[]));
    assert_eq!(
        summary.achievements,
        vec![
            Achievement::FirstSolve,
            Achievement::OnFire,
            Achievement::NoHints,
            Achievement::LevelUp,
            Achievement::Sharpshooter,
            Achievement::CameraReady,
        ]
    );
    assert_eq!(summary.level, 2);
}

#[test]
fn hints_block_big_brain() {
    let summary = ResultsSummary::from_stats(&stats(1, 2, 1, 10, 0, &[]));
    assert_eq!(summary.achievements, vec![Achievement::FirstSolve]);
}

#[test]
fn achievement_titles() {
    assert_eq!(Achievement::FirstSolve.title(), "First Blood");
    assert_eq!(Achievement::Sharpshooter.description(), "80%+ accuracy");
}

// --- analytics ---

fn analytics(emotions: &[(&str, u64)]) -> UserAnalytics {
    UserAnalytics {
        user_info: UserInfo {
            username: "ada".to_owned(),
            current_level: 3,
            total_xp: 250,
            city_restoration: 4,
        },
        performance: Performance {
            total_questions_attempted: 10,
            total_questions_solved: 7,
            accuracy: 70.0,
            total_time_spent: 359.0,
            average_time_per_question: 35.9,
        },
        emotion_analysis: emotions.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
        difficulty_performance: BTreeMap::new(),
        streak: 2,
        achievements: vec!["first_solve".to_owned()],
    }
}

#[test]
fn analytics_shares_sorted_by_count() {
    let summary = AnalyticsSummary::new(&analytics(&[("confused", 1), ("focused", 2)]), vec![]);
    let labels: Vec<&str> = summary.emotions.iter().map(|s| s.emotion.label()).collect();
    assert_eq!(labels, vec!["focused", "confused"]);
    assert_eq!(summary.emotions[0].percent, 66.7);
    assert_eq!(summary.emotions[1].percent, 33.3);
    assert_eq!(summary.top_emotion().map(|s| s.count), Some(2));
}

#[test]
fn analytics_times_are_floored() {
    let summary = AnalyticsSummary::new(&analytics(&[]), vec![]);
    assert_eq!(summary.total_minutes, 5);
    assert_eq!(summary.average_seconds, 35);
    assert!(summary.emotions.is_empty());
    assert!(summary.top_emotion().is_none());
}

#[test]
fn analytics_keeps_leaderboard() {
    let entry = LeaderboardEntry {
        rank: 1,
        username: "ada".to_owned(),
        level: 3,
        xp: 250,
        city_restoration: 4,
    };
    let summary = AnalyticsSummary::new(&analytics(&[]), vec![entry.clone()]);
    assert_eq!(summary.leaderboard, vec![entry]);
    assert_eq!(summary.username, "ada");
}

#[test]
fn negative_time_floors_to_zero() {
    let mut data = analytics(&[]);
    data.performance.total_time_spent = -5.0;
    assert_eq!(AnalyticsSummary::new(&data, vec![]).total_minutes, 0);
}

#[test]
fn best_difficulty_is_highest_accuracy() {
    let mut data = analytics(&[]);
    data.difficulty_performance = [
        ("easy".to_owned(), serde_json::json!(62.5)),
        ("hard".to_owned(), serde_json::json!(80)),
        ("medium".to_owned(), serde_json::json!(71.0)),
    ]
    .into_iter()
    .collect();
    assert_eq!(AnalyticsSummary::new(&data, vec![]).best_difficulty.as_deref(), Some("hard"));
}

#[test]
fn best_difficulty_skips_non_numbers_and_keeps_first_tie() {
    let mut data = analytics(&[]);
    data.difficulty_performance = [
        ("easy".to_owned(), serde_json::json!(50)),
        ("hard".to_owned(), serde_json::json!({ "accuracy": 99 })),
        ("medium".to_owned(), serde_json::json!(50)),
    ]
    .into_iter()
    .collect();
    assert_eq!(AnalyticsSummary::new(&data, vec![]).best_difficulty.as_deref(), Some("easy"));
}

#[test]
fn best_difficulty_is_none_without_data() {
    assert!(AnalyticsSummary::new(&analytics(&[]), vec![]).best_difficulty.is_none());
}
