//! Shared constants for the game crate.

// ── Levels ──────────────────────────────────────────────────────

/// XP needed to climb one level.
pub const XP_PER_LEVEL: u64 = 100;

// ── Topics ──────────────────────────────────────────────────────

/// Topics offered on the home screen, in display order.
pub const TOPICS: [&str; 7] = [
    "arrays",
    "strings",
    "loops",
    "recursion",
    "sorting",
    "searching",
    "dynamic-programming",
];

pub const DEFAULT_TOPIC: &str = "arrays";

/// Questions loaded per play session.
pub const QUESTIONS_PER_SESSION: u32 = 5;

// ── Feedback text ───────────────────────────────────────────────

/// Explanation shown when the submit request itself fails.
pub const SUBMIT_FAILED_EXPLANATION: &str = "Failed to submit answer. Please try again.";

/// Explanation shown once the last question has been passed.
pub const ALL_COMPLETE_MESSAGE: &str = "Congratulations! You have completed all questions in this session! 🎉";

// ── Emotion ─────────────────────────────────────────────────────

/// Client-side emotion history cap, matching the backend's per-session cap.
pub const EMOTION_HISTORY_CAPACITY: usize = 100;

// ── City ────────────────────────────────────────────────────────

/// Every building in NeoCity, in map order.
pub const CITY_BUILDINGS: [&str; 12] = [
    "data_center",
    "library",
    "power_grid",
    "comm_tower",
    "router_hub",
    "fiber_node",
    "learning_center",
    "optimization_hub",
    "ai_core",
    "core_system",
    "city_hall",
    "victory_monument",
];

/// A building is restored every this many solved questions.
pub const SOLVES_PER_RESTORATION: u32 = 2;
