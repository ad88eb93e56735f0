//! Level arithmetic and time formatting.
//!
//! Levels are always derived from XP on read; nothing in the crate stores a
//! level next to the XP it came from.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use crate::consts::XP_PER_LEVEL;

/// Level for a total XP value: `floor(xp / 100) + 1`.
#[must_use]
pub fn level_for_xp(xp: u64) -> u32 {
    u32::try_from(xp / XP_PER_LEVEL)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// XP still needed to reach the next level.
#[must_use]
pub fn xp_to_next_level(xp: u64) -> u64 {
    (u64::from(level_for_xp(xp)) * XP_PER_LEVEL).saturating_sub(xp)
}

/// Progress through the current level, as a percentage in `0..100`.
#[must_use]
pub fn level_progress_percent(xp: u64) -> u64 {
    (xp % XP_PER_LEVEL) * 100 / XP_PER_LEVEL
}

/// Format whole seconds as `m:ss`.
#[must_use]
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, or 0 when `whole` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
