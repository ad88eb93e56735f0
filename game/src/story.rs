//! City restoration, XP sync bookkeeping and level-up detection.
//!
//! DESIGN
//! ======
//! These are the decisions the game page makes after each solve. The page
//! owns the network calls; this module only answers "should we, and what".

#[cfg(test)]
#[path = "story_test.rs"]
mod story_test;

use wire::StoryProgress;

use crate::consts::{CITY_BUILDINGS, SOLVES_PER_RESTORATION};
use crate::progress::{level_for_xp, percent};

/// Read-only view of the city for display.
#[derive(Clone, Copy, Debug)]
pub struct CityView<'a> {
    restored: &'a [String],
}

impl<'a> CityView<'a> {
    #[must_use]
    pub fn new(restored: &'a [String]) -> Self {
        Self { restored }
    }

    #[must_use]
    pub fn restored_count(&self) -> usize {
        CITY_BUILDINGS
            .iter()
            .filter(|id| self.is_restored(id))
            .count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        CITY_BUILDINGS.len()
    }

    /// Share of the city restored, 0-100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        percent(self.restored_count() as u64, self.total() as u64)
    }

    #[must_use]
    pub fn is_fully_restored(&self) -> bool {
        self.restored_count() == self.total()
    }

    #[must_use]
    pub fn is_restored(&self, building_id: &str) -> bool {
        self.restored.iter().any(|b| b == building_id)
    }

    /// Every building with its restored flag, in map order.
    pub fn tiles(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        CITY_BUILDINGS.iter().map(|id| (*id, self.is_restored(id)))
    }
}

/// Human-readable building name from its id (`power_grid` -> `power grid`).
#[must_use]
pub fn building_label(building_id: &str) -> String {
    building_id.replace('_', " ")
}

/// First building of the current chapter that is not yet restored.
#[must_use]
pub fn next_building(progress: &StoryProgress) -> Option<&str> {
    progress
        .chapter_data
        .as_ref()?
        .buildings
        .iter()
        .find(|b| !progress.is_restored(b))
        .map(String::as_str)
}

/// Fires a restoration once per qualifying solve count.
///
/// A building is due whenever the session's solved count reaches a positive
/// multiple of [`SOLVES_PER_RESTORATION`]. Re-checking the same count (for
/// example after story progress refreshes) does not fire again.
#[derive(Clone, Debug, Default)]
pub struct RestorationTracker {
    last_fired_at: Option<u32>,
}

impl RestorationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the building to restore for this solved count, if any.
    pub fn due<'p>(&mut self, solved: u32, progress: &'p StoryProgress) -> Option<&'p str> {
        if solved == 0 || solved % SOLVES_PER_RESTORATION != 0 {
            return None;
        }
        if self.last_fired_at == Some(solved) {
            return None;
        }
        let building = next_building(progress)?;
        self.last_fired_at = Some(solved);
        Some(building)
    }
}

/// Tracks how much session XP has already been pushed to the user's total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XpLedger {
    synced: u64,
}

impl XpLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// XP earned since the last successful sync, if any.
    #[must_use]
    pub fn pending(&self, session_xp: u64) -> Option<u64> {
        let delta = session_xp.saturating_sub(self.synced);
        (delta > 0).then_some(delta)
    }

    /// Record that everything up to `session_xp` has been synced.
    pub fn mark_synced(&mut self, session_xp: u64) {
        self.synced = self.synced.max(session_xp);
    }

    #[must_use]
    pub fn synced(&self) -> u64 {
        self.synced
    }
}

/// New level if `total_xp` has outgrown the stored level.
#[must_use]
pub fn level_up(total_xp: u64, stored_level: u32) -> Option<u32> {
    let level = level_for_xp(total_xp);
    (level > stored_level).then_some(level)
}
