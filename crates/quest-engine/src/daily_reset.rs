//! Day-boundary reset of per-day counters.
//!
//! The marker records the last day a reset ran, so the reset happens at
//! most once per calendar day no matter how often it is invoked.

use crate::state::ProgressionState;
use crate::streaks::yesterday;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Date of the last daily reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyResetMarker(pub Option<NaiveDate>);

impl DailyResetMarker {
    pub fn last_reset(&self) -> Option<NaiveDate> {
        self.0
    }
}

/// Reset per-day counters if `today` has not been reset yet
///
/// Returns true when a reset was applied. A streak lapses only when the
/// last activity is older than yesterday.
pub fn maybe_reset(
    state: &mut ProgressionState,
    today: NaiveDate,
    marker: &mut DailyResetMarker,
) -> bool {
    if marker.0 == Some(today) {
        return false;
    }

    state.stats.tasks_completed_today = 0;
    state.stats.dailies_completed_today = 0;

    let active_recently = state
        .last_active_date
        .map(|last| last == today || last == yesterday(today))
        .unwrap_or(false);
    if !active_recently && state.current_streak > 0 {
        info!(lapsed = state.current_streak, "streak lapsed");
        state.current_streak = 0;
    }

    marker.0 = Some(today);
    info!(%today, "daily counters reset");
    true
}
