//! Daily activity streaks.
//!
//! Days are compared by calendar identity, never by elapsed hours.

use crate::state::ProgressionState;
use chrono::NaiveDate;
use tracing::debug;

/// The calendar day before `today`
pub fn yesterday(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}

/// Record streak-relevant activity on `today`
pub fn update_streak(state: &mut ProgressionState, today: NaiveDate) {
    match state.last_active_date {
        Some(last) if last == yesterday(today) => {
            state.current_streak = state.current_streak.saturating_add(1);
        }
        Some(last) if last == today => {}
        _ => state.current_streak = 1,
    }

    state.best_streak = state.best_streak.max(state.current_streak);
    state.last_active_date = Some(today);

    debug!(
        current = state.current_streak,
        best = state.best_streak,
        "streak updated"
    );
}
