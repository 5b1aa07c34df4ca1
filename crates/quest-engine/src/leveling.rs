//! Level curve and reward application.
//!
//! ## XP Curve
//!
//! XP required to clear level L: floor(100 * 1.2^(L-1))
//! - Level 1: 100
//! - Level 2: 120
//! - Level 5: 207
//! - Level 10: 515
//!
//! `xp` on the state is progress inside the current level; crossing the
//! threshold levels up once per award and carries the remainder.
//!
//! The curve is capped at [`MAX_LEVEL`], the last level whose threshold
//! fits in an `i64`. XP keeps accumulating there without further level-ups.

use crate::multiplier::MultiplierSource;
use crate::state::ProgressionState;
use tracing::{debug, info};

const BASE_XP: f64 = 100.0;
const GROWTH_FACTOR: f64 = 1.2;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 215;

/// XP needed to clear `level`; levels past [`MAX_LEVEL`] use its threshold
pub fn xp_needed(level: u32) -> i64 {
    let exponent = i32::try_from(level.clamp(1, MAX_LEVEL) - 1).unwrap_or(i32::MAX);
    (BASE_XP * GROWTH_FACTOR.powi(exponent)).floor() as i64
}

/// Progress through the current level (0.0 - 1.0)
pub fn progress_to_next(state: &ProgressionState) -> f64 {
    let needed = xp_needed(state.level);
    if needed <= 0 {
        return 1.0;
    }
    (state.xp as f64 / needed as f64).clamp(0.0, 1.0)
}

/// Result of applying one reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AwardOutcome {
    /// XP after multipliers (negative for penalties)
    pub xp: i64,
    /// Gold after multipliers (negative for penalties)
    pub gold: i64,
    /// New level when this award crossed a threshold
    pub leveled_up: Option<u32>,
}

fn scale(base: i64, factor: f64) -> i64 {
    let factor = if factor.is_finite() { factor.max(0.0) } else { 1.0 };
    (base as f64 * factor).floor() as i64
}

/// Apply a reward (or penalty) to the state
///
/// Lifetime XP only counts positive contributions; gold and in-level XP
/// are floored at zero. At most one level-up per call: a reward larger
/// than the threshold leaves the surplus in `xp` for the next award.
pub fn award_rewards(
    state: &mut ProgressionState,
    base_xp: i64,
    base_gold: i64,
    multipliers: &dyn MultiplierSource,
) -> AwardOutcome {
    let final_xp = scale(base_xp, multipliers.xp_multiplier());
    let final_gold = scale(base_gold, multipliers.gold_multiplier());

    state.xp = state.xp.saturating_add(final_xp);
    state.total_xp = state.total_xp.saturating_add(final_xp.max(0));
    state.gold = state.gold.saturating_add(final_gold).max(0);
    state.xp = state.xp.max(0);

    let needed = xp_needed(state.level);
    let mut leveled_up = None;
    if state.level < MAX_LEVEL && state.xp >= needed {
        state.level = state.level.saturating_add(1);
        state.xp -= needed;
        leveled_up = Some(state.level);
        info!(level = state.level, carry = state.xp, "level up");
    }

    debug!(
        xp = final_xp,
        gold = final_gold,
        level = state.level,
        total_xp = state.total_xp,
        "rewards applied"
    );

    AwardOutcome {
        xp: final_xp,
        gold: final_gold,
        leveled_up,
    }
}
