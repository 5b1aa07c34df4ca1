//! Progression and achievement engine for Questmaster.
//!
//! Turns task completions and habit ticks into XP, gold, level-ups,
//! streaks, daily resets and achievement unlocks, and spends gold in the
//! vault. Rendering and task storage belong to the host; this crate owns
//! only the rules and the persisted progression records.

pub mod achievements;
pub mod clock;
pub mod daily_reset;
pub mod engine;
pub mod error;
pub mod leveling;
pub mod multiplier;
pub mod rewards;
pub mod state;
pub mod store;
pub mod streaks;
pub mod vault;

pub use achievements::{format_unlock, Achievement, AchievementBook, Condition, CATALOG};
pub use clock::{Clock, ManualClock, SystemClock};
pub use daily_reset::DailyResetMarker;
pub use engine::{CompletionOutcome, QuestEngine, TaskKind};
pub use error::QuestError;
pub use leveling::{xp_needed, AwardOutcome, MAX_LEVEL};
pub use multiplier::{MultiplierSource, NoMultiplier, Plan, Subscription};
pub use rewards::{rewards_for, Reward, Tier};
pub use state::{ProgressionState, SnapshotField, Stats, StatsSnapshot};
pub use store::{JsonFileStore, MemoryStore, Store, StoreKey};
pub use vault::{Artifact, OwnedArtifact, Vault};

/// Data directory name under the platform data dir
pub const DATA_DIR_NAME: &str = "questmaster";
