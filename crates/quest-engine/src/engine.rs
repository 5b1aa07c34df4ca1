//! Engine facade used by the task layer.
//!
//! Owns the progression state, achievement book and daily-reset marker for
//! one user, and drives the reward -> streak -> counters -> achievements ->
//! persist pipeline for every event. Each operation finishes all in-memory
//! mutation before the first store write.

use crate::achievements::{Achievement, AchievementBook, AchievementRecord};
use crate::clock::Clock;
use crate::daily_reset::{self, DailyResetMarker};
use crate::error::Result;
use crate::leveling::{self, AwardOutcome};
use crate::multiplier::{MultiplierSource, NoMultiplier, Subscription};
use crate::rewards::{rewards_for, Reward, Tier};
use crate::state::{ProgressionState, StatsSnapshot};
use crate::store::{load_or_default, save_json, Store, StoreKey};
use crate::streaks;
use crate::vault::{self, Artifact, OwnedArtifact, Vault};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Kind of task an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Habit,
    Daily,
    Todo,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Habit => "habit",
            TaskKind::Daily => "daily",
            TaskKind::Todo => "todo",
        }
    }

    /// Whether the host drops the task from its list once completed
    pub fn removed_on_completion(&self) -> bool {
        !matches!(self, TaskKind::Habit)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "habit" | "habits" => Ok(TaskKind::Habit),
            "daily" | "dailies" => Ok(TaskKind::Daily),
            "todo" | "todos" => Ok(TaskKind::Todo),
            other => Err(format!("unknown task kind: {}", other)),
        }
    }
}

/// What one event changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOutcome {
    pub reward: AwardOutcome,
    pub new_level: Option<u32>,
    pub newly_unlocked: Vec<Achievement>,
}

pub struct QuestEngine<S: Store, C: Clock> {
    state: ProgressionState,
    achievements: AchievementBook,
    reset_marker: DailyResetMarker,
    vault: Vault,
    multipliers: Box<dyn MultiplierSource>,
    active_dailies: u64,
    store: S,
    clock: C,
}

impl<S: Store, C: Clock> QuestEngine<S, C> {
    /// Load all records from `store`; anything absent or malformed starts
    /// from defaults.
    pub fn open(store: S, clock: C, multipliers: Box<dyn MultiplierSource>) -> Self {
        let mut state: ProgressionState = load_or_default(&store, StoreKey::Player);
        state.normalize();
        let records: Vec<AchievementRecord> = load_or_default(&store, StoreKey::Achievements);
        let reset_marker: DailyResetMarker = load_or_default(&store, StoreKey::LastReset);
        let vault: Vault = load_or_default(&store, StoreKey::Vault);

        let achievements = AchievementBook::from_records(&records);
        debug!(
            level = state.level,
            unlocked = achievements.unlocked_count(),
            "progression loaded"
        );

        Self {
            state,
            achievements,
            reset_marker,
            vault,
            multipliers,
            active_dailies: 0,
            store,
            clock,
        }
    }

    /// Open with the persisted subscription as multiplier source
    pub fn open_with_subscription(store: S, clock: C) -> Self {
        let subscription: Subscription = load_or_default(&store, StoreKey::Subscription);
        Self::open(store, clock, Box::new(subscription))
    }

    /// Open with neutral multipliers
    pub fn open_default(store: S, clock: C) -> Self {
        Self::open(store, clock, Box::new(NoMultiplier))
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn reset_marker(&self) -> DailyResetMarker {
        self.reset_marker
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_multipliers(&mut self, multipliers: Box<dyn MultiplierSource>) {
        self.multipliers = multipliers;
    }

    /// Number of dailies scheduled for today, completed or not
    pub fn set_active_dailies(&mut self, count: u64) {
        self.active_dailies = count;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::capture(&self.state, self.active_dailies)
    }

    /// Habit tick: positive earns the tier reward, negative costs half of it
    pub fn award_rewards(&mut self, tier: Tier, is_positive: bool) -> Result<CompletionOutcome> {
        let base = rewards_for(tier);
        let reward = if is_positive { base } else { base.penalty() };
        let award = self.apply(reward);

        if is_positive {
            self.count_completion();
        }
        self.touch_streak();
        self.finish(award)
    }

    /// Completion of a habit, daily or todo
    pub fn record_completion(&mut self, kind: TaskKind, tier: Tier) -> Result<CompletionOutcome> {
        let award = self.apply(rewards_for(tier));

        self.count_completion();
        if kind == TaskKind::Daily {
            self.state.stats.dailies_completed_today += 1;
        }
        if tier.is_epic_or_higher() {
            self.state.stats.epic_tasks_completed += 1;
        }
        self.touch_streak();
        debug!(%kind, %tier, "task completed");
        self.finish(award)
    }

    /// A new task of `kind` was created
    pub fn record_created(&mut self, kind: TaskKind) -> Result<CompletionOutcome> {
        let stats = &mut self.state.stats;
        match kind {
            TaskKind::Habit => stats.habits_created += 1,
            TaskKind::Daily => stats.dailies_created += 1,
            TaskKind::Todo => stats.todos_created += 1,
        }
        self.finish(AwardOutcome::default())
    }

    /// Reset per-day counters once per calendar day
    pub fn run_daily_reset(&mut self) -> Result<bool> {
        let today = self.clock.today();
        if !daily_reset::maybe_reset(&mut self.state, today, &mut self.reset_marker) {
            return Ok(false);
        }
        save_json(&self.store, StoreKey::Player, &self.state)?;
        save_json(&self.store, StoreKey::LastReset, &self.reset_marker)?;
        Ok(true)
    }

    /// Spend gold on an artifact from the vault
    pub fn purchase(&mut self, artifact: Artifact) -> Result<OwnedArtifact> {
        let today = self.clock.today();
        let owned = vault::purchase(&mut self.state, &mut self.vault, artifact, today)?;
        save_json(&self.store, StoreKey::Player, &self.state)?;
        save_json(&self.store, StoreKey::Vault, &self.vault)?;
        Ok(owned)
    }

    /// Erase all progress and start over from defaults
    ///
    /// The subscription record is kept.
    pub fn wipe(&mut self) -> Result<()> {
        self.state = ProgressionState::default();
        self.achievements = AchievementBook::new();
        self.reset_marker = DailyResetMarker::default();
        self.vault = Vault::default();
        for key in StoreKey::PROGRESS {
            self.store.remove(key)?;
        }
        info!("progress wiped");
        Ok(())
    }

    /// Persist every record
    pub fn save(&self) -> Result<()> {
        save_json(&self.store, StoreKey::Player, &self.state)?;
        save_json(&self.store, StoreKey::Achievements, &self.achievements.to_records())?;
        save_json(&self.store, StoreKey::LastReset, &self.reset_marker)?;
        save_json(&self.store, StoreKey::Vault, &self.vault)
    }

    fn apply(&mut self, reward: Reward) -> AwardOutcome {
        leveling::award_rewards(&mut self.state, reward.xp, reward.gold, self.multipliers.as_ref())
    }

    fn count_completion(&mut self) {
        let stats = &mut self.state.stats;
        stats.total_completed += 1;
        stats.tasks_completed_today += 1;
        stats.tasks_completed_week += 1;
    }

    fn touch_streak(&mut self) {
        let today = self.clock.today();
        streaks::update_streak(&mut self.state, today);
    }

    fn finish(&mut self, reward: AwardOutcome) -> Result<CompletionOutcome> {
        let snapshot = self.snapshot();
        let newly_unlocked = self.achievements.check(&snapshot);

        // An unlock counts only once it is both persisted and returned
        if let Err(e) = self.persist_event(!newly_unlocked.is_empty()) {
            self.achievements.revert_unlocks(&newly_unlocked);
            return Err(e);
        }

        Ok(CompletionOutcome {
            reward,
            new_level: reward.leveled_up,
            newly_unlocked,
        })
    }

    fn persist_event(&self, unlocked: bool) -> Result<()> {
        save_json(&self.store, StoreKey::Player, &self.state)?;
        if unlocked {
            save_json(&self.store, StoreKey::Achievements, &self.achievements.to_records())?;
        }
        Ok(())
    }
}
