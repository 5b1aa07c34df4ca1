//! Player progression record and the flattened snapshot achievements read.
//!
//! The persisted shape is a flat camelCase JSON record. Every field has a
//! default so records written by older builds load by merging onto defaults.

use crate::leveling::MAX_LEVEL;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Named per-player counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_completed: u64,
    pub tasks_completed_today: u64,
    pub tasks_completed_week: u64,
    pub habits_created: u64,
    pub dailies_created: u64,
    pub todos_created: u64,
    pub epic_tasks_completed: u64,
    pub dailies_completed_today: u64,
}

/// Aggregate progression state for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionState {
    pub level: u32,
    /// Progress within the current level
    pub xp: i64,
    /// Lifetime XP, never decreases
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub gold: i64,
    pub current_streak: u32,
    pub best_streak: u32,
    #[serde(deserialize_with = "lenient_date")]
    pub last_active_date: Option<NaiveDate>,
    pub stats: Stats,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_xp: 0,
            gold: 0,
            current_streak: 0,
            best_streak: 0,
            last_active_date: None,
            stats: Stats::default(),
        }
    }
}

impl ProgressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore invariants on a record loaded from storage
    pub fn normalize(&mut self) {
        self.level = self.level.clamp(1, MAX_LEVEL);
        self.xp = self.xp.max(0);
        self.total_xp = self.total_xp.max(0);
        self.gold = self.gold.max(0);
        self.best_streak = self.best_streak.max(self.current_streak);
    }
}

/// Unparseable dates load as `None` instead of failing the whole record
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

/// Field of a snapshot an achievement condition can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotField {
    TotalCompleted,
    TasksCompletedToday,
    TasksCompletedWeek,
    HabitsCreated,
    DailiesCreated,
    TodosCreated,
    EpicTasksCompleted,
    DailiesCompletedToday,
    Level,
    Gold,
    #[serde(rename = "totalXP")]
    TotalXp,
    CurrentStreak,
    ActiveDailies,
}

/// Read-only flattened view of counters and progression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub stats: Stats,
    pub level: u32,
    pub xp: i64,
    pub gold: i64,
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Supplied by the host: dailies scheduled for today
    pub active_dailies: u64,
}

impl StatsSnapshot {
    pub fn capture(state: &ProgressionState, active_dailies: u64) -> Self {
        Self {
            stats: state.stats.clone(),
            level: state.level,
            xp: state.xp,
            gold: state.gold,
            total_xp: state.total_xp,
            current_streak: state.current_streak,
            best_streak: state.best_streak,
            active_dailies,
        }
    }

    pub fn get(&self, field: SnapshotField) -> u64 {
        match field {
            SnapshotField::TotalCompleted => self.stats.total_completed,
            SnapshotField::TasksCompletedToday => self.stats.tasks_completed_today,
            SnapshotField::TasksCompletedWeek => self.stats.tasks_completed_week,
            SnapshotField::HabitsCreated => self.stats.habits_created,
            SnapshotField::DailiesCreated => self.stats.dailies_created,
            SnapshotField::TodosCreated => self.stats.todos_created,
            SnapshotField::EpicTasksCompleted => self.stats.epic_tasks_completed,
            SnapshotField::DailiesCompletedToday => self.stats.dailies_completed_today,
            SnapshotField::Level => u64::from(self.level),
            SnapshotField::Gold => self.gold.max(0) as u64,
            SnapshotField::TotalXp => self.total_xp.max(0) as u64,
            SnapshotField::CurrentStreak => u64::from(self.current_streak),
            SnapshotField::ActiveDailies => self.active_dailies,
        }
    }
}
