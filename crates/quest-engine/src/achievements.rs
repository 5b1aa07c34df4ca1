//! Achievement catalog and unlock tracking.
//!
//! Conditions are plain data (field + threshold) evaluated against a
//! `StatsSnapshot`. Unlocking is one-way: an unlocked entry is never
//! evaluated again, so each achievement is reported at most once.

use crate::state::{SnapshotField, StatsSnapshot};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Unlock condition, evaluated against a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// `field >= threshold`
    AtLeast { field: SnapshotField, threshold: u64 },
    /// At least one daily done today and none left outstanding
    AllDailiesCompleted,
}

impl Condition {
    pub fn is_met(&self, snapshot: &StatsSnapshot) -> bool {
        match *self {
            Condition::AtLeast { field, threshold } => snapshot.get(field) >= threshold,
            Condition::AllDailiesCompleted => {
                let done = snapshot.get(SnapshotField::DailiesCompletedToday);
                let active = snapshot.get(SnapshotField::ActiveDailies);
                done > 0 && active > 0 && done >= active
            }
        }
    }
}

const fn at_least(field: SnapshotField, threshold: u64) -> Condition {
    Condition::AtLeast { field, threshold }
}

/// Catalog entry plus its unlock flag
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Achievement {
    /// Unique identifier
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: Condition,
    pub unlocked: bool,
}

impl Achievement {
    const fn new(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        icon: &'static str,
        condition: Condition,
    ) -> Self {
        Self {
            id,
            title,
            description,
            icon,
            condition,
            unlocked: false,
        }
    }
}

use SnapshotField::*;

/// The fixed catalog, in evaluation order
pub const CATALOG: &[Achievement] = &[
    // Completion milestones
    Achievement::new("first_task", "Stellar Ignition", "Forge your first StarCore", "*", at_least(TotalCompleted, 1)),
    Achievement::new("task_master", "Cosmic Adept", "Complete 10 stellar tasks", "[10]", at_least(TotalCompleted, 10)),
    Achievement::new("task_legend", "Star Forger", "Complete 50 stellar tasks", "[50]", at_least(TotalCompleted, 50)),
    Achievement::new("task_champion", "Cosmic Master", "Complete 100 stellar tasks", "[100]", at_least(TotalCompleted, 100)),

    // Streaks
    Achievement::new("streak_starter", "Streak Starter", "Maintain a 3-day streak", "<3d>", at_least(CurrentStreak, 3)),
    Achievement::new("streak_keeper", "Streak Keeper", "Maintain a 7-day streak", "<7d>", at_least(CurrentStreak, 7)),
    Achievement::new("streak_master", "Streak Master", "Maintain a 30-day streak", "<30d>", at_least(CurrentStreak, 30)),

    // Levels
    Achievement::new("level_up", "Level Up!", "Reach level 5", "^5", at_least(Level, 5)),
    Achievement::new("high_achiever", "High Achiever", "Reach level 10", "^10", at_least(Level, 10)),

    // Habits and dailies
    Achievement::new("habit_former", "StarCore Architect", "Forge your first StarCore", "(+)", at_least(HabitsCreated, 1)),
    Achievement::new("daily_warrior", "Stellar Guardian", "Complete all daily quests in a day", "{x}", Condition::AllDailiesCompleted),

    // Special
    Achievement::new("epic_conqueror", "Nova Crusher", "Complete a Nova-tier task or higher", "!!", at_least(EpicTasksCompleted, 1)),
    Achievement::new("productive_day", "Stellar Surge", "Complete 5 tasks in a single cosmic day", "~5~", at_least(TasksCompletedToday, 5)),
    Achievement::new("gold_collector", "Orb Harvester", "Accumulate 500 cosmic orbs", "$500", at_least(Gold, 500)),
    Achievement::new("xp_hunter", "Stardust Collector", "Accumulate 1000 total stardust", "xp1k", at_least(TotalXp, 1000)),
];

/// Persisted unlock flag for one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: String,
    #[serde(default)]
    pub unlocked: bool,
}

/// The catalog with per-user unlock state
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementBook {
    entries: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    /// Fresh book with everything locked
    pub fn new() -> Self {
        Self {
            entries: CATALOG.to_vec(),
        }
    }

    /// Book with unlock flags taken from persisted records
    ///
    /// Records for ids not in the catalog are ignored; catalog entries with
    /// no record start locked.
    pub fn from_records(records: &[AchievementRecord]) -> Self {
        let mut book = Self::new();
        book.merge_persisted(records);
        book
    }

    pub fn merge_persisted(&mut self, records: &[AchievementRecord]) {
        for ach in &mut self.entries {
            if records.iter().any(|r| r.id == ach.id && r.unlocked) {
                ach.unlocked = true;
            }
        }
    }

    pub fn to_records(&self) -> Vec<AchievementRecord> {
        self.entries
            .iter()
            .map(|a| AchievementRecord {
                id: a.id.to_string(),
                unlocked: a.unlocked,
            })
            .collect()
    }

    /// Unlock every locked entry whose condition holds; returns the new ones
    pub fn check(&mut self, snapshot: &StatsSnapshot) -> Vec<Achievement> {
        let mut newly = Vec::new();
        for ach in self.entries.iter_mut().filter(|a| !a.unlocked) {
            if ach.condition.is_met(snapshot) {
                ach.unlocked = true;
                info!(id = ach.id, "achievement unlocked");
                newly.push(ach.clone());
            }
        }
        newly
    }

    /// Lock `unlocked` again so the next check reports them
    pub fn revert_unlocks(&mut self, unlocked: &[Achievement]) {
        for ach in &mut self.entries {
            if unlocked.iter().any(|u| u.id == ach.id) {
                ach.unlocked = false;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.get(id).map(|a| a.unlocked).unwrap_or(false)
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-line unlock notification
pub fn format_unlock(ach: &Achievement) -> String {
    format!("{} Achievement unlocked: {} - {}", ach.icon, ach.title, ach.description)
}
