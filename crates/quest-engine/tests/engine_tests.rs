//! End-to-end tests for the engine facade.

use chrono::NaiveDate;
use quest_engine::multiplier::FixedMultiplier;
use quest_engine::{
    Artifact, ManualClock, MemoryStore, NoMultiplier, ProgressionState, QuestEngine, QuestError,
    StoreKey, TaskKind, Tier, MAX_LEVEL,
};

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

fn open<'a>(store: &'a MemoryStore, clock: &'a ManualClock) -> QuestEngine<&'a MemoryStore, &'a ManualClock> {
    QuestEngine::open(store, clock, Box::new(NoMultiplier))
}

fn seed_player(store: &MemoryStore, state: &ProgressionState) {
    store.insert(StoreKey::Player, serde_json::to_string(state).unwrap());
}

#[test]
fn test_hard_task_scenario() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    let out = eng.record_completion(TaskKind::Todo, Tier::Hard).unwrap();

    let state = eng.state();
    assert_eq!(state.xp, 30);
    assert_eq!(state.gold, 15);
    assert_eq!(state.total_xp, 30);
    assert_eq!(state.level, 1);
    assert!(out.new_level.is_none());
}

#[test]
fn test_level_up_scenario() {
    let store = MemoryStore::new();
    seed_player(&store, &ProgressionState { xp: 95, ..Default::default() });
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    let out = eng.record_completion(TaskKind::Daily, Tier::Easy).unwrap();

    assert_eq!(out.new_level, Some(2));
    assert_eq!(eng.state().level, 2);
    assert_eq!(eng.state().xp, 5);
}

#[test]
fn test_negative_habit_scenario() {
    let store = MemoryStore::new();
    seed_player(
        &store,
        &ProgressionState {
            gold: 3,
            xp: 40,
            total_xp: 40,
            ..Default::default()
        },
    );
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    let out = eng.award_rewards(Tier::Medium, false).unwrap();

    assert_eq!(out.reward.xp, -10);
    assert_eq!(out.reward.gold, -5);
    assert_eq!(eng.state().gold, 0);
    assert_eq!(eng.state().xp, 30);
    assert_eq!(eng.state().total_xp, 40);
}

#[test]
fn test_first_task_reported_once() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    let first = eng.award_rewards(Tier::Easy, true).unwrap();
    assert!(first.newly_unlocked.iter().any(|a| a.id == "first_task"));

    let second = eng.award_rewards(Tier::Easy, true).unwrap();
    assert_eq!(eng.state().stats.total_completed, 2);
    assert!(second.newly_unlocked.iter().all(|a| a.id != "first_task"));
}

#[test]
fn test_unlocks_survive_reopen() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    {
        let mut eng = open(&store, &clock);
        eng.record_completion(TaskKind::Todo, Tier::Epic).unwrap();
        assert!(eng.achievements().is_unlocked("epic_conqueror"));
    }

    let mut eng = open(&store, &clock);
    assert!(eng.achievements().is_unlocked("first_task"));
    assert!(eng.achievements().is_unlocked("epic_conqueror"));

    let out = eng.record_completion(TaskKind::Todo, Tier::Epic).unwrap();
    assert!(out.newly_unlocked.is_empty());
    assert_eq!(eng.state().stats.epic_tasks_completed, 2);
}

#[test]
fn test_achievements_not_rewritten_without_unlock() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    eng.record_completion(TaskKind::Todo, Tier::Easy).unwrap();
    let saved = store.get(StoreKey::Achievements).unwrap();

    // Tamper with the stored record; with no new unlock it must not be rewritten
    store.insert(StoreKey::Achievements, "[]");
    eng.record_completion(TaskKind::Todo, Tier::Easy).unwrap();
    assert_eq!(store.get(StoreKey::Achievements).unwrap(), "[]");
    assert!(saved.contains("first_task"));
}

#[test]
fn test_streak_across_days() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    for _ in 0..3 {
        eng.run_daily_reset().unwrap();
        eng.record_completion(TaskKind::Daily, Tier::Easy).unwrap();
        eng.record_completion(TaskKind::Daily, Tier::Easy).unwrap();
        clock.advance_days(1);
    }

    assert_eq!(eng.state().current_streak, 3);
    assert_eq!(eng.state().best_streak, 3);
    assert!(eng.achievements().is_unlocked("streak_starter"));
    assert!(!eng.achievements().is_unlocked("streak_keeper"));
}

#[test]
fn test_daily_reset_via_engine() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    assert!(eng.run_daily_reset().unwrap());
    eng.record_completion(TaskKind::Daily, Tier::Hard).unwrap();
    assert!(!eng.run_daily_reset().unwrap());
    assert_eq!(eng.state().stats.tasks_completed_today, 1);

    clock.advance_days(1);
    assert!(eng.run_daily_reset().unwrap());
    assert_eq!(eng.state().stats.tasks_completed_today, 0);
    assert_eq!(eng.state().stats.dailies_completed_today, 0);
    assert_eq!(eng.state().current_streak, 1);

    clock.advance_days(2);
    assert!(eng.run_daily_reset().unwrap());
    assert_eq!(eng.state().current_streak, 0);
    assert_eq!(eng.state().best_streak, 1);
    assert_eq!(eng.state().stats.total_completed, 1);
}

#[test]
fn test_reset_marker_persisted() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    {
        let mut eng = open(&store, &clock);
        assert!(eng.run_daily_reset().unwrap());
    }
    let mut eng = open(&store, &clock);
    assert_eq!(eng.reset_marker().last_reset(), Some(start_day()));
    assert!(!eng.run_daily_reset().unwrap());
}

#[test]
fn test_all_dailies_completed() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    // Two dailies scheduled for today
    eng.set_active_dailies(2);
    let out = eng.record_completion(TaskKind::Daily, Tier::Easy).unwrap();
    assert!(out.newly_unlocked.iter().all(|a| a.id != "daily_warrior"));

    let out = eng.record_completion(TaskKind::Daily, Tier::Easy).unwrap();
    assert!(out.newly_unlocked.iter().any(|a| a.id == "daily_warrior"));
}

#[test]
fn test_productive_day() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    for _ in 0..4 {
        eng.award_rewards(Tier::Easy, true).unwrap();
    }
    assert!(!eng.achievements().is_unlocked("productive_day"));
    let out = eng.record_completion(TaskKind::Habit, Tier::Easy).unwrap();
    assert!(out.newly_unlocked.iter().any(|a| a.id == "productive_day"));
}

#[test]
fn test_multiplier_source_applied() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = QuestEngine::open(&store, &clock, Box::new(FixedMultiplier { xp: 2.0, gold: 1.5 }));

    let out = eng.record_completion(TaskKind::Todo, Tier::Easy).unwrap();
    assert_eq!(out.reward.xp, 20);
    assert_eq!(out.reward.gold, 7);
    assert_eq!(eng.state().total_xp, 20);
}

#[test]
fn test_subscription_loaded_from_store() {
    let store = MemoryStore::new();
    store.insert(
        StoreKey::Subscription,
        r#"{"plan":"enterprise","status":"active","benefits":{"xpMultiplier":2.0,"goldMultiplier":2.0}}"#,
    );
    let clock = ManualClock::new(start_day());
    let mut eng = QuestEngine::open_with_subscription(&store, &clock);

    let out = eng.record_completion(TaskKind::Todo, Tier::Medium).unwrap();
    assert_eq!(out.reward.xp, 40);
    assert_eq!(out.reward.gold, 20);
}

#[test]
fn test_malformed_records_fall_back() {
    let store = MemoryStore::new();
    store.insert(StoreKey::Player, "corrupted");
    store.insert(StoreKey::Achievements, "{\"nope\": 1}");
    store.insert(StoreKey::LastReset, "42");
    let clock = ManualClock::new(start_day());

    let eng = open(&store, &clock);
    assert_eq!(eng.state(), &ProgressionState::default());
    assert_eq!(eng.achievements().unlocked_count(), 0);
    assert!(eng.reset_marker().last_reset().is_none());
}

#[test]
fn test_old_record_missing_fields() {
    let store = MemoryStore::new();
    store.insert(
        StoreKey::Player,
        r#"{"level": 3, "xp": 12, "totalXP": 300, "gold": 40, "stats": {"totalCompleted": 9}}"#,
    );
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    assert_eq!(eng.state().level, 3);
    assert_eq!(eng.state().stats.tasks_completed_week, 0);

    let out = eng.record_completion(TaskKind::Todo, Tier::Easy).unwrap();
    assert_eq!(eng.state().stats.total_completed, 10);
    assert!(out.newly_unlocked.iter().any(|a| a.id == "task_master"));
}

#[test]
fn test_snapshot_view() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);
    eng.set_active_dailies(3);
    eng.record_completion(TaskKind::Habit, Tier::Legendary).unwrap();

    let snap = eng.snapshot();
    assert_eq!(snap.active_dailies, 3);
    assert_eq!(snap.total_xp, 50);
    assert_eq!(snap.gold, 25);
    assert_eq!(snap.stats.epic_tasks_completed, 1);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["totalCompleted"], 1);
    assert_eq!(json["activeDailies"], 3);
}

#[test]
fn test_huge_stored_level_is_capped() {
    let store = MemoryStore::new();
    store.insert(StoreKey::Player, r#"{"level":4294967295,"xp":0}"#);
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);
    assert_eq!(eng.state().level, MAX_LEVEL);

    let out = eng.record_completion(TaskKind::Todo, Tier::Cosmic).unwrap();
    assert_eq!(eng.state().level, MAX_LEVEL);
    assert_eq!(eng.state().xp, 70);
    assert!(out.new_level.is_none());
}

#[test]
fn test_purchase_spends_gold_and_persists() {
    let store = MemoryStore::new();
    seed_player(
        &store,
        &ProgressionState {
            gold: 250,
            ..Default::default()
        },
    );
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);

    let owned = eng.purchase(Artifact::Shield).unwrap();
    assert_eq!(owned.purchased_at, Some(start_day()));
    assert_eq!(eng.state().gold, 100);

    let err = eng.purchase(Artifact::Nova).unwrap_err();
    assert!(matches!(err, QuestError::InsufficientGold { needed: 200, available: 100 }));
    assert_eq!(eng.state().gold, 100);

    eng.purchase(Artifact::Booster).unwrap();
    assert_eq!(eng.state().gold, 0);

    let eng = open(&store, &clock);
    assert_eq!(eng.state().gold, 0);
    assert_eq!(eng.vault().len(), 2);
    assert_eq!(eng.vault().count(Artifact::Shield), 1);
}

#[test]
fn test_wipe_clears_progress_but_keeps_plan() {
    let store = MemoryStore::new();
    store.insert(
        StoreKey::Subscription,
        r#"{"plan":"premium","status":"active","benefits":{"xpMultiplier":1.5,"goldMultiplier":1.5}}"#,
    );
    let clock = ManualClock::new(start_day());
    let mut eng = open(&store, &clock);
    for _ in 0..12 {
        eng.record_completion(TaskKind::Todo, Tier::Legendary).unwrap();
    }
    eng.purchase(Artifact::Booster).unwrap();
    eng.run_daily_reset().unwrap();

    eng.wipe().unwrap();
    assert_eq!(eng.state(), &ProgressionState::default());
    assert_eq!(eng.achievements().unlocked_count(), 0);
    assert!(eng.vault().is_empty());
    for key in StoreKey::PROGRESS {
        assert!(store.get(key).is_none(), "{:?} survived the wipe", key);
    }
    assert!(store.get(StoreKey::Subscription).is_some());

    let out = eng.record_completion(TaskKind::Todo, Tier::Easy).unwrap();
    assert_eq!(out.newly_unlocked[0].id, "first_task");
}
