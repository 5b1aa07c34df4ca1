//! Plain-text output for questctl.

use owo_colors::OwoColorize;
use quest_engine::leveling::{progress_to_next, xp_needed};
use quest_engine::{format_unlock, AchievementBook, Artifact, CompletionOutcome, ProgressionState, Vault};

/// Print key-value pair
fn print_kv(key: &str, value: &str, width: usize) {
    println!("{:width$} {}", key, value, width = width);
}

/// ASCII progress bar, e.g. `[#####-----]`
pub fn xp_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn signed(value: i64) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

pub fn print_outcome(outcome: &CompletionOutcome) {
    let reward = &outcome.reward;
    if reward.xp != 0 || reward.gold != 0 {
        println!("{} xp  {} gold", signed(reward.xp), signed(reward.gold));
    }
    if let Some(level) = outcome.new_level {
        println!("{}", format!("Level up! You've reached level {}", level).bold());
    }
    for ach in &outcome.newly_unlocked {
        println!("{}", format_unlock(ach).green());
    }
}

pub fn print_stats(state: &ProgressionState) {
    let kw = 22;
    println!("{}", "questmaster stats".bold());
    print_kv(
        "level",
        &format!(
            "{}  {} {}/{}",
            state.level,
            xp_bar(progress_to_next(state), 20),
            state.xp,
            xp_needed(state.level)
        ),
        kw,
    );
    print_kv("total_xp", &state.total_xp.to_string(), kw);
    print_kv("gold", &state.gold.to_string(), kw);
    print_kv(
        "streak",
        &format!("{} cycles (best {})", state.current_streak, state.best_streak),
        kw,
    );
    if let Some(last) = state.last_active_date {
        print_kv("last_active", &last.to_string(), kw);
    }

    let s = &state.stats;
    println!();
    print_kv("total_completed", &s.total_completed.to_string(), kw);
    print_kv("completed_today", &s.tasks_completed_today.to_string(), kw);
    print_kv("completed_week", &s.tasks_completed_week.to_string(), kw);
    print_kv("dailies_today", &s.dailies_completed_today.to_string(), kw);
    print_kv("epic_completed", &s.epic_tasks_completed.to_string(), kw);
    print_kv(
        "created",
        &format!(
            "{} habits, {} dailies, {} todos",
            s.habits_created, s.dailies_created, s.todos_created
        ),
        kw,
    );
}

pub fn print_achievements(book: &AchievementBook) {
    println!(
        "{} {}/{}",
        "achievements".bold(),
        book.unlocked_count(),
        book.len()
    );
    for ach in book.iter() {
        let line = format!("{:6} {:20} {}", ach.icon, ach.title, ach.description);
        if ach.unlocked {
            println!("  {}", line.green());
        } else {
            println!("  {}", line.dimmed());
        }
    }
}

pub fn print_vault(vault: &Vault, gold: i64) {
    println!("{} {} gold", "vault".bold(), gold);
    for artifact in Artifact::ALL {
        let line = format!(
            "{:8} {:>4} gold  owned {}",
            artifact.as_str(),
            artifact.cost(),
            vault.count(artifact)
        );
        if gold >= artifact.cost() {
            println!("  {}", line);
        } else {
            println!("  {}", line.dimmed());
        }
    }
}
