//! questctl command handlers

use crate::display;
use anyhow::{bail, Context, Result};
use quest_engine::store::save_json;
use quest_engine::{
    Artifact, Clock, Plan, QuestEngine, QuestError, Store, StoreKey, Subscription, TaskKind, Tier,
};
use tracing::info;

pub fn complete<S: Store, C: Clock>(
    engine: &mut QuestEngine<S, C>,
    kind: TaskKind,
    tier: &str,
    active_dailies: Option<u64>,
) -> Result<()> {
    if let Some(n) = active_dailies {
        engine.set_active_dailies(n);
    }
    let tier = Tier::parse_lenient(tier);
    let outcome = engine
        .record_completion(kind, tier)
        .context("Failed to record completion")?;

    println!("Completed {} ({})", kind, tier.label());
    if kind.removed_on_completion() {
        println!("The {} is done and can be removed from your list", kind);
    }
    display::print_outcome(&outcome);
    Ok(())
}

pub fn habit<S: Store, C: Clock>(engine: &mut QuestEngine<S, C>, tier: &str, negative: bool) -> Result<()> {
    let tier = Tier::parse_lenient(tier);
    let outcome = engine
        .award_rewards(tier, !negative)
        .context("Failed to record habit tick")?;

    let sign = if negative { "-" } else { "+" };
    println!("Habit {} ({})", sign, tier.label());
    display::print_outcome(&outcome);
    Ok(())
}

pub fn create<S: Store, C: Clock>(engine: &mut QuestEngine<S, C>, kind: TaskKind) -> Result<()> {
    let outcome = engine
        .record_created(kind)
        .context("Failed to record task creation")?;
    println!("Created {}", kind);
    display::print_outcome(&outcome);
    Ok(())
}

pub fn reset<S: Store, C: Clock>(engine: &mut QuestEngine<S, C>) -> Result<()> {
    let ran = engine.run_daily_reset().context("Failed to run daily reset")?;
    match (ran, engine.reset_marker().last_reset()) {
        (true, _) => println!("Daily counters reset"),
        (false, Some(day)) => println!("Already reset on {}", day),
        (false, None) => println!("Nothing to reset"),
    }
    Ok(())
}

pub fn stats<S: Store, C: Clock>(engine: &QuestEngine<S, C>) -> Result<()> {
    display::print_stats(engine.state());
    Ok(())
}

pub fn achievements<S: Store, C: Clock>(engine: &QuestEngine<S, C>) -> Result<()> {
    display::print_achievements(engine.achievements());
    Ok(())
}

pub fn plan<S: Store, C: Clock>(engine: &mut QuestEngine<S, C>, plan: Plan) -> Result<()> {
    let subscription = Subscription::new(plan);
    save_json(engine.store(), StoreKey::Subscription, &subscription)
        .context("Failed to save subscription")?;
    info!(plan = plan.as_str(), "subscription plan changed");

    let benefits = subscription.benefits;
    engine.set_multipliers(Box::new(subscription));
    println!(
        "Plan set to {} (xp x{}, gold x{})",
        plan.as_str(),
        benefits.xp_multiplier,
        benefits.gold_multiplier
    );
    Ok(())
}

pub fn buy<S: Store, C: Clock>(engine: &mut QuestEngine<S, C>, artifact: Artifact) -> Result<()> {
    match engine.purchase(artifact) {
        Ok(_) => {
            println!(
                "Acquired {} for {} gold ({} left)",
                artifact,
                artifact.cost(),
                engine.state().gold
            );
            Ok(())
        }
        Err(QuestError::InsufficientGold { needed, available }) => {
            bail!("Not enough gold for {}: need {}, have {}", artifact, needed, available)
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to save purchase")),
    }
}

pub fn vault<S: Store, C: Clock>(engine: &QuestEngine<S, C>) -> Result<()> {
    display::print_vault(engine.vault(), engine.state().gold);
    Ok(())
}

pub fn wipe<S: Store, C: Clock>(engine: &mut QuestEngine<S, C>, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("This erases level, gold, streaks, achievements and the vault. Re-run with --yes");
    }
    engine.wipe().context("Failed to wipe progress")?;
    println!("All progress has been reset");
    Ok(())
}
