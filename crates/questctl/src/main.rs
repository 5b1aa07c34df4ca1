//! questctl - command-line front end for the Questmaster progression engine
//!
//! Records task completions and habit ticks, and shows level, streak and
//! achievement progress.

mod commands;
mod config;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::QuestConfig;
use quest_engine::{Artifact, JsonFileStore, Plan, QuestEngine, SystemClock, TaskKind};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "questctl")]
#[command(about = "Questmaster - gamified habits, dailies and todos", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding progression records
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/questmaster/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Complete a habit, daily or todo
    Complete {
        /// habit, daily or todo
        kind: TaskKind,

        /// easy, medium, hard, epic, legendary or cosmic (unknown = easy)
        tier: String,

        /// Dailies scheduled for today
        #[arg(long)]
        active_dailies: Option<u64>,
    },

    /// Tick a habit up (or down with --negative)
    Habit {
        tier: String,

        #[arg(long)]
        negative: bool,
    },

    /// Record that a new task was created
    Create { kind: TaskKind },

    /// Run the daily reset of per-day counters
    Reset,

    /// Show level, XP, gold, streak and counters
    Stats,

    /// List achievements
    Achievements,

    /// Set the subscription plan used for reward multipliers
    Plan { plan: Plan },

    /// Buy an artifact with gold (booster, shield or nova)
    Buy { artifact: Artifact },

    /// List owned artifacts and prices
    Vault,

    /// Erase all progress (the subscription plan is kept)
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn init_logging(config: &QuestConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = QuestConfig::load(cli.config.as_deref())?;
    init_logging(&config);

    let data_dir = config.resolve_data_dir(cli.data_dir)?;
    debug!(data_dir = %data_dir.display(), "opening store");

    let store = JsonFileStore::new(data_dir);
    let mut engine = QuestEngine::open_with_subscription(store, SystemClock);

    if !matches!(cli.command, Commands::Reset | Commands::Wipe { .. }) {
        engine.run_daily_reset()?;
    }

    match cli.command {
        Commands::Complete { kind, tier, active_dailies } => {
            commands::complete(&mut engine, kind, &tier, active_dailies)
        }
        Commands::Habit { tier, negative } => commands::habit(&mut engine, &tier, negative),
        Commands::Create { kind } => commands::create(&mut engine, kind),
        Commands::Reset => commands::reset(&mut engine),
        Commands::Stats => commands::stats(&engine),
        Commands::Achievements => commands::achievements(&engine),
        Commands::Plan { plan } => commands::plan(&mut engine, plan),
        Commands::Buy { artifact } => commands::buy(&mut engine, artifact),
        Commands::Vault => commands::vault(&engine),
        Commands::Wipe { yes } => commands::wipe(&mut engine, yes),
    }
}
