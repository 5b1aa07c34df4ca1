//! Reward table: difficulty tier -> base XP and gold.
//!
//! Six fixed tiers ordered by increasing magnitude. Parsing is lenient:
//! anything unrecognised is treated as the easiest tier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Difficulty bucket of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
    Epic,
    Legendary,
    Cosmic,
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Easy,
        Tier::Medium,
        Tier::Hard,
        Tier::Epic,
        Tier::Legendary,
        Tier::Cosmic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
            Tier::Epic => "epic",
            Tier::Legendary => "legendary",
            Tier::Cosmic => "cosmic",
        }
    }

    /// Display label shown next to a task
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Easy => "Spark",
            Tier::Medium => "Ember",
            Tier::Hard => "Flame",
            Tier::Epic => "Nova",
            Tier::Legendary => "Supernova",
            Tier::Cosmic => "Cosmic",
        }
    }

    /// Epic, legendary and cosmic count toward `epicTasksCompleted`
    pub fn is_epic_or_higher(&self) -> bool {
        matches!(self, Tier::Epic | Tier::Legendary | Tier::Cosmic)
    }

    /// Parse a tier name, falling back to `Easy` for unknown input
    pub fn parse_lenient(s: &str) -> Tier {
        s.parse().unwrap_or_else(|_| {
            debug!(input = s, "unknown difficulty tier, using easy");
            Tier::Easy
        })
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Easy
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Tier::Easy),
            "medium" => Ok(Tier::Medium),
            "hard" => Ok(Tier::Hard),
            "epic" => Ok(Tier::Epic),
            "legendary" => Ok(Tier::Legendary),
            "cosmic" => Ok(Tier::Cosmic),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

/// Base XP and gold for one action, before multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: i64,
    pub gold: i64,
}

impl Reward {
    pub const fn new(xp: i64, gold: i64) -> Self {
        Self { xp, gold }
    }

    /// Penalty for a negative habit tick: half of each component, negated
    pub fn penalty(&self) -> Reward {
        Reward {
            xp: -self.xp.div_euclid(2),
            gold: -self.gold.div_euclid(2),
        }
    }
}

/// Base reward for a tier
pub fn rewards_for(tier: Tier) -> Reward {
    match tier {
        Tier::Easy => Reward::new(10, 5),
        Tier::Medium => Reward::new(20, 10),
        Tier::Hard => Reward::new(30, 15),
        Tier::Epic => Reward::new(40, 20),
        Tier::Legendary => Reward::new(50, 25),
        Tier::Cosmic => Reward::new(70, 35),
    }
}
