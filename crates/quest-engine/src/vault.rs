//! Gold shop.
//!
//! Artifacts are bought with gold at fixed prices and kept in a persisted
//! inventory. A purchase either debits the full cost or changes nothing.

use crate::error::{QuestError, Result};
use crate::state::{lenient_date, ProgressionState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Things the vault sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Artifact {
    Booster,
    Shield,
    Nova,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Booster, Artifact::Shield, Artifact::Nova];

    pub fn as_str(&self) -> &'static str {
        match self {
            Artifact::Booster => "booster",
            Artifact::Shield => "shield",
            Artifact::Nova => "nova",
        }
    }

    /// Price in gold
    pub fn cost(&self) -> i64 {
        match self {
            Artifact::Booster => 100,
            Artifact::Shield => 150,
            Artifact::Nova => 200,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Artifact {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "booster" => Ok(Artifact::Booster),
            "shield" => Ok(Artifact::Shield),
            "nova" => Ok(Artifact::Nova),
            other => Err(format!("unknown artifact: {}", other)),
        }
    }
}

/// One purchased artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedArtifact {
    #[serde(rename = "type")]
    pub artifact: Artifact,
    #[serde(default, deserialize_with = "lenient_date")]
    pub purchased_at: Option<NaiveDate>,
    #[serde(default)]
    pub used: bool,
}

/// Persisted inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vault {
    pub artifacts: Vec<OwnedArtifact>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned artifacts of `kind`
    pub fn count(&self, kind: Artifact) -> usize {
        self.artifacts.iter().filter(|a| a.artifact == kind).count()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Buy `artifact` with the player's gold
///
/// Fails with [`QuestError::InsufficientGold`] when the balance is short;
/// neither the state nor the vault is touched in that case.
pub fn purchase(
    state: &mut ProgressionState,
    vault: &mut Vault,
    artifact: Artifact,
    today: NaiveDate,
) -> Result<OwnedArtifact> {
    let cost = artifact.cost();
    if state.gold < cost {
        return Err(QuestError::InsufficientGold {
            needed: cost,
            available: state.gold,
        });
    }

    state.gold -= cost;
    let owned = OwnedArtifact {
        artifact,
        purchased_at: Some(today),
        used: false,
    };
    vault.artifacts.push(owned.clone());
    info!(%artifact, cost, gold = state.gold, "artifact purchased");
    Ok(owned)
}
