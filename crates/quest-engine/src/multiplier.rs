//! Reward multipliers supplied by the subscription tier.
//!
//! The engine only consumes the two factors; plan management and billing
//! live elsewhere.

use serde::{Deserialize, Serialize};

/// Source of XP and gold scaling factors
pub trait MultiplierSource {
    fn xp_multiplier(&self) -> f64;
    fn gold_multiplier(&self) -> f64;
}

/// Multiplier source used when no subscription state is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMultiplier;

impl MultiplierSource for NoMultiplier {
    fn xp_multiplier(&self) -> f64 {
        1.0
    }

    fn gold_multiplier(&self) -> f64 {
        1.0
    }
}

/// Fixed pair of factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMultiplier {
    pub xp: f64,
    pub gold: f64,
}

impl MultiplierSource for FixedMultiplier {
    fn xp_multiplier(&self) -> f64 {
        self.xp
    }

    fn gold_multiplier(&self) -> f64 {
        self.gold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Premium,
    Enterprise,
}

impl Default for Plan {
    fn default() -> Self {
        Plan::Free
    }
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Premium => "premium",
            Plan::Enterprise => "enterprise",
        }
    }

    /// Benefits granted by this plan while active
    pub fn benefits(&self) -> Benefits {
        match self {
            Plan::Free => Benefits::default(),
            Plan::Premium => Benefits {
                xp_multiplier: 1.5,
                gold_multiplier: 1.5,
            },
            Plan::Enterprise => Benefits {
                xp_multiplier: 2.0,
                gold_multiplier: 2.0,
            },
        }
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "premium" => Ok(Plan::Premium),
            "enterprise" => Ok(Plan::Enterprise),
            other => Err(format!("unknown plan: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefits {
    #[serde(default = "one")]
    pub xp_multiplier: f64,
    #[serde(default = "one")]
    pub gold_multiplier: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for Benefits {
    fn default() -> Self {
        Self {
            xp_multiplier: 1.0,
            gold_multiplier: 1.0,
        }
    }
}

/// Persisted subscription record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub benefits: Benefits,
}

impl Subscription {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            status: SubscriptionStatus::Active,
            benefits: plan.benefits(),
        }
    }

    pub fn is_premium(&self) -> bool {
        self.plan != Plan::Free && self.status == SubscriptionStatus::Active
    }

    fn factor(&self, value: f64) -> f64 {
        if !self.is_premium() || !value.is_finite() {
            return 1.0;
        }
        value.max(0.0)
    }
}

impl MultiplierSource for Subscription {
    fn xp_multiplier(&self) -> f64 {
        self.factor(self.benefits.xp_multiplier)
    }

    fn gold_multiplier(&self) -> f64 {
        self.factor(self.benefits.gold_multiplier)
    }
}
