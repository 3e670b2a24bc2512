//! # Creator Tiers
//!
//! Audience-size classification and the multiplier table that scales supply,
//! price, rewards and milestone thresholds.
//!
//! Tiers are assigned upstream by creator verification; this module only
//! resolves a label to its multiplier row.
//!
//! ## Presets
//!
//! | Tier | Standard (supply/price/rewards/bonus) | Conservative |
//! |------|----------------------------------------|--------------|
//! | nano | 1 / 1 / 1 / 1 | 1 / 1 / 1 / 1 |
//! | micro | 2.5 / 1.5 / 1.2 / 1.2 | 2 / 1.5 / 1.3 / 1.2 |
//! | macro | 6 / 2.5 / 1.5 / 1.5 | 5 / 2 / 1.7 / 1.5 |
//! | mega | 12 / 4 / 2 / 2 | 10 / 3 / 2.5 / 2 |
//! | celebrity | 20 / 6 / 2.5 / 3 | 15 / 4 / 2.8 / 2.5 |

use crate::error::{Result, TokenomicsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Creator tier, ordered by audience size
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Nano: smallest audiences
    Nano,
    /// Micro
    Micro,
    /// Macro
    Macro,
    /// Mega
    Mega,
    /// Celebrity: largest audiences
    Celebrity,
}

impl Tier {
    /// All tiers, smallest first
    pub const ALL: [Tier; 5] = [
        Tier::Nano,
        Tier::Micro,
        Tier::Macro,
        Tier::Mega,
        Tier::Celebrity,
    ];

    /// Get tier label
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nano => "nano",
            Self::Micro => "micro",
            Self::Macro => "macro",
            Self::Mega => "mega",
            Self::Celebrity => "celebrity",
        }
    }

    /// Resolve a label, falling back to nano for anything unrecognized
    pub fn resolve(label: &str) -> Self {
        match label.parse() {
            Ok(tier) => tier,
            Err(_) => {
                tracing::warn!("Unrecognized tier label {:?}, using nano", label);
                Self::Nano
            }
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = TokenomicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nano" => Ok(Self::Nano),
            "micro" => Ok(Self::Micro),
            "macro" => Ok(Self::Macro),
            "mega" => Ok(Self::Mega),
            "celebrity" => Ok(Self::Celebrity),
            _ => Err(TokenomicsError::UnknownTier(s.to_string())),
        }
    }
}

/// Multiplier row for one tier
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierMultiplier {
    /// Supply multiplier
    pub supply: f64,
    /// Launch price multiplier
    pub price: f64,
    /// Milestone reward multiplier
    pub rewards: f64,
    /// Milestone holder-threshold multiplier
    #[serde(default = "default_milestone_bonus", alias = "milestoneBonus")]
    pub milestone_bonus: f64,
}

fn default_milestone_bonus() -> f64 {
    1.0
}

impl TierMultiplier {
    /// Create a multiplier row
    pub const fn new(supply: f64, price: f64, rewards: f64, milestone_bonus: f64) -> Self {
        Self {
            supply,
            price,
            rewards,
            milestone_bonus,
        }
    }

    /// Row that leaves every quantity unscaled
    pub const fn identity() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    fn check(&self, tier: Tier) -> Result<()> {
        let fields = [
            ("supply", self.supply),
            ("price", self.price),
            ("rewards", self.rewards),
            ("milestone_bonus", self.milestone_bonus),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(TokenomicsError::InvalidConfig(format!(
                    "tier {} {} must be finite and positive, got {}",
                    tier, name, value
                )));
            }
        }
        Ok(())
    }
}

/// Multiplier table, one row per tier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub nano: TierMultiplier,
    pub micro: TierMultiplier,
    #[serde(rename = "macro")]
    pub macro_tier: TierMultiplier,
    pub mega: TierMultiplier,
    pub celebrity: TierMultiplier,
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TierTable {
    /// Standard preset
    pub fn standard() -> Self {
        Self {
            nano: TierMultiplier::new(1.0, 1.0, 1.0, 1.0),
            micro: TierMultiplier::new(2.5, 1.5, 1.2, 1.2),
            macro_tier: TierMultiplier::new(6.0, 2.5, 1.5, 1.5),
            mega: TierMultiplier::new(12.0, 4.0, 2.0, 2.0),
            celebrity: TierMultiplier::new(20.0, 6.0, 2.5, 3.0),
        }
    }

    /// Conservative preset: flatter supply, richer rewards
    pub fn conservative() -> Self {
        Self {
            nano: TierMultiplier::new(1.0, 1.0, 1.0, 1.0),
            micro: TierMultiplier::new(2.0, 1.5, 1.3, 1.2),
            macro_tier: TierMultiplier::new(5.0, 2.0, 1.7, 1.5),
            mega: TierMultiplier::new(10.0, 3.0, 2.5, 2.0),
            celebrity: TierMultiplier::new(15.0, 4.0, 2.8, 2.5),
        }
    }

    /// Get the row for a tier
    pub fn get(&self, tier: Tier) -> &TierMultiplier {
        match tier {
            Tier::Nano => &self.nano,
            Tier::Micro => &self.micro,
            Tier::Macro => &self.macro_tier,
            Tier::Mega => &self.mega,
            Tier::Celebrity => &self.celebrity,
        }
    }

    /// Resolve a label to its row (unknown labels get the nano row)
    pub fn resolve(&self, label: &str) -> (Tier, &TierMultiplier) {
        let tier = Tier::resolve(label);
        (tier, self.get(tier))
    }

    /// Rows in tier order
    pub fn rows(&self) -> impl Iterator<Item = (Tier, &TierMultiplier)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }

    /// Verify the table is totally ordered by tier size
    ///
    /// Supply and price must strictly increase from nano to celebrity so a
    /// larger tier always yields a larger token; rewards and milestone bonus
    /// may plateau but never shrink.
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<(Tier, &TierMultiplier)> = None;

        for (tier, row) in self.rows() {
            row.check(tier)?;

            if let Some((prev_tier, prev)) = previous {
                if row.supply <= prev.supply {
                    return Err(TokenomicsError::InvalidConfig(format!(
                        "supply multiplier of {} ({}) must exceed {} ({})",
                        tier, row.supply, prev_tier, prev.supply
                    )));
                }
                if row.price <= prev.price {
                    return Err(TokenomicsError::InvalidConfig(format!(
                        "price multiplier of {} ({}) must exceed {} ({})",
                        tier, row.price, prev_tier, prev.price
                    )));
                }
                if row.rewards < prev.rewards || row.milestone_bonus < prev.milestone_bonus {
                    return Err(TokenomicsError::InvalidConfig(format!(
                        "reward multipliers of {} must not fall below {}",
                        tier, prev_tier
                    )));
                }
            }
            previous = Some((tier, row));
        }

        Ok(())
    }
}
