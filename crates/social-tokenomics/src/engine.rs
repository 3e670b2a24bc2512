//! # Tokenomics Engine
//!
//! Derives a creator token's supply, launch price and milestone schedule.
//!
//! ```text
//! metrics ──► bonuses ──┬──► supply = floor(base × tier.supply × Σ-factor × activity)
//!                       ├──► price  = base × tier.price × (1 + influence × wP)
//! tier ──► multipliers ─┴──► milestones = base schedule scaled per tier
//! ```
//!
//! The engine holds only immutable configuration. Identical inputs always
//! produce identical records apart from `calculated_at`.

use crate::bonus::{BonusBreakdown, CreatorMetrics};
use crate::config::EngineConfig;
use crate::error::{Result, TokenomicsError};
use crate::milestone::Milestone;
use crate::tier::{Tier, TierMultiplier, TierTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier tag of a tokenomics record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TokenomicsTier {
    /// Derived from the tier table
    Scaled(Tier),
    /// Creator-supplied schedule
    Custom,
}

impl TokenomicsTier {
    /// Get tier label
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scaled(tier) => tier.name(),
            Self::Custom => "custom",
        }
    }

    /// Underlying tier, if derived
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Scaled(tier) => Some(*tier),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for TokenomicsTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TokenomicsTier> for String {
    fn from(tier: TokenomicsTier) -> Self {
        tier.name().to_string()
    }
}

impl TryFrom<String> for TokenomicsTier {
    type Error = TokenomicsError;

    fn try_from(label: String) -> Result<Self> {
        if label.eq_ignore_ascii_case("custom") {
            Ok(Self::Custom)
        } else {
            label.parse().map(Self::Scaled)
        }
    }
}

/// Multipliers applied to a tokenomics record (bonuses rounded to 2 decimals)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Multipliers {
    pub tier_multiplier: TierMultiplier,
    pub follower_bonus: f64,
    pub engagement_bonus: f64,
    pub influence_bonus: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_bonus: Option<f64>,
}

impl Multipliers {
    /// Build the presentation copy of a tier row and its bonuses
    pub fn new(tier_multiplier: TierMultiplier, bonuses: &BonusBreakdown) -> Self {
        let rounded = bonuses.rounded();
        Self {
            tier_multiplier,
            follower_bonus: rounded.follower,
            engagement_bonus: rounded.engagement,
            influence_bonus: rounded.influence,
            activity_bonus: rounded.activity,
        }
    }

    /// Multipliers of a custom schedule: identity row, no bonuses
    pub fn custom() -> Self {
        Self {
            tier_multiplier: TierMultiplier::identity(),
            follower_bonus: 0.0,
            engagement_bonus: 0.0,
            influence_bonus: 0.0,
            activity_bonus: None,
        }
    }
}

/// Complete tokenomics of one creator token
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokenomics {
    /// Total token supply
    pub total_supply: u64,

    /// Launch price, fixed point
    pub initial_price: String,

    /// Tier the record was derived for
    pub tier: TokenomicsTier,

    /// Multipliers and rounded bonuses
    pub multipliers: Multipliers,

    /// Milestones, strictly increasing by holders
    pub milestones: Vec<Milestone>,

    /// Reward multiplier applied at payout
    pub reward_multiplier: f64,

    /// Computation time
    pub calculated_at: DateTime<Utc>,
}

impl Tokenomics {
    /// Launch price as a number
    pub fn initial_price_value(&self) -> Option<f64> {
        self.initial_price.parse().ok()
    }

    /// Milestone by 1-based index
    pub fn milestone(&self, index: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.index == index)
    }

    /// One-time reward of a milestone in tokens
    pub fn reward_tokens(&self, index: u32) -> Option<u64> {
        self.milestone(index)
            .map(|m| (self.total_supply as f64 * m.reward).floor() as u64)
    }

    /// Last milestone of the schedule
    pub fn final_milestone(&self) -> Option<&Milestone> {
        self.milestones.last()
    }

    /// Check for a creator-supplied schedule
    pub fn is_custom(&self) -> bool {
        self.tier == TokenomicsTier::Custom
    }
}

/// Tokenomics calculator
#[derive(Clone, Debug)]
pub struct TokenomicsEngine {
    /// Validated configuration
    config: EngineConfig,

    /// Resolved tier table
    tiers: TierTable,
}

impl Default for TokenomicsEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let tiers = config.tier_table();
        Self { config, tiers }
    }
}

impl TokenomicsEngine {
    /// Create engine from a configuration, rejecting invalid tables
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let tiers = config.tier_table();
        Ok(Self { config, tiers })
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Effective tier table
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Compute tokenomics for a creator
    pub fn compute_tokenomics(&self, metrics: &CreatorMetrics, tier: Tier) -> Result<Tokenomics> {
        self.compute_tokenomics_at(metrics, tier, Utc::now())
    }

    /// Compute tokenomics for a raw tier label (unknown labels use nano)
    pub fn compute_for_label(&self, metrics: &CreatorMetrics, label: &str) -> Result<Tokenomics> {
        self.compute_tokenomics(metrics, Tier::resolve(label))
    }

    /// Compute tokenomics with an explicit timestamp
    pub fn compute_tokenomics_at(
        &self,
        metrics: &CreatorMetrics,
        tier: Tier,
        calculated_at: DateTime<Utc>,
    ) -> Result<Tokenomics> {
        let bonuses = self.config.bonus.compute(metrics)?;
        let row = *self.tiers.get(tier);

        let total_supply = self.derive_supply(&bonuses, &row)?;
        let initial_price = self.derive_price(&bonuses, &row);
        let milestones = self.config.schedule.generate(&row)?;

        tracing::debug!(
            "Derived {} tokenomics: supply={} price={} bonuses=({:.4}, {:.4}, {:.4}, {:?})",
            tier,
            total_supply,
            initial_price,
            bonuses.follower,
            bonuses.engagement,
            bonuses.influence,
            bonuses.activity
        );

        Ok(Tokenomics {
            total_supply,
            initial_price,
            tier: TokenomicsTier::Scaled(tier),
            multipliers: Multipliers::new(row, &bonuses),
            milestones,
            reward_multiplier: row.rewards,
            calculated_at,
        })
    }

    /// Total supply from full-precision bonuses
    pub fn derive_supply(&self, bonuses: &BonusBreakdown, row: &TierMultiplier) -> Result<u64> {
        let raw = self.config.base_supply as f64
            * row.supply
            * bonuses.supply_factor(&self.config.weights)
            * bonuses.activity_factor();

        if !raw.is_finite() || raw < 1.0 || raw >= u64::MAX as f64 {
            return Err(TokenomicsError::InvalidConfig(format!(
                "derived supply {} is out of range",
                raw
            )));
        }

        Ok(raw.floor() as u64)
    }

    /// Launch price rendered with the configured precision
    pub fn derive_price(&self, bonuses: &BonusBreakdown, row: &TierMultiplier) -> String {
        let price = self.config.base_price * row.price * bonuses.price_factor(&self.config.weights);
        format_price(price, self.config.price_decimals)
    }
}

/// Render a price as a fixed-point decimal string
pub fn format_price(price: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, price)
}
