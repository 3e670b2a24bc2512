//! # Audience Bonuses
//!
//! Capped scalar bonuses derived from a creator's audience metrics.
//!
//! ## Bonus Terms
//!
//! | Bonus | Formula | Cap | Supply Weight |
//! |-------|---------|-----|---------------|
//! | Follower (log) | log10(followers + 1) / 5 | 3.0 | 0.1 |
//! | Follower (linear) | followers / 10,000 | 10.0 | 0.1 |
//! | Engagement | rate × 50 | 5.0 | 0.2 |
//! | Influence | score / 20 | 5.0 | 0.2 |
//! | Activity | 1.1 active, 0.9 inactive | - | multiplicative |
//!
//! Follower counts are heavy-tailed, so the logarithmic form is the default:
//! a single viral account cannot dominate the supply formula.

use crate::constants::*;
use crate::error::{Result, TokenomicsError};
use serde::{Deserialize, Serialize};

/// Audience metrics supplied by creator verification
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorMetrics {
    /// Follower count
    pub followers: u64,

    /// Engagement rate as a fraction (0.05 = 5%)
    pub engagement_rate: f64,

    /// Influence score (0-100)
    pub influence_score: f64,

    /// Whether the creator is currently active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreatorMetrics {
    /// Create metrics without an activity signal
    pub fn new(followers: u64, engagement_rate: f64, influence_score: f64) -> Self {
        Self {
            followers,
            engagement_rate,
            influence_score,
            is_active: None,
        }
    }

    /// Attach an activity signal
    pub fn with_activity(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Reject negative or non-finite metrics
    pub fn validate(&self) -> Result<()> {
        check_metric("engagementRate", self.engagement_rate)?;
        check_metric("influenceScore", self.influence_score)?;
        Ok(())
    }
}

fn check_metric(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TokenomicsError::InvalidMetrics {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Follower bonus curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowerScaling {
    /// log10(followers + 1) / divisor
    #[default]
    Logarithmic,
    /// followers / divisor
    Linear,
}

/// Weights of each bonus in the supply and price formulas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusWeights {
    #[serde(default = "default_follower_weight")]
    pub follower: f64,
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
    #[serde(default = "default_influence_weight")]
    pub influence: f64,
    /// Influence weight in the price formula
    #[serde(default = "default_price_weight")]
    pub price: f64,
}

fn default_follower_weight() -> f64 {
    FOLLOWER_SUPPLY_WEIGHT
}

fn default_engagement_weight() -> f64 {
    ENGAGEMENT_SUPPLY_WEIGHT
}

fn default_influence_weight() -> f64 {
    INFLUENCE_SUPPLY_WEIGHT
}

fn default_price_weight() -> f64 {
    INFLUENCE_PRICE_WEIGHT
}

impl Default for BonusWeights {
    fn default() -> Self {
        Self {
            follower: default_follower_weight(),
            engagement: default_engagement_weight(),
            influence: default_influence_weight(),
            price: default_price_weight(),
        }
    }
}

/// Scales and caps of each bonus
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusConfig {
    /// Follower bonus curve
    #[serde(default)]
    pub follower_scaling: FollowerScaling,

    #[serde(default = "default_follower_log_divisor")]
    pub follower_log_divisor: f64,

    #[serde(default = "default_follower_log_cap")]
    pub follower_log_cap: f64,

    #[serde(default = "default_follower_linear_divisor")]
    pub follower_linear_divisor: f64,

    #[serde(default = "default_follower_linear_cap")]
    pub follower_linear_cap: f64,

    #[serde(default = "default_engagement_scale")]
    pub engagement_scale: f64,

    #[serde(default = "default_engagement_cap")]
    pub engagement_cap: f64,

    #[serde(default = "default_influence_divisor")]
    pub influence_divisor: f64,

    #[serde(default = "default_influence_cap")]
    pub influence_cap: f64,

    /// Apply the activity adjustment when the signal is present
    #[serde(default = "default_true")]
    pub activity_enabled: bool,

    /// Activity adjustment: 1 + swing when active, 1 - swing when inactive
    #[serde(default = "default_activity_swing")]
    pub activity_swing: f64,
}

fn default_follower_log_divisor() -> f64 {
    FOLLOWER_LOG_DIVISOR
}

fn default_follower_log_cap() -> f64 {
    FOLLOWER_LOG_CAP
}

fn default_follower_linear_divisor() -> f64 {
    FOLLOWER_LINEAR_DIVISOR
}

fn default_follower_linear_cap() -> f64 {
    FOLLOWER_LINEAR_CAP
}

fn default_engagement_scale() -> f64 {
    ENGAGEMENT_SCALE
}

fn default_engagement_cap() -> f64 {
    ENGAGEMENT_CAP
}

fn default_influence_divisor() -> f64 {
    INFLUENCE_DIVISOR
}

fn default_influence_cap() -> f64 {
    INFLUENCE_CAP
}

fn default_true() -> bool {
    true
}

fn default_activity_swing() -> f64 {
    ACTIVITY_SWING
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            follower_scaling: FollowerScaling::default(),
            follower_log_divisor: default_follower_log_divisor(),
            follower_log_cap: default_follower_log_cap(),
            follower_linear_divisor: default_follower_linear_divisor(),
            follower_linear_cap: default_follower_linear_cap(),
            engagement_scale: default_engagement_scale(),
            engagement_cap: default_engagement_cap(),
            influence_divisor: default_influence_divisor(),
            influence_cap: default_influence_cap(),
            activity_enabled: true,
            activity_swing: default_activity_swing(),
        }
    }
}

impl BonusConfig {
    /// Cap of the active follower curve
    pub fn follower_cap(&self) -> f64 {
        match self.follower_scaling {
            FollowerScaling::Logarithmic => self.follower_log_cap,
            FollowerScaling::Linear => self.follower_linear_cap,
        }
    }

    /// Follower bonus
    pub fn follower_bonus(&self, followers: u64) -> f64 {
        let raw = match self.follower_scaling {
            FollowerScaling::Logarithmic => {
                (followers as f64 + 1.0).log10() / self.follower_log_divisor
            }
            FollowerScaling::Linear => followers as f64 / self.follower_linear_divisor,
        };
        raw.min(self.follower_cap())
    }

    /// Engagement bonus
    pub fn engagement_bonus(&self, engagement_rate: f64) -> f64 {
        (engagement_rate * self.engagement_scale).min(self.engagement_cap)
    }

    /// Influence bonus
    pub fn influence_bonus(&self, influence_score: f64) -> f64 {
        (influence_score / self.influence_divisor).min(self.influence_cap)
    }

    /// Activity adjustment, `None` when not applied
    pub fn activity_bonus(&self, is_active: Option<bool>) -> Option<f64> {
        if !self.activity_enabled {
            return None;
        }
        is_active.map(|active| {
            if active {
                1.0 + self.activity_swing
            } else {
                1.0 - self.activity_swing
            }
        })
    }

    /// Compute every bonus at full precision
    pub fn compute(&self, metrics: &CreatorMetrics) -> Result<BonusBreakdown> {
        metrics.validate()?;

        Ok(BonusBreakdown {
            follower: self.follower_bonus(metrics.followers),
            engagement: self.engagement_bonus(metrics.engagement_rate),
            influence: self.influence_bonus(metrics.influence_score),
            activity: self.activity_bonus(metrics.is_active),
        })
    }
}

/// Bonuses for one set of metrics
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    pub follower: f64,
    pub engagement: f64,
    pub influence: f64,
    pub activity: Option<f64>,
}

impl BonusBreakdown {
    /// Activity factor used in arithmetic (1.0 when absent)
    pub fn activity_factor(&self) -> f64 {
        self.activity.unwrap_or(1.0)
    }

    /// Additive supply factor `1 + Σ bonus × weight`
    pub fn supply_factor(&self, weights: &BonusWeights) -> f64 {
        1.0 + self.follower * weights.follower
            + self.engagement * weights.engagement
            + self.influence * weights.influence
    }

    /// Price factor `1 + influence × weight`
    pub fn price_factor(&self, weights: &BonusWeights) -> f64 {
        1.0 + self.influence * weights.price
    }

    /// Presentation copy rounded to 2 decimals
    pub fn rounded(&self) -> Self {
        Self {
            follower: round2(self.follower),
            engagement: round2(self.engagement),
            influence: round2(self.influence),
            activity: self.activity.map(round2),
        }
    }
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
