//! Engine configuration types

use crate::bonus::{BonusConfig, BonusWeights};
use crate::constants::*;
use crate::error::{Result, TokenomicsError};
use crate::milestone::BaseSchedule;
use crate::tier::TierTable;
use serde::{Deserialize, Serialize};

/// Complete engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Supply before tier and bonus scaling
    #[serde(default = "default_base_supply")]
    pub base_supply: u64,

    /// Launch price before tier and influence scaling
    #[serde(default = "default_base_price")]
    pub base_price: f64,

    /// Decimal places of the rendered price (4-6)
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,

    /// Bonus weights
    #[serde(default)]
    pub weights: BonusWeights,

    /// Bonus scales and caps
    #[serde(default)]
    pub bonus: BonusConfig,

    /// Built-in tier table
    #[serde(default)]
    pub tier_preset: TierPreset,

    /// Explicit tier table, overrides the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierTable>,

    /// Unscaled milestone schedule
    #[serde(default)]
    pub schedule: BaseSchedule,
}

fn default_base_supply() -> u64 {
    BASE_SUPPLY
}

fn default_base_price() -> f64 {
    BASE_PRICE
}

fn default_price_decimals() -> u32 {
    PRICE_DECIMALS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_supply: default_base_supply(),
            base_price: default_base_price(),
            price_decimals: default_price_decimals(),
            weights: BonusWeights::default(),
            bonus: BonusConfig::default(),
            tier_preset: TierPreset::default(),
            tiers: None,
            schedule: BaseSchedule::default(),
        }
    }
}

/// Built-in tier tables
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierPreset {
    #[default]
    Standard,
    Conservative,
}

impl TierPreset {
    /// Table for this preset
    pub fn table(&self) -> TierTable {
        match self {
            Self::Standard => TierTable::standard(),
            Self::Conservative => TierTable::conservative(),
        }
    }
}

impl EngineConfig {
    /// Effective tier table
    pub fn tier_table(&self) -> TierTable {
        self.tiers
            .clone()
            .unwrap_or_else(|| self.tier_preset.table())
    }

    /// Supply contribution `cap × weight` of each bonus term
    pub fn term_contributions(&self) -> [(&'static str, f64); 3] {
        [
            ("follower", self.bonus.follower_cap() * self.weights.follower),
            (
                "engagement",
                self.bonus.engagement_cap * self.weights.engagement,
            ),
            ("influence", self.bonus.influence_cap * self.weights.influence),
        ]
    }

    /// Largest activity factor this configuration can apply
    pub fn max_activity_factor(&self) -> f64 {
        if self.bonus.activity_enabled {
            1.0 + self.bonus.activity_swing
        } else {
            1.0
        }
    }

    /// Worst-case supply factor of a single bonus over tier-base supply
    ///
    /// With one non-zero bonus the supply is at most
    /// `base × tier.supply × (1 + cap × weight) × activity`.
    pub fn single_bonus_supply_bound(&self) -> f64 {
        let largest = self
            .term_contributions()
            .iter()
            .map(|(_, c)| *c)
            .fold(0.0_f64, f64::max);
        (1.0 + largest) * self.max_activity_factor()
    }

    /// Validate the configuration
    ///
    /// Enforces `cap × weight ≤ 1` for each term and an activity swing of
    /// at most 0.5, which bounds any single bonus to 3x tier-base supply.
    /// Every tier's schedule is generated once so monotonicity bugs surface
    /// at load time.
    pub fn validate(&self) -> Result<()> {
        if self.base_supply == 0 {
            return Err(invalid("base_supply must be positive"));
        }
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(invalid(format!(
                "base_price must be finite and positive, got {}",
                self.base_price
            )));
        }
        if !(MIN_PRICE_DECIMALS..=MAX_PRICE_DECIMALS).contains(&self.price_decimals) {
            return Err(invalid(format!(
                "price_decimals must be {}..={}, got {}",
                MIN_PRICE_DECIMALS, MAX_PRICE_DECIMALS, self.price_decimals
            )));
        }

        let non_negative = [
            ("weights.follower", self.weights.follower),
            ("weights.engagement", self.weights.engagement),
            ("weights.influence", self.weights.influence),
            ("weights.price", self.weights.price),
            ("bonus.follower_log_cap", self.bonus.follower_log_cap),
            ("bonus.follower_linear_cap", self.bonus.follower_linear_cap),
            ("bonus.engagement_scale", self.bonus.engagement_scale),
            ("bonus.engagement_cap", self.bonus.engagement_cap),
            ("bonus.influence_cap", self.bonus.influence_cap),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        let divisors = [
            ("bonus.follower_log_divisor", self.bonus.follower_log_divisor),
            (
                "bonus.follower_linear_divisor",
                self.bonus.follower_linear_divisor,
            ),
            ("bonus.influence_divisor", self.bonus.influence_divisor),
        ];
        for (name, value) in divisors {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        for (term, contribution) in self.term_contributions() {
            if contribution > MAX_SINGLE_TERM_CONTRIBUTION {
                return Err(invalid(format!(
                    "{} bonus can scale supply by {:.2}x on its own (limit {}x)",
                    term,
                    1.0 + contribution,
                    1.0 + MAX_SINGLE_TERM_CONTRIBUTION
                )));
            }
        }

        let swing = self.bonus.activity_swing;
        if !swing.is_finite() || !(0.0..=MAX_ACTIVITY_SWING).contains(&swing) {
            return Err(invalid(format!(
                "bonus.activity_swing must be 0..={}, got {}",
                MAX_ACTIVITY_SWING, swing
            )));
        }

        let tiers = self.tier_table();
        tiers.validate()?;
        self.schedule.validate()?;
        for (_, row) in tiers.rows() {
            self.schedule.generate(row)?;
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> TokenomicsError {
    TokenomicsError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::FollowerScaling;

    #[test]
    fn test_default_config_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tier_table(), TierTable::standard());
    }

    #[test]
    fn test_single_bonus_bound() {
        let config = EngineConfig::default();
        // engagement and influence both contribute 1.0, activity 1.1
        assert!((config.single_bonus_supply_bound() - 2.2).abs() < 1e-12);
        assert!(config.single_bonus_supply_bound() <= SINGLE_BONUS_SUPPLY_CEILING);
    }

    #[test]
    fn test_heavy_weight_rejected() {
        let config = EngineConfig {
            weights: BonusWeights {
                engagement: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TokenomicsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_linear_followers_at_limit() {
        let config = EngineConfig {
            bonus: BonusConfig {
                follower_scaling: FollowerScaling::Linear,
                ..Default::default()
            },
            ..Default::default()
        };
        // 10 × 0.1 doubles the multiplier exactly, which is allowed
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_activity_swing_limit() {
        let mut config = EngineConfig::default();
        config.bonus.activity_swing = 0.6;
        assert!(config.validate().is_err());

        config.bonus.activity_swing = 0.5;
        assert!(config.validate().is_ok());
        assert!(config.single_bonus_supply_bound() <= SINGLE_BONUS_SUPPLY_CEILING);
    }

    #[test]
    fn test_price_decimals_range() {
        let mut config = EngineConfig::default();
        config.price_decimals = 3;
        assert!(config.validate().is_err());
        config.price_decimals = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_and_override() {
        let config = EngineConfig {
            tier_preset: TierPreset::Conservative,
            ..Default::default()
        };
        assert_eq!(config.tier_table(), TierTable::conservative());

        let config = EngineConfig {
            tiers: Some(TierTable::standard()),
            tier_preset: TierPreset::Conservative,
            ..Default::default()
        };
        assert_eq!(config.tier_table(), TierTable::standard());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"base_supply": 2000000, "tier_preset": "conservative"}"#)
                .unwrap();

        assert_eq!(config.base_supply, 2_000_000);
        assert_eq!(config.base_price, BASE_PRICE);
        assert_eq!(config.schedule, BaseSchedule::default());
        assert_eq!(config.tier_preset, TierPreset::Conservative);
    }
}
