//! # Custom Tokenomics
//!
//! Validation of creator-supplied supply, price and milestone schedules.
//!
//! | Field | Accepted Range |
//! |-------|----------------|
//! | totalSupply | 1,000 - 100,000,000 (integer) |
//! | initialPrice | 0.001 - 100 |
//! | milestones[].holders | ≥ 10, strictly increasing |
//! | milestones[].reward | 0.01 - 0.5, strictly increasing |
//!
//! A validated schedule bypasses the tier table: it is tagged `custom` and
//! carries a reward multiplier of 1. The price is kept exactly, so it may not
//! carry more decimal places than the engine renders.

use crate::constants::*;
use crate::engine::{format_price, Multipliers, Tokenomics, TokenomicsEngine, TokenomicsTier};
use crate::error::{Result, TokenomicsError};
use crate::milestone::Milestone;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom milestone as supplied by the creator
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomMilestone {
    pub holders: u64,
    pub reward: f64,
}

/// Custom tokenomics request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTokenomicsInput {
    pub total_supply: u64,
    pub initial_price: f64,
    pub milestones: Vec<CustomMilestone>,
}

impl CustomTokenomicsInput {
    /// Extract a request from untyped JSON
    ///
    /// Missing or mistyped fields map onto the matching validation error so
    /// callers always see which part of the request was wrong.
    pub fn from_json(value: &Value) -> Result<Self> {
        let supply = value.get("totalSupply").unwrap_or(&Value::Null);
        let total_supply = supply
            .as_u64()
            .or_else(|| whole_number(supply))
            .ok_or_else(|| TokenomicsError::InvalidSupply {
                value: supply.to_string(),
            })?;

        let price = value.get("initialPrice").unwrap_or(&Value::Null);
        let initial_price = match price {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| TokenomicsError::InvalidPrice {
            value: price.to_string(),
            reason: "must be a number".to_string(),
        })?;

        let entries = value
            .get("milestones")
            .and_then(Value::as_array)
            .ok_or_else(|| TokenomicsError::InvalidMilestone {
                index: 0,
                reason: "milestones must be an array".to_string(),
            })?;

        let milestones = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let holders_field = entry.get("holders").unwrap_or(&Value::Null);
                let holders = holders_field
                    .as_u64()
                    .or_else(|| whole_number(holders_field))
                    .ok_or_else(|| TokenomicsError::InvalidMilestone {
                        index: i + 1,
                        reason: format!("holders must be a whole number, got {}", holders_field),
                    })?;

                let reward_field = entry.get("reward").unwrap_or(&Value::Null);
                let reward = reward_field.as_f64().ok_or_else(|| {
                    TokenomicsError::InvalidMilestone {
                        index: i + 1,
                        reason: format!("reward must be a number, got {}", reward_field),
                    }
                })?;

                Ok(CustomMilestone { holders, reward })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            total_supply,
            initial_price,
            milestones,
        })
    }

    /// Check every bound
    pub fn validate(&self) -> Result<()> {
        if !(CUSTOM_MIN_SUPPLY..=CUSTOM_MAX_SUPPLY).contains(&self.total_supply) {
            return Err(TokenomicsError::InvalidSupply {
                value: self.total_supply.to_string(),
            });
        }

        if !self.initial_price.is_finite()
            || !(CUSTOM_MIN_PRICE..=CUSTOM_MAX_PRICE).contains(&self.initial_price)
        {
            return Err(TokenomicsError::InvalidPrice {
                value: self.initial_price.to_string(),
                reason: format!("must be {}..={}", CUSTOM_MIN_PRICE, CUSTOM_MAX_PRICE),
            });
        }

        if self.milestones.is_empty() {
            return Err(TokenomicsError::InvalidMilestone {
                index: 0,
                reason: "at least one milestone is required".to_string(),
            });
        }

        let mut previous: Option<&CustomMilestone> = None;
        for (i, milestone) in self.milestones.iter().enumerate() {
            let index = i + 1;

            if milestone.holders < CUSTOM_MIN_HOLDERS {
                return Err(TokenomicsError::InvalidMilestone {
                    index,
                    reason: format!(
                        "holders {} below minimum {}",
                        milestone.holders, CUSTOM_MIN_HOLDERS
                    ),
                });
            }

            if !milestone.reward.is_finite()
                || !(CUSTOM_MIN_REWARD..=CUSTOM_MAX_REWARD).contains(&milestone.reward)
            {
                return Err(TokenomicsError::InvalidMilestone {
                    index,
                    reason: format!(
                        "reward {} outside {}..={}",
                        milestone.reward, CUSTOM_MIN_REWARD, CUSTOM_MAX_REWARD
                    ),
                });
            }

            if let Some(prev) = previous {
                if milestone.holders <= prev.holders {
                    return Err(TokenomicsError::InvalidMilestone {
                        index,
                        reason: format!(
                            "holders {} must exceed previous milestone ({})",
                            milestone.holders, prev.holders
                        ),
                    });
                }
                if milestone.reward <= prev.reward {
                    return Err(TokenomicsError::InvalidMilestone {
                        index,
                        reason: format!(
                            "reward {} must exceed previous milestone ({})",
                            milestone.reward, prev.reward
                        ),
                    });
                }
            }
            previous = Some(milestone);
        }

        Ok(())
    }
}

/// Whether `price` is exact at `decimals` places
fn fits_decimals(price: f64, decimals: u32) -> bool {
    let scaled = price * 10f64.powi(decimals as i32);
    (scaled - scaled.round()).abs() <= PRICE_PRECISION_TOLERANCE
}

/// Integer-valued JSON floats such as `5000.0`
fn whole_number(value: &Value) -> Option<u64> {
    let n = value.as_f64()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n < u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}

impl TokenomicsEngine {
    /// Validate a custom schedule and build its tokenomics record
    pub fn validate_custom_tokenomics(&self, input: &CustomTokenomicsInput) -> Result<Tokenomics> {
        self.validate_custom_tokenomics_at(input, Utc::now())
    }

    /// Validate untyped JSON as a custom schedule
    pub fn validate_custom_json(&self, value: &Value) -> Result<Tokenomics> {
        let input = CustomTokenomicsInput::from_json(value)?;
        self.validate_custom_tokenomics(&input)
    }

    /// Validate a custom schedule with an explicit timestamp
    pub fn validate_custom_tokenomics_at(
        &self,
        input: &CustomTokenomicsInput,
        calculated_at: DateTime<Utc>,
    ) -> Result<Tokenomics> {
        input.validate()?;

        let decimals = self.config().price_decimals;
        if !fits_decimals(input.initial_price, decimals) {
            return Err(TokenomicsError::InvalidPrice {
                value: input.initial_price.to_string(),
                reason: format!("more than {} decimal places", decimals),
            });
        }

        let milestones = input
            .milestones
            .iter()
            .enumerate()
            .map(|(i, m)| Milestone::new(i as u32 + 1, m.holders, m.reward))
            .collect();

        Ok(Tokenomics {
            total_supply: input.total_supply,
            initial_price: format_price(input.initial_price, decimals),
            tier: TokenomicsTier::Custom,
            multipliers: Multipliers::custom(),
            milestones,
            reward_multiplier: 1.0,
            calculated_at,
        })
    }
}
