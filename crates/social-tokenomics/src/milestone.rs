//! # Milestone Schedule
//!
//! Holder-count thresholds that unlock one-time reward percentages.
//!
//! ## Base Schedule
//!
//! ```text
//! #1    100 holders →  3%      #5  2,500 holders → 15%
//! #2    250 holders →  5%      #6  5,000 holders → 20%
//! #3    500 holders →  8%      #7 10,000 holders → 25%
//! #4  1,000 holders → 10%
//! ```
//!
//! Each tier scales holders by its milestone bonus and rewards by its reward
//! multiplier. Both columns must stay strictly increasing after scaling;
//! progress lookups depend on it.

use crate::error::{Result, TokenomicsError};
use crate::tier::TierMultiplier;
use serde::{Deserialize, Serialize};

/// One milestone of a token's schedule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Holder count that unlocks this milestone
    pub holders: u64,

    /// One-time reward as a fraction of supply
    pub reward: f64,

    /// Set by the milestone tracker once the threshold is crossed
    pub unlocked: bool,

    /// Position in the schedule, starting at 1
    pub index: u32,

    /// Display text
    pub description: String,
}

impl Milestone {
    /// Create a locked milestone
    pub fn new(index: u32, holders: u64, reward: f64) -> Self {
        Self {
            holders,
            reward,
            unlocked: false,
            index,
            description: format!("Milestone {}: {} holders", index, holders),
        }
    }

    /// Whether a holder count has reached this milestone
    pub fn is_reached(&self, holders_count: u64) -> bool {
        holders_count >= self.holders
    }
}

/// Unscaled schedule entry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseMilestone {
    pub holders: u64,
    pub reward: f64,
}

impl BaseMilestone {
    pub const fn new(holders: u64, reward: f64) -> Self {
        Self { holders, reward }
    }
}

/// Unscaled schedule shared by every tier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseSchedule(pub Vec<BaseMilestone>);

impl Default for BaseSchedule {
    fn default() -> Self {
        Self(vec![
            BaseMilestone::new(100, 0.03),
            BaseMilestone::new(250, 0.05),
            BaseMilestone::new(500, 0.08),
            BaseMilestone::new(1_000, 0.10),
            BaseMilestone::new(2_500, 0.15),
            BaseMilestone::new(5_000, 0.20),
            BaseMilestone::new(10_000, 0.25),
        ])
    }
}

impl BaseSchedule {
    /// Entries in order
    pub fn entries(&self) -> &[BaseMilestone] {
        &self.0
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check for an empty schedule
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Verify the base schedule itself
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(TokenomicsError::InvalidConfig(
                "milestone schedule is empty".to_string(),
            ));
        }

        for (i, entry) in self.0.iter().enumerate() {
            if entry.holders == 0 {
                return Err(TokenomicsError::InvalidConfig(format!(
                    "base milestone {} has zero holders",
                    i + 1
                )));
            }
            if !entry.reward.is_finite() || entry.reward <= 0.0 || entry.reward >= 1.0 {
                return Err(TokenomicsError::InvalidConfig(format!(
                    "base milestone {} reward {} outside (0, 1)",
                    i + 1,
                    entry.reward
                )));
            }
        }

        check_monotonic(self.0.iter().map(|m| (m.holders, m.reward)))
    }

    /// Scale the schedule for one tier
    ///
    /// Fails with `MonotonicityViolation` when the scaled holders or rewards
    /// stop strictly increasing, and with `InvalidConfig` when a scaled reward
    /// leaves `(0, 1)`.
    pub fn generate(&self, multiplier: &TierMultiplier) -> Result<Vec<Milestone>> {
        let milestones: Vec<Milestone> = self
            .0
            .iter()
            .enumerate()
            .map(|(i, base)| {
                let holders = (base.holders as f64 * multiplier.milestone_bonus).floor() as u64;
                let reward = base.reward * multiplier.rewards;
                Milestone::new(i as u32 + 1, holders, reward)
            })
            .collect();

        for milestone in &milestones {
            if milestone.holders == 0 {
                return Err(TokenomicsError::InvalidConfig(format!(
                    "milestone {} scaled to zero holders",
                    milestone.index
                )));
            }
            if !milestone.reward.is_finite() || milestone.reward <= 0.0 || milestone.reward >= 1.0
            {
                return Err(TokenomicsError::InvalidConfig(format!(
                    "milestone {} reward {} outside (0, 1)",
                    milestone.index, milestone.reward
                )));
            }
        }

        check_monotonic(milestones.iter().map(|m| (m.holders, m.reward)))?;

        Ok(milestones)
    }
}

/// Verify `(holders, reward)` pairs strictly increase in both fields
pub(crate) fn check_monotonic(entries: impl Iterator<Item = (u64, f64)>) -> Result<()> {
    let mut previous: Option<(u64, f64)> = None;

    for (i, (holders, reward)) in entries.enumerate() {
        if let Some((prev_holders, prev_reward)) = previous {
            if holders <= prev_holders {
                return Err(TokenomicsError::MonotonicityViolation {
                    index: i + 1,
                    previous: format!("{} holders", prev_holders),
                    current: format!("{} holders", holders),
                });
            }
            if reward <= prev_reward {
                return Err(TokenomicsError::MonotonicityViolation {
                    index: i + 1,
                    previous: format!("reward {}", prev_reward),
                    current: format!("reward {}", reward),
                });
            }
        }
        previous = Some((holders, reward));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::TierTable;

    #[test]
    fn test_default_schedule_valid() {
        let schedule = BaseSchedule::default();
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.len(), 7);
    }

    #[test]
    fn test_generate_for_micro() {
        let table = TierTable::standard();
        let milestones = BaseSchedule::default().generate(&table.micro).unwrap();

        assert_eq!(milestones.len(), 7);
        assert_eq!(milestones[0].holders, 120);
        assert_eq!(milestones[0].index, 1);
        assert!((milestones[0].reward - 0.036).abs() < 1e-12);
        assert_eq!(milestones[0].description, "Milestone 1: 120 holders");
        assert!(milestones.iter().all(|m| !m.unlocked));
    }

    #[test]
    fn test_generate_nano_is_unscaled() {
        let table = TierTable::standard();
        let milestones = BaseSchedule::default().generate(&table.nano).unwrap();

        let base = BaseSchedule::default();
        for (m, b) in milestones.iter().zip(base.entries()) {
            assert_eq!(m.holders, b.holders);
            assert_eq!(m.reward, b.reward);
        }
    }

    #[test]
    fn test_collapsing_holders_detected() {
        // Close thresholds collapse once a fractional bonus floors them together
        let schedule = BaseSchedule(vec![
            BaseMilestone::new(1, 0.03),
            BaseMilestone::new(2, 0.05),
        ]);
        assert!(schedule.validate().is_ok());

        let shrink = TierMultiplier::new(1.0, 1.0, 1.0, 0.6);
        let err = schedule.generate(&shrink).unwrap_err();
        assert!(matches!(err, TokenomicsError::InvalidConfig(_)));

        let schedule = BaseSchedule(vec![
            BaseMilestone::new(10, 0.03),
            BaseMilestone::new(11, 0.05),
        ]);
        let err = schedule.generate(&shrink).unwrap_err();
        assert!(matches!(
            err,
            TokenomicsError::MonotonicityViolation { index: 2, .. }
        ));
    }

    #[test]
    fn test_reward_overflow_rejected() {
        let schedule = BaseSchedule(vec![
            BaseMilestone::new(100, 0.2),
            BaseMilestone::new(200, 0.4),
        ]);
        let greedy = TierMultiplier::new(1.0, 1.0, 3.0, 1.0);
        assert!(matches!(
            schedule.generate(&greedy),
            Err(TokenomicsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unordered_base_schedule_rejected() {
        let schedule = BaseSchedule(vec![
            BaseMilestone::new(500, 0.05),
            BaseMilestone::new(250, 0.08),
        ]);
        assert!(matches!(
            schedule.validate(),
            Err(TokenomicsError::MonotonicityViolation { index: 2, .. })
        ));

        assert!(BaseSchedule(Vec::new()).validate().is_err());
    }

    #[test]
    fn test_is_reached() {
        let milestone = Milestone::new(1, 100, 0.03);
        assert!(!milestone.is_reached(99));
        assert!(milestone.is_reached(100));
    }
}
