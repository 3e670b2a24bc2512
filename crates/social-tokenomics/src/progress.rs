//! # Milestone Progress
//!
//! Read-only evaluation of a token's schedule against its live holder count.
//!
//! The milestone tracker owns the `unlocked` flags. It pays and flips exactly
//! the milestones listed in `pending_unlocks`; once flipped they never appear
//! there again, so re-evaluating the same count cannot trigger a second payout.

use crate::engine::Tokenomics;
use crate::milestone::Milestone;
use serde::{Deserialize, Serialize};

/// Progress of a token towards its milestones
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Holder count evaluated
    pub holders_count: u64,

    /// Highest milestone reached
    pub current_milestone: Option<Milestone>,

    /// Lowest locked milestone not yet reached
    pub next_milestone: Option<Milestone>,

    /// Progress towards the next milestone (0-100)
    pub progress_percent: f64,

    /// Reached milestones still awaiting their unlock
    pub pending_unlocks: Vec<u32>,
}

impl ProgressReport {
    /// Index of the current milestone, 0 when none is reached
    pub fn current_index(&self) -> u32 {
        self.current_milestone
            .as_ref()
            .map(|m| m.index)
            .unwrap_or(0)
    }

    /// Holders still needed for the next milestone
    pub fn holders_to_next(&self) -> Option<u64> {
        self.next_milestone
            .as_ref()
            .map(|m| m.holders.saturating_sub(self.holders_count))
    }

    /// Check whether every milestone is behind us
    pub fn is_complete(&self) -> bool {
        self.next_milestone.is_none()
    }
}

/// Evaluate milestone progress for a holder count
pub fn evaluate_progress(tokenomics: &Tokenomics, holders_count: u64) -> ProgressReport {
    let current_milestone = tokenomics
        .milestones
        .iter()
        .filter(|m| m.is_reached(holders_count))
        .max_by_key(|m| m.index)
        .cloned();

    let next_milestone = tokenomics
        .milestones
        .iter()
        .filter(|m| !m.is_reached(holders_count) && !m.unlocked)
        .min_by_key(|m| m.index)
        .cloned();

    let progress_percent = match &next_milestone {
        Some(next) => (holders_count as f64 / next.holders as f64 * 100.0).min(100.0),
        None => 100.0,
    };

    let pending_unlocks: Vec<u32> = tokenomics
        .milestones
        .iter()
        .filter(|m| m.is_reached(holders_count) && !m.unlocked)
        .map(|m| m.index)
        .collect();

    if !pending_unlocks.is_empty() {
        tracing::debug!(
            "{} holders reached milestones {:?} awaiting unlock",
            holders_count,
            pending_unlocks
        );
    }

    ProgressReport {
        holders_count,
        current_milestone,
        next_milestone,
        progress_percent,
        pending_unlocks,
    }
}
