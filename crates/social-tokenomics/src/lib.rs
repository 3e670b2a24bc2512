//! # Social Tokenomics - Milestone-Based Creator Token Engine
//!
//! Derives the supply, launch price and holder-milestone reward schedule of a
//! creator's social token from externally measured audience metrics.
//!
//! ## Key Features
//!
//! - **Tier scaling**: nano → celebrity multiplier table, fully configurable
//! - **Capped bonuses**: follower, engagement, influence and activity signals
//! - **Milestone schedule**: strictly increasing holder thresholds with one-time rewards
//! - **Custom schedules**: validated creator-supplied tokenomics
//! - **Progress evaluation**: read-only lookup of reached / next milestones
//!
//! ## Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  supply = floor(1,000,000 × tier.supply                                 │
//! │                 × (1 + 0.1·follower + 0.2·engagement + 0.2·influence)   │
//! │                 × activity)                                             │
//! │  price  = 0.01 × tier.price × (1 + 0.1·influence)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Standard Tier Table
//!
//! | Tier | Supply | Price | Rewards | Milestone Bonus |
//! |------|--------|-------|---------|-----------------|
//! | nano | 1x | 1x | 1x | 1x |
//! | micro | 2.5x | 1.5x | 1.2x | 1.2x |
//! | macro | 6x | 2.5x | 1.5x | 1.5x |
//! | mega | 12x | 4x | 2x | 2x |
//! | celebrity | 20x | 6x | 2.5x | 3x |
//!
//! The engine performs no I/O and holds no mutable state; it is safe to share
//! across any number of request handlers.

pub mod bonus;
pub mod config;
pub mod custom;
pub mod engine;
pub mod error;
pub mod milestone;
pub mod progress;
pub mod tier;

// Re-exports
pub use bonus::{BonusBreakdown, BonusConfig, BonusWeights, CreatorMetrics, FollowerScaling};
pub use config::{EngineConfig, TierPreset};
pub use custom::{CustomMilestone, CustomTokenomicsInput};
pub use engine::{Multipliers, Tokenomics, TokenomicsEngine, TokenomicsTier};
pub use error::{Result, TokenomicsError};
pub use milestone::{BaseMilestone, BaseSchedule, Milestone};
pub use progress::{evaluate_progress, ProgressReport};
pub use tier::{Tier, TierMultiplier, TierTable};

/// Tokenomics constants
pub mod constants {
    /// Base token supply before tier and bonus scaling
    pub const BASE_SUPPLY: u64 = 1_000_000;

    /// Base launch price before tier and influence scaling
    pub const BASE_PRICE: f64 = 0.01;

    /// Decimal places of the rendered launch price
    pub const PRICE_DECIMALS: u32 = 6;

    /// Fewest decimal places a price may be rendered with
    pub const MIN_PRICE_DECIMALS: u32 = 4;

    /// Most decimal places a price may be rendered with
    pub const MAX_PRICE_DECIMALS: u32 = 6;

    /// Logarithmic follower bonus: log10(followers + 1) / divisor
    pub const FOLLOWER_LOG_DIVISOR: f64 = 5.0;

    /// Logarithmic follower bonus cap
    pub const FOLLOWER_LOG_CAP: f64 = 3.0;

    /// Linear follower bonus: followers / divisor
    pub const FOLLOWER_LINEAR_DIVISOR: f64 = 10_000.0;

    /// Linear follower bonus cap
    pub const FOLLOWER_LINEAR_CAP: f64 = 10.0;

    /// Engagement bonus: rate × scale
    pub const ENGAGEMENT_SCALE: f64 = 50.0;

    /// Engagement bonus cap
    pub const ENGAGEMENT_CAP: f64 = 5.0;

    /// Influence bonus: score / divisor
    pub const INFLUENCE_DIVISOR: f64 = 20.0;

    /// Influence bonus cap
    pub const INFLUENCE_CAP: f64 = 5.0;

    /// Activity adjustment (±10%)
    pub const ACTIVITY_SWING: f64 = 0.1;

    /// Largest activity swing a configuration may request
    pub const MAX_ACTIVITY_SWING: f64 = 0.5;

    /// Supply weight of the follower bonus
    pub const FOLLOWER_SUPPLY_WEIGHT: f64 = 0.1;

    /// Supply weight of the engagement bonus
    pub const ENGAGEMENT_SUPPLY_WEIGHT: f64 = 0.2;

    /// Supply weight of the influence bonus
    pub const INFLUENCE_SUPPLY_WEIGHT: f64 = 0.2;

    /// Price weight of the influence bonus
    pub const INFLUENCE_PRICE_WEIGHT: f64 = 0.1;

    /// Upper bound of `cap × weight` for any single bonus term
    pub const MAX_SINGLE_TERM_CONTRIBUTION: f64 = 1.0;

    /// Supply factor a single bonus may never exceed, relative to tier-base supply
    pub const SINGLE_BONUS_SUPPLY_CEILING: f64 = 3.0;

    /// Custom schedule: minimum total supply
    pub const CUSTOM_MIN_SUPPLY: u64 = 1_000;

    /// Custom schedule: maximum total supply
    pub const CUSTOM_MAX_SUPPLY: u64 = 100_000_000;

    /// Custom schedule: minimum launch price
    pub const CUSTOM_MIN_PRICE: f64 = 0.001;

    /// Custom schedule: maximum launch price
    pub const CUSTOM_MAX_PRICE: f64 = 100.0;

    /// Custom schedule: minimum holders per milestone
    pub const CUSTOM_MIN_HOLDERS: u64 = 10;

    /// Custom schedule: minimum milestone reward
    pub const CUSTOM_MIN_REWARD: f64 = 0.01;

    /// Custom schedule: maximum milestone reward
    pub const CUSTOM_MAX_REWARD: f64 = 0.5;

    /// Slack, in units of the last rendered digit, for float noise in a custom price
    pub const PRICE_PRECISION_TOLERANCE: f64 = 1e-6;
}

pub use constants::*;

/// Compute tokenomics with the default engine
pub fn compute_tokenomics(metrics: &CreatorMetrics, tier: Tier) -> Result<Tokenomics> {
    TokenomicsEngine::default().compute_tokenomics(metrics, tier)
}

/// Validate a custom schedule with the default engine
pub fn validate_custom_tokenomics(input: &CustomTokenomicsInput) -> Result<Tokenomics> {
    TokenomicsEngine::default().validate_custom_tokenomics(input)
}
