//! Error types for tokenomics derivation and validation

use thiserror::Error;

/// Result type alias for tokenomics operations
pub type Result<T> = std::result::Result<T, TokenomicsError>;

/// Errors that can occur while deriving or validating tokenomics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenomicsError {
    // === Input Errors ===
    /// Audience metric is negative or non-finite
    #[error("Invalid metrics: {field} = {value}")]
    InvalidMetrics { field: &'static str, value: String },

    /// Custom total supply outside the accepted range
    #[error("Invalid supply: {value} (must be 1000..=100000000)")]
    InvalidSupply { value: String },

    /// Custom launch price outside the accepted range
    #[error("Invalid price {value}: {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Custom milestone entry rejected
    #[error("Invalid milestone {index}: {reason}")]
    InvalidMilestone { index: usize, reason: String },

    /// Tier label not present in the tier table
    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    // === Configuration Errors ===
    /// Generated schedule is not strictly increasing
    #[error("Milestone {index} breaks monotonicity: {previous} -> {current}")]
    MonotonicityViolation {
        index: usize,
        previous: String,
        current: String,
    },

    /// Engine configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenomicsError {
    /// Get the error code for API responses
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidMetrics { .. } => 4001,
            Self::InvalidSupply { .. } => 4002,
            Self::InvalidPrice { .. } => 4003,
            Self::InvalidMilestone { .. } => 4004,
            Self::UnknownTier(_) => 4005,
            Self::MonotonicityViolation { .. } => 5001,
            Self::InvalidConfig(_) => 5002,
        }
    }

    /// HTTP status a caller should surface
    pub fn http_status(&self) -> u16 {
        if self.is_configuration_error() {
            500
        } else {
            400
        }
    }

    /// Configuration bugs, as opposed to bad caller input
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MonotonicityViolation { .. } | Self::InvalidConfig(_)
        )
    }

    /// Check if error is recoverable by retrying
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = TokenomicsError::InvalidSupply {
            value: "999".to_string(),
        };
        assert_eq!(err.code(), 4002);
        assert_eq!(err.http_status(), 400);

        let err = TokenomicsError::InvalidConfig("bad table".to_string());
        assert_eq!(err.code(), 5002);
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = TokenomicsError::InvalidMilestone {
            index: 3,
            reason: "reward 0.6 above 0.5".to_string(),
        };

        let msg = format!("{}", err);
        assert!(msg.contains("milestone 3"));
        assert!(msg.contains("0.6"));
    }

    #[test]
    fn test_nothing_is_recoverable() {
        assert!(!TokenomicsError::UnknownTier("ultra".into()).is_recoverable());
        assert!(!TokenomicsError::InvalidConfig("x".into()).is_recoverable());
    }
}
