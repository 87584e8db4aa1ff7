//! Prediction result types.
//!
//! Represents the output of one heart-attack risk analysis. All types here
//! are derived values with a lifetime of one render cycle.

use serde::{Deserialize, Serialize};

use super::advice::Advice;

/// Binary risk bucket derived from the classifier's label output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Class 0: low predicted risk
    Low,
    /// Class 1: high predicted risk
    High,
}

impl RiskTier {
    /// Derive the tier from the classifier's binary label.
    #[must_use]
    pub fn from_label(label: u8) -> Self {
        if label == 0 {
            Self::Low
        } else {
            Self::High
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Keep up routine checkups",
            Self::High => "High risk - Medical consultation advised",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Result of one model invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Risk classification from the binary label
    pub tier: RiskTier,

    /// Probability of the high-risk class (0.0 to 1.0)
    pub probability: f64,
}

impl PredictionResult {
    /// Package a validated label and class-1 probability.
    #[must_use]
    pub fn new(label: u8, probability: f64) -> Self {
        Self {
            tier: RiskTier::from_label(label),
            probability,
        }
    }

    /// Probability as a percentage rounded to one decimal, for display.
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.probability * 1000.0).round() / 10.0
    }
}

/// Complete output of one analysis: prediction plus lifestyle advice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// The model prediction
    pub prediction: PredictionResult,

    /// Ordered lifestyle recommendations (never empty)
    pub advice: Vec<Advice>,

    /// Timestamp of the analysis
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Analysis {
    #[must_use]
    pub fn new(prediction: PredictionResult, advice: Vec<Advice>) -> Self {
        Self {
            prediction,
            advice,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_label() {
        assert_eq!(RiskTier::from_label(0), RiskTier::Low);
        assert_eq!(RiskTier::from_label(1), RiskTier::High);
    }

    #[test]
    fn test_percent_rounding() {
        let result = PredictionResult::new(1, 0.7349);
        assert_eq!(result.tier, RiskTier::High);
        assert!((result.percent() - 73.5).abs() < f64::EPSILON);
    }
}
