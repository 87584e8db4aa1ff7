//! Analysis service: orchestrates the input-to-prediction pipeline.
//!
//! This service coordinates:
//! - Feature encoding (fixed schema, fixed column order)
//! - Scaler transform and classifier invocation
//! - Defensive probability validation
//! - Advice rule evaluation over the raw profile

use std::sync::Arc;

use crate::domain::{encode, lifestyle_advice, Analysis, PatientProfile, PredictionResult};
use crate::ports::{Classifier, FeatureScaler, InferenceError};
use crate::HeartGuardError;

/// Service for running one risk analysis.
///
/// Holds immutable, process-lifetime handles to the model collaborators.
/// Every call is a fresh, idempotent attempt: identical inputs against the
/// same artifacts yield identical results.
pub struct AnalysisService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    classifier: Arc<C>,
    scaler: Arc<S>,
}

impl<C, S> AnalysisService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    /// Create a new analysis service.
    pub fn new(classifier: Arc<C>, scaler: Arc<S>) -> Self {
        Self { classifier, scaler }
    }

    /// Run the full pipeline for one patient profile.
    ///
    /// # Errors
    /// Returns `HeartGuardError::Inference` if the scaler or classifier
    /// fails, or if the model reports a probability outside `[0, 1]`.
    pub fn analyze(&self, profile: &PatientProfile) -> Result<Analysis, HeartGuardError> {
        let features = encode(profile);
        let scaled = self.scaler.transform(&features)?;

        let label = self.classifier.predict(&scaled)?;
        let proba = self.classifier.predict_proba(&scaled)?;
        let probability = proba[1];

        // Defensive validation: never render a probability the model got wrong.
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(InferenceError::InvalidProbability(probability).into());
        }

        let prediction = PredictionResult::new(label, probability);
        let advice = lifestyle_advice(profile);

        tracing::info!(
            "Analysis complete: tier={}, probability={:.4}, advice_count={}",
            prediction.tier,
            prediction.probability,
            advice.len()
        );

        Ok(Analysis::new(prediction, advice))
    }
}
