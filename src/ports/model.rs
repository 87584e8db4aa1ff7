//! Model ports: traits for the pre-trained scaler and classifier.
//!
//! Both collaborators are treated as opaque, deterministic and
//! side-effect-free: given a correctly ordered numeric vector they return a
//! transformed vector, a binary label and a class-1 probability. How they
//! compute it is an adapter concern.

use crate::domain::FeatureVector;

/// Errors raised by the scaler or classifier during invocation.
///
/// Deliberately distinct from `EncodingError`: an inference failure points
/// at an artifact/version problem, not at the user's inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("model produced an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("malformed model: {0}")]
    MalformedModel(String),
}

/// The trained feature-wise normalization, applied unchanged from training
/// time.
pub trait FeatureScaler: Send + Sync {
    /// Transform an encoded feature vector into model input space.
    ///
    /// The output has the same length as the input.
    ///
    /// # Errors
    /// Returns `InferenceError::DimensionMismatch` if the vector does not
    /// match the trained schema width.
    fn transform(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError>;
}

/// The trained decision function.
pub trait Classifier: Send + Sync {
    /// Predict the binary class label (0 = low risk, 1 = high risk).
    ///
    /// # Errors
    /// Returns `InferenceError` on dimension mismatch or a corrupt model.
    fn predict(&self, scaled: &[f64]) -> Result<u8, InferenceError>;

    /// Predict per-class probabilities `[p0, p1]`.
    ///
    /// # Errors
    /// Returns `InferenceError` on dimension mismatch or a corrupt model.
    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], InferenceError>;
}
