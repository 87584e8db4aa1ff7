//! # HeartGuard
//!
//! Early heart-attack risk screening in the terminal.
//!
//! This crate provides:
//! - A fixed 25-feature patient schema with closed categorical domains
//! - Deterministic encoding into the column order the classifier was trained on
//! - Inference through an exported random-forest model and standard scaler
//! - A rule-based lifestyle advice engine over the raw patient profile
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientProfile, encoder, advice, prediction)
//! - `ports`: Trait definitions for the model collaborators
//! - `adapters`: Concrete implementations (JSON model/scaler artifacts)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Analysis, PatientProfile, PredictionResult, RiskTier};

/// Result type for HeartGuard operations
pub type Result<T> = std::result::Result<T, HeartGuardError>;

/// Main error type for HeartGuard
#[derive(Debug, thiserror::Error)]
pub enum HeartGuardError {
    #[error("Model assets unavailable: {0}")]
    Asset(#[from] adapters::AssetError),

    #[error("Invalid patient input: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Inference failed: {0}")]
    Inference(#[from] ports::InferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
