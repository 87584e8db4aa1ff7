//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external collaborators.
//! Encoding and advice are deterministic functions over `PatientProfile`.

mod advice;
mod encode;
mod patient;
mod prediction;

pub use advice::{lifestyle_advice, Advice};
pub use encode::{encode, EncodingError, FeatureVector, EXPECTED_COLUMNS, FEATURE_COUNT};
pub use patient::{
    AirPollutionExposure, AlcoholConsumption, DietaryHabits, EkgResult, Gender, IncomeLevel,
    PatientProfile, PhysicalActivity, Region, SmokingStatus, StressLevel,
};
pub use prediction::{Analysis, PredictionResult, RiskTier};

#[cfg(test)]
pub(crate) use patient::fixtures;
