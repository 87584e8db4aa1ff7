//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifact`: JSON model/scaler exports produced by the training pipeline

pub mod artifact;

pub use artifact::{AssetError, ModelAssets, RandomForest, StandardScaler};
