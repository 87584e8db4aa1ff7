//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use case: one synchronous analysis per request.

mod analysis;

pub use analysis::AnalysisService;
