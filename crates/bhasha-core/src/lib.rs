//! # bhasha-core
//!
//! Foundation crate for the Bhasha dialect-detection engine.
//! Defines identifiers, score maps, detection/feedback models, the scorer and
//! sink traits, errors, config, and constants. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::BhashaConfig;
pub use errors::{BhashaError, BhashaResult};
pub use models::{
    AudioFeatures, Dialect, DialectScores, DetectionResult, FeedbackEntry, Language,
    ModelArtifact, ModelMetrics, ModelVersion,
};
