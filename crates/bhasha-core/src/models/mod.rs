pub mod artifact;
pub mod detection_result;
pub mod dialect;
pub mod features;
pub mod feedback;
pub mod language;
pub mod metrics;
pub mod scores;
pub mod version;

pub use artifact::ModelArtifact;
pub use detection_result::{DetectionResult, DialectConfidence};
pub use dialect::Dialect;
pub use features::AudioFeatures;
pub use feedback::{normalize_satisfaction, FeedbackEntry, FeedbackPayload};
pub use language::Language;
pub use metrics::{MetricsSnapshot, ModelMetrics};
pub use scores::DialectScores;
pub use version::ModelVersion;
