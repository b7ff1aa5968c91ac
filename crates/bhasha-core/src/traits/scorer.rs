use crate::models::{AudioFeatures, DialectScores};

/// A signal source that maps a feature bundle to per-dialect confidence.
///
/// Implementations are pure and must not block: detection runs on the
/// request path and never suspends.
pub trait IScorer: Send + Sync {
    /// Scorer name, for logging.
    fn name(&self) -> &str;

    /// Score every dialect the scorer knows about. Never fails; unusable
    /// features are replaced with defaults before scoring.
    fn predict(&self, features: &AudioFeatures) -> DialectScores;
}
