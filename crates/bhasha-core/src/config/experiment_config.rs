use serde::{Deserialize, Serialize};

use super::defaults;

/// Gradual rollout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Candidate traffic share when a deployment is gradual.
    pub rollout_split: f64,
    /// Per-arm samples required before a rollout is significant.
    pub rollout_min_samples: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            rollout_split: defaults::DEFAULT_ROLLOUT_SPLIT,
            rollout_min_samples: defaults::DEFAULT_ROLLOUT_MIN_SAMPLES,
        }
    }
}
