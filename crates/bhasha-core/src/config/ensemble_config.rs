use serde::{Deserialize, Serialize};

use super::defaults;

/// Fusion weights for the two scorers. Must sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    pub acoustic_weight: f64,
    pub linguistic_weight: f64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            acoustic_weight: defaults::DEFAULT_ACOUSTIC_WEIGHT,
            linguistic_weight: defaults::DEFAULT_LINGUISTIC_WEIGHT,
        }
    }
}
