use serde::{Deserialize, Serialize};

use super::defaults;

/// Clarification policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarificationConfig {
    /// Confidence below which the user is asked to confirm the language.
    pub initial_threshold: f64,
}

impl Default for ClarificationConfig {
    fn default() -> Self {
        Self {
            initial_threshold: defaults::DEFAULT_CLARIFICATION_THRESHOLD,
        }
    }
}
