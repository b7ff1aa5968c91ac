use serde::{Deserialize, Serialize};

use super::defaults;

/// Code-switching context tracking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of recent segments kept per session.
    pub window_size: usize,
    /// Minimum score for a second language to be reported as mixed in.
    pub mixing_threshold: f64,
    /// Cap on retained switch points per session (oldest dropped).
    pub max_switch_points: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::DEFAULT_WINDOW_SIZE,
            mixing_threshold: defaults::DEFAULT_MIXING_THRESHOLD,
            max_switch_points: defaults::DEFAULT_MAX_SWITCH_POINTS,
        }
    }
}
