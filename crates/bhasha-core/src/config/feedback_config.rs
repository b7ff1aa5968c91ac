use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback buffering and threshold adaptation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Entries buffered before a batch flush.
    pub buffer_capacity: usize,
    /// Smoothed satisfaction below this raises the clarification threshold.
    pub low_satisfaction: f64,
    /// EWMA factor for smoothed satisfaction.
    pub satisfaction_smoothing: f64,
    /// Satisfaction samples required between two raises.
    pub adaptation_min_samples: u64,
    /// Amount added per raise.
    pub threshold_step: f64,
    /// Ceiling for the clarification threshold.
    pub max_threshold: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: defaults::DEFAULT_BUFFER_CAPACITY,
            low_satisfaction: defaults::DEFAULT_LOW_SATISFACTION,
            satisfaction_smoothing: defaults::DEFAULT_SATISFACTION_SMOOTHING,
            adaptation_min_samples: defaults::DEFAULT_ADAPTATION_MIN_SAMPLES,
            threshold_step: defaults::DEFAULT_THRESHOLD_STEP,
            max_threshold: defaults::DEFAULT_MAX_THRESHOLD,
        }
    }
}
