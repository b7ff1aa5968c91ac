use bhasha_core::models::{MetricsSnapshot, ModelVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bucketing::bucket;

/// Which side of a test a session falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arm {
    Control,
    Candidate,
}

/// One A/B test. Immutable after start except for the active flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDefinition {
    pub test_id: String,
    /// Control.
    pub version_a: ModelVersion,
    /// Candidate.
    pub version_b: ModelVersion,
    pub traffic_split: f64,
    pub min_samples: u64,
    pub active: bool,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    /// Monotonic start order, used to pick the serving test.
    pub(crate) sequence: u64,
}

impl ExperimentDefinition {
    /// Bucket below the split goes to the candidate.
    pub fn arm_for(&self, session_id: &str) -> Arm {
        if bucket(session_id, &self.test_id) < self.traffic_split {
            Arm::Candidate
        } else {
            Arm::Control
        }
    }

    pub fn version_for(&self, session_id: &str) -> &ModelVersion {
        match self.arm_for(session_id) {
            Arm::Control => &self.version_a,
            Arm::Candidate => &self.version_b,
        }
    }
}

/// Aggregated outcome of a test, per arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResults {
    pub test_id: String,
    pub version_a: ModelVersion,
    pub version_b: ModelVersion,
    pub samples_a: u64,
    pub samples_b: u64,
    pub metrics_a: MetricsSnapshot,
    pub metrics_b: MetricsSnapshot,
    /// Both arms reached `min_samples`.
    pub significant: bool,
    pub active: bool,
}

impl ExperimentResults {
    /// The arm with the higher performance score, once significant.
    /// Ties favour the control.
    pub fn leader(&self) -> Option<Arm> {
        if !self.significant {
            return None;
        }
        if self.metrics_b.performance_score > self.metrics_a.performance_score {
            Some(Arm::Candidate)
        } else {
            Some(Arm::Control)
        }
    }
}
