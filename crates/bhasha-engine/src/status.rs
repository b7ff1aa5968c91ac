//! Structured outcomes returned across the service boundary.

use std::collections::BTreeMap;

use bhasha_core::errors::BhashaResult;
use bhasha_core::models::{MetricsSnapshot, ModelVersion};
use serde::{Deserialize, Serialize};

/// Result of a deploy or rollback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentOutcome {
    pub success: bool,
    /// Active version after the call, whether or not it succeeded.
    pub active_version: ModelVersion,
    /// Experiment id when the deploy started a gradual rollout.
    pub rollout_test: Option<String>,
    pub error: Option<String>,
}

/// Result of starting an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentOutcome {
    pub success: bool,
    pub test_id: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub initialized: bool,
    pub engine_version: String,
    pub active_version: ModelVersion,
    pub loaded_versions: Vec<ModelVersion>,
    pub active_tests: Vec<String>,
    pub metrics: BTreeMap<ModelVersion, MetricsSnapshot>,
    pub active_sessions: usize,
    pub clarification_threshold: f64,
    pub feedback_recorded: u64,
    pub detections_served: u64,
}

impl SystemStatus {
    pub fn to_json(&self) -> BhashaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
