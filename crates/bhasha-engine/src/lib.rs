//! # bhasha-engine
//!
//! [`DetectionOrchestrator`] composes the workspace per request: resolve the
//! model version (experiment arm or active), score with the ensemble, fold
//! into the session context, apply the clarification policy, stamp and
//! return. Feedback, deployment, and experiment control go through the same
//! owner.

pub mod clarification;
pub mod orchestrator;
pub mod status;
pub mod tracing_setup;

pub use orchestrator::DetectionOrchestrator;
pub use status::{DeploymentOutcome, ExperimentOutcome, SystemStatus};
