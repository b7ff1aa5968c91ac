//! # bhasha-experiment
//!
//! Live A/B tests between model versions. Sessions are bucketed by a stable
//! hash so a session never changes arm; results are read from the per-version
//! feedback metrics.

pub mod bucketing;
mod definition;
mod manager;

pub use bucketing::bucket;
pub use definition::{Arm, ExperimentDefinition, ExperimentResults};
pub use manager::ExperimentManager;
