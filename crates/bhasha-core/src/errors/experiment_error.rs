/// A/B experiment management errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExperimentError {
    #[error("traffic split {split} must lie strictly between 0 and 1")]
    InvalidSplit { split: f64 },

    #[error("experiment {test_id} is already active")]
    DuplicateTest { test_id: String },

    #[error("experiment {test_id} not found")]
    UnknownTest { test_id: String },

    #[error("experiment arms must differ, both are {version}")]
    IdenticalArms { version: String },

    #[error("candidate version {version} is not loaded")]
    VersionNotLoaded { version: String },
}
