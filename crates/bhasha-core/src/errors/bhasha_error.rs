use super::{ArtifactError, ConfigError, ExperimentError, RegistryError};

/// Top-level error for every fallible Bhasha operation.
///
/// Detection itself never fails; these surface from model lifecycle,
/// experiment management, artifact parsing, and configuration.
#[derive(Debug, thiserror::Error)]
pub enum BhashaError {
    #[error("model registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("experiment error: {0}")]
    ExperimentError(#[from] ExperimentError),

    #[error("artifact error: {0}")]
    ArtifactError(#[from] ArtifactError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("feedback export failed: {reason}")]
    ExportFailed { reason: String },
}

pub type BhashaResult<T> = Result<T, BhashaError>;
