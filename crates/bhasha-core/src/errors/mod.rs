mod artifact_error;
mod bhasha_error;
mod config_error;
mod experiment_error;
mod registry_error;

pub use artifact_error::ArtifactError;
pub use bhasha_error::{BhashaError, BhashaResult};
pub use config_error::ConfigError;
pub use experiment_error::ExperimentError;
pub use registry_error::RegistryError;
