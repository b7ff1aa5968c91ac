/// Model version lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("model version {version} was never loaded")]
    UnknownVersion { version: String },

    #[error("another switch or rollback is in flight")]
    UpdateInProgress,

    #[error("model version {version} is retired")]
    VersionRetired { version: String },

    #[error("cannot retire the active model version {version}")]
    ActiveVersionRetire { version: String },
}
