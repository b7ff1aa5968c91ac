/// Model artifact validation errors, raised at load time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact {table} table is empty")]
    Empty { table: &'static str },

    #[error("artifact {table} table carries no probability mass")]
    ZeroMass { table: &'static str },

    #[error("artifact hint weight {value} must lie in [0, 1]")]
    InvalidHintWeight { value: f64 },

    #[error("artifact parse failed: {reason}")]
    ParseFailed { reason: String },
}
