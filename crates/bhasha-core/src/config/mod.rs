mod bhasha_config;
mod clarification_config;
pub mod defaults;
mod ensemble_config;
mod experiment_config;
mod feedback_config;
mod observability_config;
mod session_config;

pub use bhasha_config::BhashaConfig;
pub use clarification_config::ClarificationConfig;
pub use ensemble_config::EnsembleConfig;
pub use experiment_config::ExperimentConfig;
pub use feedback_config::FeedbackConfig;
pub use observability_config::ObservabilityConfig;
pub use session_config::SessionConfig;
