//! Span definitions per operation: detection, feedback, deployment, experiment.

/// Create a detection span.
#[macro_export]
macro_rules! detection_span {
    ($session_id:expr, $segment_index:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::DETECTION,
            session_id = ?$session_id,
            segment_index = ?$segment_index
        )
    };
}

/// Create a feedback span.
#[macro_export]
macro_rules! feedback_span {
    ($session_id:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::FEEDBACK,
            session_id = %$session_id
        )
    };
}

/// Create a deployment span.
#[macro_export]
macro_rules! deployment_span {
    ($version:expr, $operation:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::DEPLOYMENT,
            version = %$version,
            operation = $operation
        )
    };
}

/// Create an experiment span.
#[macro_export]
macro_rules! experiment_span {
    ($test_id:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::EXPERIMENT,
            test_id = %$test_id
        )
    };
}

/// Span names, shared by the macros above and by log consumers.
pub mod names {
    pub const DETECTION: &str = "bhasha.detection";
    pub const FEEDBACK: &str = "bhasha.feedback";
    pub const DEPLOYMENT: &str = "bhasha.deployment";
    pub const EXPERIMENT: &str = "bhasha.experiment";
}
