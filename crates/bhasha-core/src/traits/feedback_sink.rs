use crate::errors::BhashaResult;
use crate::models::FeedbackEntry;

/// Downstream export target for batches of buffered feedback.
pub trait IFeedbackSink: Send + Sync {
    /// Receive one full batch. Errors are logged by the caller and never
    /// affect metric updates.
    fn flush(&self, batch: &[FeedbackEntry]) -> BhashaResult<()>;
}
