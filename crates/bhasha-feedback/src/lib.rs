//! # bhasha-feedback
//!
//! Folds user feedback into per-model-version metrics, buffers entries for
//! batch export, and ratchets the global clarification threshold on
//! sustained low satisfaction.

mod sink;
mod store;
mod threshold;

pub use sink::{LogSink, MemorySink};
pub use store::FeedbackStore;
pub use threshold::AdaptiveThreshold;
