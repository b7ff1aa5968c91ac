use std::sync::{Mutex, PoisonError};

use bhasha_core::errors::BhashaResult;
use bhasha_core::models::FeedbackEntry;
use bhasha_core::traits::IFeedbackSink;

/// Default sink: one tracing event per batch, nothing retained.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl IFeedbackSink for LogSink {
    fn flush(&self, batch: &[FeedbackEntry]) -> BhashaResult<()> {
        let corrected = batch.iter().filter(|e| !e.is_correct()).count();
        tracing::info!(
            event = "feedback_batch_flushed",
            batch_size = batch.len(),
            corrected,
            "feedback batch flushed"
        );
        Ok(())
    }
}

/// Sink that keeps every flushed batch in memory. Useful for embedding and
/// for inspecting exports in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<FeedbackEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches received so far, in flush order.
    pub fn batches(&self) -> Vec<Vec<FeedbackEntry>> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total entries across all batches.
    pub fn entry_count(&self) -> usize {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(Vec::len)
            .sum()
    }
}

impl IFeedbackSink for MemorySink {
    fn flush(&self, batch: &[FeedbackEntry]) -> BhashaResult<()> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch.to_vec());
        Ok(())
    }
}
