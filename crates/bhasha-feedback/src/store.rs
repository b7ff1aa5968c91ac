//! FeedbackStore: per-version running metrics plus a bounded export buffer.
//!
//! Metrics are updated before the entry touches the buffer, so a slow or
//! failing sink never delays accuracy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bhasha_core::config::FeedbackConfig;
use bhasha_core::models::{FeedbackEntry, ModelMetrics, ModelVersion};
use bhasha_core::traits::IFeedbackSink;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::sink::LogSink;

pub struct FeedbackStore {
    metrics: DashMap<ModelVersion, ModelMetrics>,
    buffer: Mutex<Vec<FeedbackEntry>>,
    capacity: usize,
    sink: Arc<dyn IFeedbackSink>,
    total: AtomicU64,
}

impl FeedbackStore {
    /// Store flushing to a [`LogSink`].
    pub fn new(config: &FeedbackConfig) -> Self {
        Self::with_sink(config, Arc::new(LogSink))
    }

    pub fn with_sink(config: &FeedbackConfig, sink: Arc<dyn IFeedbackSink>) -> Self {
        let capacity = config.buffer_capacity.max(1);
        Self {
            metrics: DashMap::new(),
            buffer: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            sink,
            total: AtomicU64::new(0),
        }
    }

    /// Fold an entry into its version's metrics, then buffer it. A full
    /// buffer is handed to the sink and cleared.
    pub fn record(&self, entry: FeedbackEntry) {
        self.metrics
            .entry(entry.model_version.clone())
            .or_default()
            .record(&entry);
        self.total.fetch_add(1, Ordering::Relaxed);

        debug!(
            session_id = %entry.session_id,
            version = %entry.model_version,
            correct = entry.is_correct(),
            satisfaction = ?entry.satisfaction,
            "feedback recorded"
        );

        let batch = {
            let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.push(entry);
            if buffer.len() >= self.capacity {
                Some(std::mem::take(&mut *buffer))
            } else {
                None
            }
        };
        if let Some(batch) = batch {
            self.export(&batch);
        }
    }

    /// Metrics for one version; zeroed if it has no feedback yet.
    pub fn metrics(&self, version: &ModelVersion) -> ModelMetrics {
        self.metrics
            .get(version)
            .map(|m| m.value().clone())
            .unwrap_or_default()
    }

    /// Metrics for every version with feedback, sorted by version id.
    pub fn all_metrics(&self) -> Vec<(ModelVersion, ModelMetrics)> {
        let mut all: Vec<_> = self
            .metrics
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        all
    }

    /// Entries recorded since construction.
    pub fn total_recorded(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Entries buffered and not yet flushed.
    pub fn pending(&self) -> usize {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Flush whatever is buffered. Returns the number of entries handed to
    /// the sink.
    pub fn flush(&self) -> usize {
        let batch = std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner));
        if batch.is_empty() {
            return 0;
        }
        self.export(&batch);
        batch.len()
    }

    fn export(&self, batch: &[FeedbackEntry]) {
        if let Err(e) = self.sink.flush(batch) {
            warn!(batch_size = batch.len(), error = %e, "feedback export failed, batch dropped");
        }
    }
}

impl Default for FeedbackStore {
    fn default() -> Self {
        Self::new(&FeedbackConfig::default())
    }
}
