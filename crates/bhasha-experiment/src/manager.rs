//! ExperimentManager: start/stop publish a new snapshot under a writer lock;
//! assignment and results read the current snapshot without locking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwap;

use bhasha_core::errors::{BhashaError, BhashaResult, ExperimentError};
use bhasha_core::models::ModelVersion;
use bhasha_feedback::FeedbackStore;
use chrono::Utc;
use tracing::info;

use crate::definition::{Arm, ExperimentDefinition, ExperimentResults};

type Tests = HashMap<String, ExperimentDefinition>;

pub struct ExperimentManager {
    tests: ArcSwap<Tests>,
    /// Serializes copy-on-write updates of `tests`.
    writer: Mutex<()>,
    feedback: Arc<FeedbackStore>,
    next_sequence: AtomicU64,
}

impl ExperimentManager {
    pub fn new(feedback: Arc<FeedbackStore>) -> Self {
        Self {
            tests: ArcSwap::from_pointee(HashMap::new()),
            writer: Mutex::new(()),
            feedback,
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Start a test. A stopped test with the same id is replaced; an active
    /// one is a conflict.
    pub fn start(
        &self,
        test_id: &str,
        version_a: ModelVersion,
        version_b: ModelVersion,
        split: f64,
        min_samples: u64,
    ) -> BhashaResult<()> {
        if !split.is_finite() || split <= 0.0 || split >= 1.0 {
            return Err(ExperimentError::InvalidSplit { split }.into());
        }
        if version_a == version_b {
            return Err(ExperimentError::IdenticalArms {
                version: version_a.to_string(),
            }
            .into());
        }

        let _writer = self.lock_writer()?;
        let mut tests = Tests::clone(&self.tests.load());
        if tests.get(test_id).is_some_and(|t| t.active) {
            return Err(ExperimentError::DuplicateTest {
                test_id: test_id.to_string(),
            }
            .into());
        }

        let definition = ExperimentDefinition {
            test_id: test_id.to_string(),
            version_a,
            version_b,
            traffic_split: split,
            min_samples,
            active: true,
            started_at: Utc::now(),
            stopped_at: None,
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
        };
        info!(
            test_id,
            control = %definition.version_a,
            candidate = %definition.version_b,
            split,
            min_samples,
            "experiment started"
        );
        tests.insert(test_id.to_string(), definition);
        self.tests.store(Arc::new(tests));
        Ok(())
    }

    /// Deactivate a test. Stopping a stopped test succeeds; an unknown id is
    /// an error.
    pub fn stop(&self, test_id: &str) -> BhashaResult<()> {
        let _writer = self.lock_writer()?;
        let mut tests = Tests::clone(&self.tests.load());
        let test = tests
            .get_mut(test_id)
            .ok_or_else(|| ExperimentError::UnknownTest {
                test_id: test_id.to_string(),
            })?;
        if !test.active {
            return Ok(());
        }
        test.active = false;
        test.stopped_at = Some(Utc::now());
        info!(test_id, "experiment stopped");
        self.tests.store(Arc::new(tests));
        Ok(())
    }

    /// Version for a session under a test. Pure in `(session_id, test_id)`;
    /// None only for an unknown test.
    pub fn assign_version(&self, session_id: &str, test_id: &str) -> Option<ModelVersion> {
        self.read()
            .get(test_id)
            .map(|t| t.version_for(session_id).clone())
    }

    pub fn assign_arm(&self, session_id: &str, test_id: &str) -> Option<Arm> {
        self.read().get(test_id).map(|t| t.arm_for(session_id))
    }

    /// Per-arm metrics. Never fails for a known test; `significant` stays
    /// false until both arms have `min_samples` feedback entries.
    pub fn results(&self, test_id: &str) -> Option<ExperimentResults> {
        let test = self.read().get(test_id).cloned()?;
        let metrics_a = self.feedback.metrics(&test.version_a);
        let metrics_b = self.feedback.metrics(&test.version_b);
        let samples_a = metrics_a.feedback_count;
        let samples_b = metrics_b.feedback_count;

        Some(ExperimentResults {
            significant: samples_a >= test.min_samples && samples_b >= test.min_samples,
            test_id: test.test_id,
            version_a: test.version_a,
            version_b: test.version_b,
            samples_a,
            samples_b,
            metrics_a: metrics_a.snapshot(),
            metrics_b: metrics_b.snapshot(),
            active: test.active,
        })
    }

    pub fn definition(&self, test_id: &str) -> Option<ExperimentDefinition> {
        self.read().get(test_id).cloned()
    }

    /// Ids of active tests in start order.
    pub fn active_tests(&self) -> Vec<String> {
        let tests = self.read();
        let mut active: Vec<_> = tests.values().filter(|t| t.active).collect();
        active.sort_by_key(|t| t.sequence);
        active.into_iter().map(|t| t.test_id.clone()).collect()
    }

    /// The most recently started active test; sessions not already in a live
    /// test join it.
    pub fn serving_test(&self) -> Option<ExperimentDefinition> {
        self.read()
            .values()
            .filter(|t| t.active)
            .max_by_key(|t| t.sequence)
            .cloned()
    }

    fn read(&self) -> Arc<Tests> {
        self.tests.load_full()
    }

    fn lock_writer(&self) -> BhashaResult<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|e| BhashaError::ConcurrencyError(format!("experiment lock poisoned: {e}")))
    }
}
