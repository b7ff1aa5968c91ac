//! DetectionOrchestrator: the single owner of every store.
//!
//! Detection and feedback are independent failure domains: nothing in the
//! feedback or experiment path can make `detect` fail.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use bhasha_core::config::BhashaConfig;
use bhasha_core::constants::{ROLLOUT_TEST_PREFIX, VERSION};
use bhasha_core::errors::{BhashaResult, ExperimentError};
use bhasha_core::models::{
    normalize_satisfaction, AudioFeatures, DetectionResult, FeedbackEntry, FeedbackPayload,
    ModelArtifact, ModelVersion,
};
use bhasha_core::traits::IFeedbackSink;
use bhasha_ensemble::EnsembleDetector;
use bhasha_experiment::{ExperimentManager, ExperimentResults};
use bhasha_feedback::{AdaptiveThreshold, FeedbackStore, LogSink};
use bhasha_registry::{ActiveModel, ModelVersionRegistry};
use bhasha_session::{mixing, SessionContext, SessionContextTracker};
use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::clarification;
use crate::status::{DeploymentOutcome, ExperimentOutcome, SystemStatus};
use crate::{deployment_span, detection_span, experiment_span, feedback_span};

/// What a session was last served, used for feedback attribution and to
/// keep the session in one experiment.
#[derive(Debug, Clone)]
struct ServedModel {
    version: ModelVersion,
    test_id: Option<String>,
}

pub struct DetectionOrchestrator {
    config: BhashaConfig,
    registry: ModelVersionRegistry,
    sessions: SessionContextTracker,
    feedback: Arc<FeedbackStore>,
    experiments: ExperimentManager,
    threshold: AdaptiveThreshold,
    /// Last version served to each session and the test that chose it.
    served: DashMap<String, ServedModel>,
    detections: AtomicU64,
}

impl DetectionOrchestrator {
    /// Validate `config` and start with `initial_version` active. Feedback
    /// batches go to a [`LogSink`].
    pub fn new(
        config: BhashaConfig,
        initial_version: impl Into<ModelVersion>,
        artifact: ModelArtifact,
    ) -> BhashaResult<Self> {
        Self::with_sink(config, initial_version, artifact, Arc::new(LogSink))
    }

    pub fn with_sink(
        config: BhashaConfig,
        initial_version: impl Into<ModelVersion>,
        artifact: ModelArtifact,
        sink: Arc<dyn IFeedbackSink>,
    ) -> BhashaResult<Self> {
        config.validate()?;
        let feedback = Arc::new(FeedbackStore::with_sink(&config.feedback, sink));
        let orchestrator = Self {
            registry: ModelVersionRegistry::new(initial_version, artifact),
            sessions: SessionContextTracker::new(config.session.clone()),
            experiments: ExperimentManager::new(Arc::clone(&feedback)),
            threshold: AdaptiveThreshold::new(
                config.clarification.initial_threshold,
                config.feedback.clone(),
            ),
            feedback,
            served: DashMap::new(),
            detections: AtomicU64::new(0),
            config,
        };
        info!(
            active = %orchestrator.registry.active_version(),
            window = orchestrator.config.session.window_size,
            threshold = orchestrator.threshold.current(),
            "detection orchestrator ready"
        );
        Ok(orchestrator)
    }

    // ── Detection ─────────────────────────────────────────────────────────

    /// Detect the dialect of one segment. Never fails.
    ///
    /// With a session id the result carries the session's switch points and
    /// language distribution; a missing segment index continues the
    /// session's own count.
    pub fn detect(
        &self,
        features: &AudioFeatures,
        session_id: Option<&str>,
        segment_index: Option<u32>,
    ) -> DetectionResult {
        let started = Instant::now();
        let _span = detection_span!(session_id, segment_index).entered();

        let (model, test_id) = self.resolve_model(session_id);
        let detector =
            EnsembleDetector::from_artifact(Arc::clone(&model.artifact), &self.config.ensemble);
        let decision = detector.detect(features);
        let primary_language = decision.primary.language();

        let (secondary_language, code_switching_detected, switch_points, language_distribution) =
            match session_id {
                Some(sid) => {
                    let index =
                        segment_index.unwrap_or_else(|| self.sessions.next_segment_index(sid));
                    let update = self.sessions.update(sid, &decision.fused, None, index);
                    self.served.insert(
                        sid.to_string(),
                        ServedModel {
                            version: model.version.clone(),
                            test_id,
                        },
                    );
                    (
                        update.secondary_language,
                        update.code_switching_detected,
                        update.switch_points,
                        update.language_distribution,
                    )
                }
                None => (
                    mixing::secondary_language(
                        &decision.fused,
                        self.config.session.mixing_threshold,
                    ),
                    false,
                    Vec::new(),
                    BTreeMap::from([(primary_language, 1.0)]),
                ),
            };

        let threshold = self.threshold.current();
        let needs_clarification = decision.confidence < threshold;
        let clarification_prompt = needs_clarification.then(|| {
            clarification::prompt(primary_language, decision.primary, &decision.alternatives)
        });

        self.detections.fetch_add(1, Ordering::Relaxed);
        let result = DetectionResult {
            primary_dialect: decision.primary,
            primary_language,
            confidence: decision.confidence,
            alternatives: decision.alternatives,
            secondary_language,
            code_switching_detected,
            switch_points,
            language_distribution,
            context_preserved: true,
            needs_clarification,
            clarification_prompt,
            model_version: model.version.clone(),
            detected_at: Utc::now(),
            detection_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        debug!(
            primary = %result.primary_dialect,
            confidence = result.confidence,
            version = %result.model_version,
            needs_clarification,
            elapsed_ms = result.detection_time_ms,
            "detection complete"
        );
        result
    }

    /// Version for a request plus the test that routed it.
    ///
    /// A session stays in the test it first joined while that test is
    /// active; only sessions without a live test join the newest one. An arm
    /// whose version is not loaded falls back to active.
    fn resolve_model(&self, session_id: Option<&str>) -> (Arc<ActiveModel>, Option<String>) {
        let active = self.registry.active();
        let Some(sid) = session_id else {
            return (active, None);
        };
        let pinned = self
            .served
            .get(sid)
            .and_then(|s| s.test_id.clone())
            .and_then(|tid| self.experiments.definition(&tid))
            .filter(|t| t.active);
        let Some(test) = pinned.or_else(|| self.experiments.serving_test()) else {
            return (active, None);
        };

        let assigned = test.version_for(sid);
        if *assigned == active.version {
            return (active, Some(test.test_id));
        }
        let model = match self.registry.artifact(assigned) {
            Some(artifact) => Arc::new(ActiveModel {
                version: assigned.clone(),
                artifact,
            }),
            None => {
                warn!(
                    test_id = %test.test_id,
                    assigned = %assigned,
                    fallback = %active.version,
                    "assigned version not loaded, serving active version"
                );
                active
            }
        };
        (model, Some(test.test_id))
    }

    // ── Feedback ──────────────────────────────────────────────────────────

    /// Normalise and record feedback. The detected dialect defaults to the
    /// session's last detection and the version to the one last served to the
    /// session. Returns None when no detected dialect can be established; the
    /// satisfaction score still feeds the threshold.
    pub fn submit_feedback(
        &self,
        session_id: &str,
        payload: FeedbackPayload,
    ) -> Option<FeedbackEntry> {
        let _span = feedback_span!(session_id).entered();

        let context = self.sessions.get(session_id);
        let last = context.as_ref().and_then(SessionContext::last);
        let detected = payload.detected_dialect.or(last.map(|s| s.dialect));
        let confidence = payload
            .confidence
            .or(last.map(|s| s.confidence))
            .unwrap_or(0.0);
        let version = payload
            .model_version
            .or_else(|| self.served.get(session_id).map(|s| s.version.clone()))
            .unwrap_or_else(|| self.registry.active_version());

        let entry = detected.map(|dialect| {
            FeedbackEntry::new(
                session_id,
                dialect,
                confidence,
                payload.correct_dialect,
                payload.satisfaction,
                version,
            )
        });

        let satisfaction = match &entry {
            Some(entry) => {
                self.feedback.record(entry.clone());
                entry.satisfaction
            }
            None => {
                warn!(session_id, "feedback without a detected dialect, metrics not updated");
                normalize_satisfaction(payload.satisfaction)
            }
        };
        if let Some(score) = satisfaction {
            self.threshold.observe(score);
        }
        entry
    }

    pub fn clarification_threshold(&self) -> f64 {
        self.threshold.current()
    }

    // ── Sessions ──────────────────────────────────────────────────────────

    pub fn get_session_context(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.get(session_id)
    }

    /// Clear a session's history. No-op for unknown ids.
    pub fn reset_session_context(&self, session_id: &str) -> bool {
        self.sessions.reset(session_id)
    }

    /// Forget a session entirely. No-op for unknown ids.
    pub fn clear_session(&self, session_id: &str) -> bool {
        self.served.remove(session_id);
        self.sessions.clear(session_id)
    }

    /// Drop sessions idle longer than `max_idle`. Only runs when called.
    pub fn evict_idle_sessions(&self, max_idle: chrono::Duration) -> usize {
        let removed = self.sessions.evict_idle(max_idle);
        if removed > 0 {
            let live: std::collections::HashSet<String> =
                self.sessions.session_ids().into_iter().collect();
            self.served.retain(|sid, _| live.contains(sid));
        }
        removed
    }

    // ── Deployment ────────────────────────────────────────────────────────

    /// Load `version` and either switch to it or, with `gradual_rollout`,
    /// start a `rollout-<version>` experiment against the active version.
    pub fn deploy_model(
        &self,
        version: impl Into<ModelVersion>,
        artifact: ModelArtifact,
        gradual_rollout: bool,
    ) -> DeploymentOutcome {
        let version = version.into();
        let operation = if gradual_rollout { "rollout" } else { "deploy" };
        let _span = deployment_span!(version, operation).entered();

        if let Err(e) = self.registry.load(version.clone(), artifact) {
            return self.deployment_failed(&version, e.to_string());
        }

        if gradual_rollout {
            let test_id = format!("{ROLLOUT_TEST_PREFIX}{version}");
            let control = self.registry.active_version();
            return match self.experiments.start(
                &test_id,
                control,
                version.clone(),
                self.config.experiment.rollout_split,
                self.config.experiment.rollout_min_samples,
            ) {
                Ok(()) => DeploymentOutcome {
                    success: true,
                    active_version: self.registry.active_version(),
                    rollout_test: Some(test_id),
                    error: None,
                },
                Err(e) => self.deployment_failed(&version, e.to_string()),
            };
        }

        match self.registry.switch_active(&version) {
            Ok(()) => DeploymentOutcome {
                success: true,
                active_version: self.registry.active_version(),
                rollout_test: None,
                error: None,
            },
            Err(e) => self.deployment_failed(&version, e.to_string()),
        }
    }

    /// Make `version` active again and retire the version rolled back from.
    pub fn rollback_model(&self, version: impl Into<ModelVersion>) -> DeploymentOutcome {
        let version = version.into();
        let _span = deployment_span!(version, "rollback").entered();
        match self.registry.rollback(&version) {
            Ok(()) => DeploymentOutcome {
                success: true,
                active_version: self.registry.active_version(),
                rollout_test: None,
                error: None,
            },
            Err(e) => self.deployment_failed(&version, e.to_string()),
        }
    }

    fn deployment_failed(&self, version: &ModelVersion, error: String) -> DeploymentOutcome {
        warn!(version = %version, error = %error, "deployment rejected");
        DeploymentOutcome {
            success: false,
            active_version: self.registry.active_version(),
            rollout_test: None,
            error: Some(error),
        }
    }

    // ── Experiments ───────────────────────────────────────────────────────

    /// A/B test the active version (control) against a loaded candidate.
    pub fn start_experiment(
        &self,
        test_id: &str,
        candidate: impl Into<ModelVersion>,
        split: f64,
        min_samples: u64,
    ) -> ExperimentOutcome {
        let candidate = candidate.into();
        let _span = experiment_span!(test_id).entered();

        let started = if self.registry.is_loaded(&candidate) {
            self.experiments.start(
                test_id,
                self.registry.active_version(),
                candidate,
                split,
                min_samples,
            )
        } else {
            Err(ExperimentError::VersionNotLoaded {
                version: candidate.to_string(),
            }
            .into())
        };

        match started {
            Ok(()) => ExperimentOutcome {
                success: true,
                test_id: test_id.to_string(),
                error: None,
            },
            Err(e) => {
                warn!(test_id, error = %e, "experiment rejected");
                ExperimentOutcome {
                    success: false,
                    test_id: test_id.to_string(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// False only for an unknown test.
    pub fn stop_experiment(&self, test_id: &str) -> bool {
        self.experiments.stop(test_id).is_ok()
    }

    pub fn get_experiment_results(&self, test_id: &str) -> Option<ExperimentResults> {
        self.experiments.results(test_id)
    }

    // ── Status ────────────────────────────────────────────────────────────

    pub fn get_system_status(&self) -> SystemStatus {
        SystemStatus {
            initialized: true,
            engine_version: VERSION.to_string(),
            active_version: self.registry.active_version(),
            loaded_versions: self.registry.loaded_versions(),
            active_tests: self.experiments.active_tests(),
            metrics: self
                .feedback
                .all_metrics()
                .into_iter()
                .map(|(version, metrics)| (version, metrics.snapshot()))
                .collect(),
            active_sessions: self.sessions.session_count(),
            clarification_threshold: self.threshold.current(),
            feedback_recorded: self.feedback.total_recorded(),
            detections_served: self.detections.load(Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &BhashaConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModelVersionRegistry {
        &self.registry
    }

    pub fn feedback_store(&self) -> &FeedbackStore {
        &self.feedback
    }

    pub fn experiments(&self) -> &ExperimentManager {
        &self.experiments
    }
}
