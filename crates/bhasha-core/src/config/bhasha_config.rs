//! Top-level Bhasha configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ClarificationConfig, EnsembleConfig, ExperimentConfig, FeedbackConfig, ObservabilityConfig,
    SessionConfig,
};
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`BHASHA_*`)
/// 2. TOML file passed to [`BhashaConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BhashaConfig {
    pub ensemble: EnsembleConfig,
    pub session: SessionConfig,
    pub feedback: FeedbackConfig,
    pub clarification: ClarificationConfig,
    pub experiment: ExperimentConfig,
    pub observability: ObservabilityConfig,
}

impl BhashaConfig {
    /// Load a TOML file, apply environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing). Does not read
    /// the environment.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BHASHA_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BHASHA_WINDOW_SIZE").and_then(|v| v.parse().ok()) {
            self.session.window_size = v;
        }
        if let Some(v) = lookup("BHASHA_MIXING_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.session.mixing_threshold = v;
        }
        if let Some(v) = lookup("BHASHA_CLARIFICATION_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.clarification.initial_threshold = v;
        }
        if let Some(v) = lookup("BHASHA_ACOUSTIC_WEIGHT").and_then(|v| v.parse().ok()) {
            self.ensemble.acoustic_weight = v;
        }
        if let Some(v) = lookup("BHASHA_LINGUISTIC_WEIGHT").and_then(|v| v.parse().ok()) {
            self.ensemble.linguistic_weight = v;
        }
        if let Some(v) = lookup("BHASHA_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.ensemble;
        for (field, w) in [
            ("ensemble.acoustic_weight", e.acoustic_weight),
            ("ensemble.linguistic_weight", e.linguistic_weight),
        ] {
            unit_interval(field, w)?;
        }
        if (e.acoustic_weight + e.linguistic_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid("ensemble", "acoustic and linguistic weights must sum to 1"));
        }

        if self.session.window_size == 0 {
            return Err(invalid("session.window_size", "must be greater than 0"));
        }
        if self.session.max_switch_points == 0 {
            return Err(invalid("session.max_switch_points", "must be greater than 0"));
        }
        unit_interval("session.mixing_threshold", self.session.mixing_threshold)?;

        let f = &self.feedback;
        if f.buffer_capacity == 0 {
            return Err(invalid("feedback.buffer_capacity", "must be greater than 0"));
        }
        if !(1.0..=5.0).contains(&f.low_satisfaction) {
            return Err(invalid("feedback.low_satisfaction", "must be between 1 and 5"));
        }
        if !(f.satisfaction_smoothing > 0.0 && f.satisfaction_smoothing <= 1.0) {
            return Err(invalid("feedback.satisfaction_smoothing", "must be in (0, 1]"));
        }
        unit_interval("feedback.threshold_step", f.threshold_step)?;
        unit_interval("feedback.max_threshold", f.max_threshold)?;

        unit_interval(
            "clarification.initial_threshold",
            self.clarification.initial_threshold,
        )?;
        if self.clarification.initial_threshold > f.max_threshold {
            return Err(invalid(
                "clarification.initial_threshold",
                "must not exceed feedback.max_threshold",
            ));
        }

        let split = self.experiment.rollout_split;
        if !(split > 0.0 && split < 1.0) {
            return Err(invalid("experiment.rollout_split", "must be in (0, 1)"));
        }
        Ok(())
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
