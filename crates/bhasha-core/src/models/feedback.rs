//! User feedback on a detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Dialect, ModelVersion};
use crate::constants::{MAX_SATISFACTION, MIN_SATISFACTION};

/// Raw feedback as relayed by the API layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackPayload {
    pub detected_dialect: Option<Dialect>,
    pub confidence: Option<f64>,
    pub correct_dialect: Option<Dialect>,
    pub satisfaction: Option<i64>,
    pub model_version: Option<ModelVersion>,
}

/// Keep a raw satisfaction score only if it lies in 1–5.
pub fn normalize_satisfaction(raw: Option<i64>) -> Option<u8> {
    raw.filter(|s| (i64::from(MIN_SATISFACTION)..=i64::from(MAX_SATISFACTION)).contains(s))
        .map(|s| s as u8)
}

/// A recorded, normalised feedback entry. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub session_id: String,
    pub detected_dialect: Dialect,
    pub confidence: f64,
    /// The dialect the user says was spoken, when they corrected us.
    pub correct_dialect: Option<Dialect>,
    /// Satisfaction score, 1–5.
    pub satisfaction: Option<u8>,
    pub model_version: ModelVersion,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEntry {
    /// Build an entry, clamping confidence and dropping an out-of-range satisfaction.
    pub fn new(
        session_id: impl Into<String>,
        detected_dialect: Dialect,
        confidence: f64,
        correct_dialect: Option<Dialect>,
        satisfaction: Option<i64>,
        model_version: ModelVersion,
    ) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let satisfaction = normalize_satisfaction(satisfaction);
        Self {
            session_id: session_id.into(),
            detected_dialect,
            confidence,
            correct_dialect,
            satisfaction,
            model_version,
            timestamp: Utc::now(),
        }
    }

    /// A prediction counts as correct unless the user named a different dialect.
    pub fn is_correct(&self) -> bool {
        self.correct_dialect
            .map_or(true, |correct| correct == self.detected_dialect)
    }
}
