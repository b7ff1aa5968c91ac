use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Dialect, Language, ModelVersion};

/// A dialect with its fused confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialectConfidence {
    pub dialect: Dialect,
    pub confidence: f64,
}

/// The outcome of one detection request. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub primary_dialect: Dialect,
    pub primary_language: Language,
    /// Fused confidence of the primary dialect, in [0, 1].
    pub confidence: f64,
    /// Every other dialect, non-increasing by confidence.
    pub alternatives: Vec<DialectConfidence>,
    pub secondary_language: Option<Language>,
    pub code_switching_detected: bool,
    /// Segment indices at which the conversation switched language.
    pub switch_points: Vec<u32>,
    /// Language → fraction of the context window, summing to one.
    pub language_distribution: BTreeMap<Language, f64>,
    pub context_preserved: bool,
    pub needs_clarification: bool,
    pub clarification_prompt: Option<String>,
    pub model_version: ModelVersion,
    pub detected_at: DateTime<Utc>,
    /// Wall-clock time spent in detection, in milliseconds.
    pub detection_time_ms: f64,
}
