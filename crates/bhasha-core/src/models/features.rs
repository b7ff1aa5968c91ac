//! AudioFeatures: the feature bundle supplied by the extraction stage.

use serde::{Deserialize, Serialize};

use super::Language;

const DEFAULT_SAMPLE_RATE: u32 = 16_000;
const DEFAULT_CHANNELS: u16 = 1;
const DEFAULT_BIT_DEPTH: u16 = 16;

/// Acoustic feature summary for one audio segment.
///
/// Every field is optional on the wire; missing or malformed values are
/// replaced by [`AudioFeatures::sanitized`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    /// Samples per second.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Bits per sample.
    pub bit_depth: u16,
    /// Segment duration in seconds.
    pub duration_secs: f64,
    /// Free-form language hint from the caller ("hi", "Bengali", ...).
    pub language_hint: Option<String>,
}

impl Default for AudioFeatures {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bit_depth: DEFAULT_BIT_DEPTH,
            duration_secs: 0.0,
            language_hint: None,
        }
    }
}

impl AudioFeatures {
    /// Copy with each unusable field replaced by its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            sample_rate: if self.sample_rate == 0 {
                defaults.sample_rate
            } else {
                self.sample_rate
            },
            channels: if self.channels == 0 {
                defaults.channels
            } else {
                self.channels
            },
            bit_depth: if self.bit_depth == 0 {
                defaults.bit_depth
            } else {
                self.bit_depth
            },
            duration_secs: if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
                self.duration_secs
            } else {
                defaults.duration_secs
            },
            language_hint: self.language_hint.clone(),
        }
    }

    /// The language hint, if present and recognised.
    pub fn hint(&self) -> Option<Language> {
        self.language_hint.as_deref().and_then(|h| h.parse().ok())
    }
}
