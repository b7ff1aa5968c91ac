//! Signal-quality factor in [0, 1] derived from the feature bundle.
//!
//! Low-quality audio pulls acoustic scores toward uniform: the scorer
//! should not be confident about a narrow-band or clipped segment.

use bhasha_core::models::AudioFeatures;

/// Sample rate at or above which the band is considered full.
const FULL_BAND_HZ: f64 = 16_000.0;
/// Bit depth at or above which quantisation is considered lossless.
const FULL_BIT_DEPTH: f64 = 16.0;
/// Duration at or above which a segment carries enough evidence.
const MIN_EVIDENCE_SECS: f64 = 1.0;
/// Penalty for downmixed multi-channel audio.
const MULTI_CHANNEL_FACTOR: f64 = 0.9;
/// Factor used when the duration is unknown.
const UNKNOWN_DURATION_FACTOR: f64 = 0.5;

/// Combined quality factor. Expects sanitized features.
pub fn signal_quality(features: &AudioFeatures) -> f64 {
    let rate = (features.sample_rate as f64 / FULL_BAND_HZ).min(1.0);
    let depth = (features.bit_depth as f64 / FULL_BIT_DEPTH).min(1.0);
    let channels = if features.channels <= 1 {
        1.0
    } else {
        MULTI_CHANNEL_FACTOR
    };
    let duration = if features.duration_secs <= 0.0 {
        UNKNOWN_DURATION_FACTOR
    } else {
        (features.duration_secs / MIN_EVIDENCE_SECS).min(1.0)
    };
    (rate * depth * channels * duration).clamp(0.0, 1.0)
}
