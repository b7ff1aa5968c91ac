//! EnsembleDetector: weighted fusion of the acoustic and linguistic scorers.
//!
//! fused(d) = w_a · acoustic(d) + w_l · linguistic(d), with w_a + w_l = 1.
//! A dialect missing from one scorer contributes 0 from that scorer.

use std::sync::Arc;

use bhasha_core::config::EnsembleConfig;
use bhasha_core::models::{AudioFeatures, Dialect, DialectConfidence, DialectScores, ModelArtifact};
use bhasha_core::traits::IScorer;
use tracing::debug;

use crate::scorers::{AcousticScorer, LinguisticScorer};

/// Ranked outcome of one fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleDecision {
    pub primary: Dialect,
    /// Fused score of `primary`, in [0, 1].
    pub confidence: f64,
    /// Every other dialect, non-increasing by fused score.
    pub alternatives: Vec<DialectConfidence>,
    /// The full fused map in scorer key order.
    pub fused: DialectScores,
}

/// Composes two scorers by interface and fuses their outputs.
pub struct EnsembleDetector {
    acoustic: Arc<dyn IScorer>,
    linguistic: Arc<dyn IScorer>,
    acoustic_weight: f64,
    linguistic_weight: f64,
}

impl EnsembleDetector {
    /// Create a detector over arbitrary scorers. Weights are rescaled to sum
    /// to one; a non-positive sum falls back to the default weights.
    pub fn new(
        acoustic: Arc<dyn IScorer>,
        linguistic: Arc<dyn IScorer>,
        config: &EnsembleConfig,
    ) -> Self {
        let (wa, wl) = normalize_weights(config.acoustic_weight, config.linguistic_weight);
        Self {
            acoustic,
            linguistic,
            acoustic_weight: wa,
            linguistic_weight: wl,
        }
    }

    /// Create the standard acoustic + linguistic pair over one artifact.
    pub fn from_artifact(artifact: Arc<ModelArtifact>, config: &EnsembleConfig) -> Self {
        Self::new(
            Arc::new(AcousticScorer::new(Arc::clone(&artifact))),
            Arc::new(LinguisticScorer::new(artifact)),
            config,
        )
    }

    pub fn weights(&self) -> (f64, f64) {
        (self.acoustic_weight, self.linguistic_weight)
    }

    /// Score and rank. Deterministic for identical scorer outputs.
    pub fn detect(&self, features: &AudioFeatures) -> EnsembleDecision {
        let acoustic = self.acoustic.predict(features);
        let linguistic = self.linguistic.predict(features);
        let fused = fuse(
            &acoustic,
            &linguistic,
            self.acoustic_weight,
            self.linguistic_weight,
        );

        let mut ranked: Vec<DialectConfidence> = fused
            .iter()
            .map(|(dialect, confidence)| DialectConfidence {
                dialect,
                confidence,
            })
            .collect();
        // Stable sort: ties keep scorer key order.
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let decision = if ranked.is_empty() {
            let primary = features
                .hint()
                .map(Dialect::standard)
                .unwrap_or(Dialect::Hindi);
            EnsembleDecision {
                primary,
                confidence: 0.0,
                alternatives: Vec::new(),
                fused,
            }
        } else {
            let top = ranked.remove(0);
            EnsembleDecision {
                primary: top.dialect,
                confidence: top.confidence,
                alternatives: ranked,
                fused,
            }
        };

        debug!(
            acoustic = self.acoustic.name(),
            linguistic = self.linguistic.name(),
            primary = %decision.primary,
            confidence = decision.confidence,
            alternatives = decision.alternatives.len(),
            "ensemble decision"
        );
        decision
    }
}

/// Weighted per-dialect fusion. Keys appear in acoustic order, then any
/// linguistic-only keys in linguistic order.
pub fn fuse(
    acoustic: &DialectScores,
    linguistic: &DialectScores,
    acoustic_weight: f64,
    linguistic_weight: f64,
) -> DialectScores {
    let keys = acoustic
        .dialects()
        .chain(linguistic.dialects().filter(|d| !acoustic.contains(*d)));

    keys.map(|d| {
        let a = acoustic.get(d).unwrap_or(0.0);
        let l = linguistic.get(d).unwrap_or(0.0);
        (d, acoustic_weight * a + linguistic_weight * l)
    })
    .collect()
}

fn normalize_weights(acoustic: f64, linguistic: f64) -> (f64, f64) {
    let a = if acoustic.is_finite() { acoustic.max(0.0) } else { 0.0 };
    let l = if linguistic.is_finite() { linguistic.max(0.0) } else { 0.0 };
    let sum = a + l;
    if sum <= 0.0 {
        let defaults = EnsembleConfig::default();
        return (defaults.acoustic_weight, defaults.linguistic_weight);
    }
    (a / sum, l / sum)
}
