use std::sync::Arc;

use bhasha_core::models::{AudioFeatures, DialectScores, ModelArtifact};
use bhasha_core::traits::IScorer;

use super::quality::signal_quality;

/// Scores dialects from the artifact's acoustic priors, tempered by signal quality.
///
/// score(d) = q · prior(d) + (1 − q) · 1/n, with priors normalised and
/// q = [`signal_quality`]. At q = 0 every dialect scores uniformly.
#[derive(Debug, Clone)]
pub struct AcousticScorer {
    artifact: Arc<ModelArtifact>,
}

impl AcousticScorer {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }
}

impl IScorer for AcousticScorer {
    fn name(&self) -> &str {
        "acoustic"
    }

    fn predict(&self, features: &AudioFeatures) -> DialectScores {
        let features = features.sanitized();
        let quality = signal_quality(&features);
        let priors = self.artifact.acoustic_priors().normalized();
        let uniform = 1.0 / priors.len().max(1) as f64;

        priors
            .iter()
            .map(|(d, p)| (d, quality * p + (1.0 - quality) * uniform))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhasha_core::models::Dialect;

    fn artifact() -> Arc<ModelArtifact> {
        Arc::new(
            ModelArtifact::new(
                DialectScores::from([(Dialect::Hindi, 0.8), (Dialect::Bengali, 0.2)]),
                DialectScores::from([(Dialect::Hindi, 0.5), (Dialect::Bengali, 0.5)]),
                0.5,
            )
            .unwrap(),
        )
    }

    #[test]
    fn clean_audio_follows_priors() {
        let scorer = AcousticScorer::new(artifact());
        let scores = scorer.predict(&AudioFeatures {
            duration_secs: 2.0,
            ..Default::default()
        });
        assert!((scores.get(Dialect::Hindi).unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn degraded_audio_flattens_scores() {
        let scorer = AcousticScorer::new(artifact());
        let clean = scorer.predict(&AudioFeatures {
            duration_secs: 2.0,
            ..Default::default()
        });
        let noisy = scorer.predict(&AudioFeatures {
            sample_rate: 8_000,
            bit_depth: 8,
            duration_secs: 0.2,
            ..Default::default()
        });
        let spread = |s: &DialectScores| {
            s.get(Dialect::Hindi).unwrap() - s.get(Dialect::Bengali).unwrap()
        };
        assert!(spread(&noisy) < spread(&clean));
        assert!(spread(&noisy) > 0.0);
    }

    #[test]
    fn preserves_prior_key_order() {
        let scorer = AcousticScorer::new(artifact());
        let order: Vec<_> = scorer.predict(&AudioFeatures::default()).dialects().collect();
        assert_eq!(order, vec![Dialect::Hindi, Dialect::Bengali]);
    }
}
