use std::sync::Arc;

use bhasha_core::models::{AudioFeatures, DialectScores, ModelArtifact};
use bhasha_core::traits::IScorer;

/// Scores dialects from the artifact's linguistic priors, shifted toward the
/// caller's language hint.
///
/// With hint language L, w = artifact hint weight and k dialects of L in the
/// priors: score(d) = (1 − w) · prior(d) + w · [lang(d) = L] / k.
/// An unknown hint, or one no prior dialect matches, leaves the priors as is.
#[derive(Debug, Clone)]
pub struct LinguisticScorer {
    artifact: Arc<ModelArtifact>,
}

impl LinguisticScorer {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }
}

impl IScorer for LinguisticScorer {
    fn name(&self) -> &str {
        "linguistic"
    }

    fn predict(&self, features: &AudioFeatures) -> DialectScores {
        let priors = self.artifact.linguistic_priors().normalized();
        let Some(hint) = features.hint() else {
            return priors;
        };

        let matching = priors.dialects().filter(|d| d.language() == hint).count();
        if matching == 0 {
            return priors;
        }

        let w = self.artifact.hint_weight();
        let share = w / matching as f64;
        priors
            .iter()
            .map(|(d, p)| {
                let boost = if d.language() == hint { share } else { 0.0 };
                (d, (1.0 - w) * p + boost)
            })
            .collect()
    }
}
