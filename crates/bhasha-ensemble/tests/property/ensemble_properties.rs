use std::sync::Arc;

use bhasha_core::config::EnsembleConfig;
use bhasha_core::models::{AudioFeatures, Dialect, DialectScores};
use bhasha_core::traits::IScorer;
use bhasha_ensemble::EnsembleDetector;
use proptest::prelude::*;

struct Fixed(DialectScores);

impl IScorer for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, _features: &AudioFeatures) -> DialectScores {
        self.0.clone()
    }
}

fn arb_scores() -> impl Strategy<Value = DialectScores> {
    prop::collection::vec((0..Dialect::ALL.len(), -0.5f64..1.5), 0..20)
        .prop_map(|v| v.into_iter().map(|(i, s)| (Dialect::ALL[i], s)).collect())
}

proptest! {
    #[test]
    fn confidence_in_unit_interval_and_alternatives_sorted(
        acoustic in arb_scores(),
        linguistic in arb_scores(),
        wa in 0.0f64..1.0,
    ) {
        let det = EnsembleDetector::new(
            Arc::new(Fixed(acoustic)),
            Arc::new(Fixed(linguistic)),
            &EnsembleConfig { acoustic_weight: wa, linguistic_weight: 1.0 - wa },
        );
        let decision = det.detect(&AudioFeatures::default());

        prop_assert!((0.0..=1.0).contains(&decision.confidence));
        for pair in decision.alternatives.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
        if let Some(first) = decision.alternatives.first() {
            prop_assert!(decision.confidence >= first.confidence);
        }
        prop_assert!(decision.alternatives.iter().all(|a| a.dialect != decision.primary));
    }

    #[test]
    fn identical_inputs_identical_decisions(
        acoustic in arb_scores(),
        linguistic in arb_scores(),
    ) {
        let det = EnsembleDetector::new(
            Arc::new(Fixed(acoustic)),
            Arc::new(Fixed(linguistic)),
            &EnsembleConfig::default(),
        );
        let features = AudioFeatures::default();
        prop_assert_eq!(det.detect(&features), det.detect(&features));
    }
}
