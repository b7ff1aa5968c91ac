use bhasha_core::config::BhashaConfig;
use bhasha_core::models::{AudioFeatures, Dialect, DialectScores, ModelArtifact};
use bhasha_engine::DetectionOrchestrator;
use proptest::prelude::*;

fn artifact_strategy() -> impl Strategy<Value = ModelArtifact> {
    (
        proptest::collection::vec(0.01f64..1.0, Dialect::ALL.len()),
        proptest::collection::vec(0.01f64..1.0, Dialect::ALL.len()),
        0.0f64..=1.0,
    )
        .prop_map(|(acoustic, linguistic, hint)| {
            let a: DialectScores = Dialect::ALL.iter().copied().zip(acoustic).collect();
            let l: DialectScores = Dialect::ALL.iter().copied().zip(linguistic).collect();
            ModelArtifact::new(a, l, hint).unwrap()
        })
}

fn features_strategy() -> impl Strategy<Value = AudioFeatures> {
    (
        0u32..96_000,
        0u16..8,
        0u16..32,
        prop_oneof![Just(f64::NAN), Just(-1.0), 0.0f64..30.0],
        proptest::option::of(prop_oneof![
            Just("hi".to_string()),
            Just("ta".to_string()),
            Just("en".to_string()),
            Just("xx".to_string()),
        ]),
    )
        .prop_map(|(sample_rate, channels, bit_depth, duration_secs, language_hint)| AudioFeatures {
            sample_rate,
            channels,
            bit_depth,
            duration_secs,
            language_hint,
        })
}

proptest! {
    #[test]
    fn results_are_bounded_and_ordered(
        artifact in artifact_strategy(),
        features in features_strategy(),
    ) {
        let orch = DetectionOrchestrator::new(BhashaConfig::default(), "v1", artifact).unwrap();
        let result = orch.detect(&features, Some("prop"), Some(0));

        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!(result
            .alternatives
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
        prop_assert!(result
            .alternatives
            .first()
            .map_or(true, |a| a.confidence <= result.confidence));
        prop_assert_eq!(result.needs_clarification, result.clarification_prompt.is_some());
        let total: f64 = result.language_distribution.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(result.context_preserved);
    }
}
