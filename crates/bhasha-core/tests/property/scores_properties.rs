use bhasha_core::models::{Dialect, DialectScores};
use proptest::prelude::*;

fn arb_dialect() -> impl Strategy<Value = Dialect> {
    (0..Dialect::ALL.len()).prop_map(|i| Dialect::ALL[i])
}

fn arb_entries() -> impl Strategy<Value = Vec<(Dialect, f64)>> {
    prop::collection::vec((arb_dialect(), -2.0f64..3.0), 0..30)
}

proptest! {
    #[test]
    fn values_always_in_unit_interval(entries in arb_entries()) {
        let scores: DialectScores = entries.into_iter().collect();
        for (_, s) in scores.iter() {
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn keys_are_unique(entries in arb_entries()) {
        let scores: DialectScores = entries.into_iter().collect();
        let mut seen: Vec<Dialect> = scores.dialects().collect();
        let before = seen.len();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), before);
    }

    #[test]
    fn top_is_maximal(entries in arb_entries()) {
        let scores: DialectScores = entries.into_iter().collect();
        if let Some((_, best)) = scores.top() {
            for (_, s) in scores.iter() {
                prop_assert!(s <= best);
            }
        } else {
            prop_assert!(scores.is_empty());
        }
    }

    #[test]
    fn normalized_sums_to_one_when_mass_present(entries in arb_entries()) {
        let scores: DialectScores = entries.into_iter().collect();
        if scores.total() > 0.0 {
            prop_assert!((scores.normalized().total() - 1.0).abs() < 1e-9);
        }
    }
}
