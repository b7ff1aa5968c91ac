use bhasha_core::config::SessionConfig;
use bhasha_core::models::{Dialect, DialectScores};
use bhasha_session::SessionContextTracker;
use proptest::prelude::*;

fn dialect() -> impl Strategy<Value = Dialect> {
    proptest::sample::select(Dialect::ALL.to_vec())
}

proptest! {
    #[test]
    fn window_never_exceeds_capacity(
        window in 1usize..8,
        seq in proptest::collection::vec(dialect(), 1..40),
    ) {
        let tracker = SessionContextTracker::new(SessionConfig {
            window_size: window,
            ..SessionConfig::default()
        });
        for (i, d) in seq.iter().enumerate() {
            let update = tracker.update("p", &DialectScores::from([(*d, 0.9)]), None, i as u32);
            prop_assert!(update.window_len <= window);
            let total: f64 = update.language_distribution.values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
            prop_assert!(update.language_distribution.contains_key(&update.dominant_language));
        }
        let ctx = tracker.get("p").unwrap();
        prop_assert_eq!(ctx.history.len(), seq.len().min(window));
        prop_assert_eq!(ctx.segments_seen, seq.len() as u64);
    }

    #[test]
    fn switch_count_matches_language_changes(seq in proptest::collection::vec(dialect(), 1..40)) {
        let tracker = SessionContextTracker::default();
        for (i, d) in seq.iter().enumerate() {
            tracker.update("p", &DialectScores::from([(*d, 0.9)]), None, i as u32);
        }
        let changes = seq.windows(2).filter(|w| w[0].language() != w[1].language()).count();
        prop_assert_eq!(tracker.get("p").unwrap().switch_count, changes as u64);
    }
}
