use bhasha_core::config::SessionConfig;
use bhasha_core::models::{Dialect, DialectScores, Language};
use bhasha_session::SessionContextTracker;

fn tracker() -> SessionContextTracker {
    SessionContextTracker::new(SessionConfig::default())
}

// ── First segment: no previous dialect ────────────────────────────────────

#[test]
fn first_segment_never_switches() {
    let t = tracker();
    let scores = DialectScores::from([(Dialect::Hindi, 0.9), (Dialect::Bengali, 0.1)]);

    let update = t.update("conv", &scores, None, 0);

    assert!(!update.code_switching_detected);
    assert_eq!(update.primary_language, Language::Hindi);
    assert_eq!(update.secondary_language, None);
    assert!(update.switch_points.is_empty());
    assert!(update.context_preserved);
}

// ── Switch against an explicit previous dialect ───────────────────────────

#[test]
fn switch_detected_against_previous_dialect() {
    let t = tracker();
    t.update(
        "conv",
        &DialectScores::from([(Dialect::Hindi, 0.9), (Dialect::Bengali, 0.1)]),
        None,
        0,
    );

    let update = t.update(
        "conv",
        &DialectScores::from([(Dialect::Bengali, 0.85), (Dialect::Hindi, 0.15)]),
        Some(Dialect::Hindi),
        1,
    );

    assert!(update.code_switching_detected);
    assert_eq!(update.primary_language, Language::Bengali);
    assert_eq!(update.switch_points, vec![1]);
}

#[test]
fn regional_variant_of_same_language_is_not_a_switch() {
    let t = tracker();
    t.update("conv", &DialectScores::from([(Dialect::Hindi, 0.9)]), None, 0);
    let update = t.update(
        "conv",
        &DialectScores::from([(Dialect::HindiBhojpuri, 0.8)]),
        None,
        1,
    );
    assert!(!update.code_switching_detected);
}

// ── Secondary language over the mixing threshold ──────────────────────────

#[test]
fn secondary_language_reported_above_threshold() {
    let t = tracker();
    let scores = DialectScores::from([
        (Dialect::Hindi, 0.6),
        (Dialect::Bengali, 0.35),
        (Dialect::Telugu, 0.05),
    ]);
    let update = t.update("mix", &scores, None, 0);
    assert_eq!(update.primary_language, Language::Hindi);
    assert_eq!(update.secondary_language, Some(Language::Bengali));
}

// ── Window bound ──────────────────────────────────────────────────────────

#[test]
fn window_holds_exactly_five_after_ten_segments() {
    let t = tracker();
    for i in 0..10u32 {
        let dialect = if i % 2 == 0 { Dialect::Hindi } else { Dialect::Tamil };
        t.update("long", &DialectScores::from([(dialect, 0.8)]), None, i);
    }
    let ctx = t.get("long").unwrap();
    assert_eq!(ctx.history.len(), 5);
    assert_eq!(ctx.history.front().unwrap().segment_index, 5);
    assert_eq!(ctx.segments_seen, 10);
    assert_eq!(ctx.switch_points, (1..10).collect::<Vec<_>>());
}

#[test]
fn distribution_and_dominance_follow_window() {
    let t = tracker();
    let seq = [
        Dialect::Tamil,
        Dialect::Tamil,
        Dialect::Hindi,
        Dialect::Hindi,
        Dialect::Hindi,
        Dialect::Bengali,
    ];
    let mut last = None;
    for (i, d) in seq.iter().enumerate() {
        last = Some(t.update("d", &DialectScores::from([(*d, 0.9)]), None, i as u32));
    }
    let update = last.unwrap();
    // Window: ta, hi, hi, hi, bn
    assert_eq!(update.dominant_language, Language::Hindi);
    assert!((update.language_distribution[&Language::Hindi] - 0.6).abs() < 1e-9);
    assert!((update.language_distribution[&Language::Tamil] - 0.2).abs() < 1e-9);
    let total: f64 = update.language_distribution.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

// ── Reset / clear lifecycle ───────────────────────────────────────────────

#[test]
fn reset_keeps_entry_clear_removes_it() {
    let t = tracker();
    t.update("s", &DialectScores::from([(Dialect::Hindi, 0.9)]), None, 0);

    assert!(t.reset("s"));
    let ctx = t.get("s").expect("reset keeps the session");
    assert!(ctx.history.is_empty());

    // After a reset there is no reference language, so no switch.
    let update = t.update("s", &DialectScores::from([(Dialect::Tamil, 0.9)]), None, 1);
    assert!(!update.code_switching_detected);

    assert!(t.clear("s"));
    assert!(t.get("s").is_none());
}

#[test]
fn unknown_sessions_are_noops() {
    let t = tracker();
    assert!(!t.reset("ghost"));
    assert!(!t.clear("ghost"));
    assert!(t.get("ghost").is_none());
    assert_eq!(t.session_count(), 0);
}

#[test]
fn evict_idle_only_removes_stale_sessions() {
    let t = tracker();
    t.update("a", &DialectScores::from([(Dialect::Hindi, 0.9)]), None, 0);
    t.update("b", &DialectScores::from([(Dialect::Hindi, 0.9)]), None, 0);

    assert_eq!(t.evict_idle(chrono::Duration::hours(1)), 0);
    assert_eq!(t.evict_idle(chrono::Duration::milliseconds(-1)), 2);
    assert_eq!(t.session_count(), 0);
}

#[test]
fn empty_scores_still_update() {
    let t = tracker();
    let update = t.update("e", &DialectScores::new(), Some(Dialect::Tamil), 0);
    assert_eq!(update.primary_language, Language::Tamil);
    assert!(!update.code_switching_detected);
    assert_eq!(t.get("e").unwrap().history.len(), 1);
}

// ── Concurrency ───────────────────────────────────────────────────────────

#[test]
fn concurrent_sessions_do_not_interfere() {
    use std::sync::Arc;
    use std::thread;

    let t = Arc::new(tracker());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                let sid = format!("sess{n}");
                for i in 0..50u32 {
                    let d = if i % 2 == 0 { Dialect::Hindi } else { Dialect::Bengali };
                    t.update(&sid, &DialectScores::from([(d, 0.9)]), None, i);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    for n in 0..4 {
        let ctx = t.get(&format!("sess{n}")).unwrap();
        assert_eq!(ctx.segments_seen, 50);
        assert_eq!(ctx.switch_count, 49);
        assert_eq!(ctx.history.len(), 5);
    }
}

#[test]
fn context_serializes_for_the_api_layer() {
    let t = tracker();
    t.update("json", &DialectScores::from([(Dialect::Hindi, 0.9)]), None, 0);
    let json = serde_json::to_value(t.get("json").unwrap()).unwrap();
    assert_eq!(json["session_id"], "json");
    assert_eq!(json["history"][0]["language"], "hi");
}
