use std::sync::Arc;

use bhasha_core::errors::{BhashaError, ExperimentError};
use bhasha_core::models::{Dialect, FeedbackEntry, ModelVersion};
use bhasha_experiment::{Arm, ExperimentManager};
use bhasha_feedback::FeedbackStore;

fn setup() -> (Arc<FeedbackStore>, ExperimentManager) {
    let store = Arc::new(FeedbackStore::default());
    let manager = ExperimentManager::new(Arc::clone(&store));
    (store, manager)
}

fn v(s: &str) -> ModelVersion {
    ModelVersion::from(s)
}

fn experiment_error(err: BhashaError) -> ExperimentError {
    match err {
        BhashaError::ExperimentError(e) => e,
        other => panic!("expected experiment error, got {other:?}"),
    }
}

// ── Start validation ──────────────────────────────────────────────────────

#[test]
fn start_rejects_bad_split_and_identical_arms() {
    let (_, mgr) = setup();
    for split in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
        let err = experiment_error(mgr.start("t", v("v1"), v("v2"), split, 5).unwrap_err());
        assert!(matches!(err, ExperimentError::InvalidSplit { .. }));
    }
    let err = experiment_error(mgr.start("t", v("v1"), v("v1"), 0.5, 5).unwrap_err());
    assert_eq!(err, ExperimentError::IdenticalArms { version: "v1".into() });
    assert!(mgr.active_tests().is_empty());
}

#[test]
fn duplicate_active_test_is_rejected_but_stopped_one_can_restart() {
    let (_, mgr) = setup();
    mgr.start("t", v("v1"), v("v2"), 0.5, 5).unwrap();
    let err = experiment_error(mgr.start("t", v("v1"), v("v3"), 0.5, 5).unwrap_err());
    assert_eq!(err, ExperimentError::DuplicateTest { test_id: "t".into() });

    mgr.stop("t").unwrap();
    mgr.start("t", v("v1"), v("v3"), 0.5, 5).unwrap();
    assert_eq!(mgr.definition("t").unwrap().version_b, v("v3"));
}

// ── Stop ──────────────────────────────────────────────────────────────────

#[test]
fn stop_is_idempotent_and_unknown_fails() {
    let (_, mgr) = setup();
    mgr.start("t", v("v1"), v("v2"), 0.5, 5).unwrap();
    mgr.stop("t").unwrap();
    mgr.stop("t").unwrap();
    assert!(mgr.active_tests().is_empty());
    assert!(mgr.definition("t").unwrap().stopped_at.is_some());

    let err = experiment_error(mgr.stop("nope").unwrap_err());
    assert_eq!(err, ExperimentError::UnknownTest { test_id: "nope".into() });
}

// ── Assignment ────────────────────────────────────────────────────────────

#[test]
fn assignment_is_stable_and_matches_arm() {
    let (_, mgr) = setup();
    mgr.start("t", v("control"), v("candidate"), 0.5, 5).unwrap();
    for i in 0..50 {
        let sid = format!("session-{i}");
        let first = mgr.assign_version(&sid, "t").unwrap();
        assert_eq!(mgr.assign_version(&sid, "t").unwrap(), first);
        let expected = match mgr.assign_arm(&sid, "t").unwrap() {
            Arm::Control => v("control"),
            Arm::Candidate => v("candidate"),
        };
        assert_eq!(first, expected);
    }
    assert!(mgr.assign_version("s", "unknown").is_none());
}

#[test]
fn split_law_holds_over_a_thousand_sessions() {
    let (_, mgr) = setup();
    mgr.start("split-law", v("a"), v("b"), 0.3, 5).unwrap();
    let candidates = (0..1000)
        .filter(|i| mgr.assign_arm(&format!("user-{i}"), "split-law") == Some(Arm::Candidate))
        .count();
    let fraction = candidates as f64 / 1000.0;
    assert!(fraction > 0.25 && fraction < 0.35, "fraction = {fraction}");
}

#[test]
fn serving_test_is_most_recently_started() {
    let (_, mgr) = setup();
    mgr.start("first", v("v1"), v("v2"), 0.5, 5).unwrap();
    mgr.start("second", v("v1"), v("v3"), 0.5, 5).unwrap();
    assert_eq!(mgr.active_tests(), vec!["first".to_string(), "second".to_string()]);
    assert_eq!(mgr.serving_test().unwrap().test_id, "second");

    mgr.stop("second").unwrap();
    assert_eq!(mgr.serving_test().unwrap().test_id, "first");
    mgr.stop("first").unwrap();
    assert!(mgr.serving_test().is_none());
}

// ── Results ───────────────────────────────────────────────────────────────

#[test]
fn results_with_too_few_samples_are_partial() {
    let (store, mgr) = setup();
    mgr.start("t", v("v1"), v("v2"), 0.5, 5).unwrap();
    for _ in 0..3 {
        store.record(FeedbackEntry::new("s", Dialect::Hindi, 0.8, None, Some(4), v("v1")));
    }
    let results = mgr.results("t").unwrap();
    assert_eq!(results.samples_a, 3);
    assert_eq!(results.samples_b, 0);
    assert!(!results.significant);
    assert_eq!(results.leader(), None);
    assert!(mgr.results("missing").is_none());
}

#[test]
fn balanced_feedback_makes_results_significant() {
    let (store, mgr) = setup();
    mgr.start("ab", v("v1"), v("v2"), 0.5, 5).unwrap();

    // Collect five sessions per arm, then give each one piece of feedback.
    let mut per_arm = [0usize; 2];
    let mut i = 0;
    while per_arm[0] < 5 || per_arm[1] < 5 {
        let sid = format!("sess-{i}");
        i += 1;
        let arm = mgr.assign_arm(&sid, "ab").unwrap();
        let slot = match arm {
            Arm::Control => 0,
            Arm::Candidate => 1,
        };
        if per_arm[slot] == 5 {
            continue;
        }
        per_arm[slot] += 1;
        let version = mgr.assign_version(&sid, "ab").unwrap();
        let correct = if arm == Arm::Control { Some(Dialect::Tamil) } else { None };
        store.record(FeedbackEntry::new(&sid, Dialect::Hindi, 0.8, correct, Some(4), version));
    }

    let results = mgr.results("ab").unwrap();
    assert!(results.samples_a + results.samples_b >= 10);
    assert_eq!(results.samples_a, 5);
    assert_eq!(results.samples_b, 5);
    assert!(results.significant);
    assert_eq!(results.leader(), Some(Arm::Candidate));

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json["significant"], true);
}
