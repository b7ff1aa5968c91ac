use bhasha_experiment::bucket;
use proptest::prelude::*;

proptest! {
    #[test]
    fn bucket_is_in_unit_interval(session in ".{0,40}", test in "[a-z0-9-]{1,20}") {
        let b = bucket(&session, &test);
        prop_assert!((0.0..1.0).contains(&b));
    }

    #[test]
    fn bucket_is_idempotent(session in "[a-zA-Z0-9_-]{1,32}", test in "[a-z0-9-]{1,20}") {
        prop_assert_eq!(bucket(&session, &test), bucket(&session, &test));
    }
}
