/// Bhasha engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest satisfaction score a user can submit.
pub const MIN_SATISFACTION: u8 = 1;

/// Highest satisfaction score a user can submit.
pub const MAX_SATISFACTION: u8 = 5;

/// Weight of accuracy in the blended performance score.
pub const PERFORMANCE_ACCURACY_WEIGHT: f64 = 0.5;

/// Weight of normalized satisfaction in the blended performance score.
pub const PERFORMANCE_SATISFACTION_WEIGHT: f64 = 0.3;

/// Weight of average confidence in the blended performance score.
pub const PERFORMANCE_CONFIDENCE_WEIGHT: f64 = 0.2;

/// Tolerance used when checking that fusion weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Prefix of experiment ids created by gradual rollouts.
pub const ROLLOUT_TEST_PREFIX: &str = "rollout-";
