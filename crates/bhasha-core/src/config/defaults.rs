// Single source of truth for all default values.

// --- Ensemble ---
pub const DEFAULT_ACOUSTIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_LINGUISTIC_WEIGHT: f64 = 0.4;

// --- Session ---
pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_MIXING_THRESHOLD: f64 = 0.3;
pub const DEFAULT_MAX_SWITCH_POINTS: usize = 256;

// --- Feedback ---
pub const DEFAULT_BUFFER_CAPACITY: usize = 5;
pub const DEFAULT_LOW_SATISFACTION: f64 = 2.5;
pub const DEFAULT_SATISFACTION_SMOOTHING: f64 = 0.2;
pub const DEFAULT_ADAPTATION_MIN_SAMPLES: u64 = 5;
pub const DEFAULT_THRESHOLD_STEP: f64 = 0.05;
pub const DEFAULT_MAX_THRESHOLD: f64 = 0.9;

// --- Clarification ---
pub const DEFAULT_CLARIFICATION_THRESHOLD: f64 = 0.7;

// --- Experiment ---
pub const DEFAULT_ROLLOUT_SPLIT: f64 = 0.1;
pub const DEFAULT_ROLLOUT_MIN_SAMPLES: u64 = 30;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
