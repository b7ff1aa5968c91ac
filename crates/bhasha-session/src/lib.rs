//! # bhasha-session
//!
//! Tracks language mixing across the segments of one conversation:
//! a bounded window of recent segments, switch detection, dominant
//! language, and language distribution.

pub mod context;
pub mod mixing;
pub mod tracker;

pub use context::{SegmentSnapshot, SessionContext};
pub use mixing::{dominant_language, language_distribution, secondary_language};
pub use tracker::{ContextUpdate, SessionContextTracker};
