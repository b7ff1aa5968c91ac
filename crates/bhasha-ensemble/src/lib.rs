//! # bhasha-ensemble
//!
//! Two independent scorers (acoustic, linguistic) backed by a model artifact,
//! fused by fixed weights into one ranked dialect decision.

pub mod detector;
pub mod scorers;

pub use detector::{fuse, EnsembleDecision, EnsembleDetector};
pub use scorers::{AcousticScorer, LinguisticScorer};
