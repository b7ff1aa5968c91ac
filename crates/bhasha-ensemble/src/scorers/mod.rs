//! Artifact-backed scorers.

mod acoustic;
mod linguistic;
pub mod quality;

pub use acoustic::AcousticScorer;
pub use linguistic::LinguisticScorer;
