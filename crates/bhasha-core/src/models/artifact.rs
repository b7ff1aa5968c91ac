//! ModelArtifact: the opaque, loadable payload behind a model version.
//!
//! The engine never trains; an artifact is a pair of prior tables the
//! scorers query, validated once at construction and immutable after.

use serde::{Deserialize, Serialize};

use super::{Dialect, DialectScores};
use crate::errors::{ArtifactError, BhashaResult};

/// Wire form of an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArtifactBody {
    acoustic_priors: DialectScores,
    linguistic_priors: DialectScores,
    #[serde(default = "default_hint_weight")]
    hint_weight: f64,
}

fn default_hint_weight() -> f64 {
    0.5
}

/// A validated scoring artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    acoustic_priors: DialectScores,
    linguistic_priors: DialectScores,
    hint_weight: f64,
    content_hash: String,
}

impl ModelArtifact {
    /// Validate and seal an artifact.
    pub fn new(
        acoustic_priors: DialectScores,
        linguistic_priors: DialectScores,
        hint_weight: f64,
    ) -> BhashaResult<Self> {
        validate_table("acoustic", &acoustic_priors)?;
        validate_table("linguistic", &linguistic_priors)?;
        if !hint_weight.is_finite() || !(0.0..=1.0).contains(&hint_weight) {
            return Err(ArtifactError::InvalidHintWeight { value: hint_weight }.into());
        }

        let body = ArtifactBody {
            acoustic_priors,
            linguistic_priors,
            hint_weight,
        };
        let canonical = serde_json::to_vec(&body)?;
        let content_hash = blake3::hash(&canonical).to_hex().to_string();

        Ok(Self {
            acoustic_priors: body.acoustic_priors,
            linguistic_priors: body.linguistic_priors,
            hint_weight: body.hint_weight,
            content_hash,
        })
    }

    /// Parse and validate a JSON artifact payload.
    pub fn from_json(bytes: &[u8]) -> BhashaResult<Self> {
        let body: ArtifactBody =
            serde_json::from_slice(bytes).map_err(|e| ArtifactError::ParseFailed {
                reason: e.to_string(),
            })?;
        Self::new(body.acoustic_priors, body.linguistic_priors, body.hint_weight)
    }

    /// Serialize back to the JSON wire form.
    pub fn to_json(&self) -> BhashaResult<Vec<u8>> {
        let body = ArtifactBody {
            acoustic_priors: self.acoustic_priors.clone(),
            linguistic_priors: self.linguistic_priors.clone(),
            hint_weight: self.hint_weight,
        };
        Ok(serde_json::to_vec(&body)?)
    }

    /// Equal priors over every supported dialect.
    pub fn uniform() -> Self {
        let share = 1.0 / Dialect::ALL.len() as f64;
        let priors: DialectScores = Dialect::ALL.iter().map(|d| (*d, share)).collect();
        let canonical = format!("uniform:{}", Dialect::ALL.len());
        Self {
            acoustic_priors: priors.clone(),
            linguistic_priors: priors,
            hint_weight: default_hint_weight(),
            content_hash: blake3::hash(canonical.as_bytes()).to_hex().to_string(),
        }
    }

    pub fn acoustic_priors(&self) -> &DialectScores {
        &self.acoustic_priors
    }

    pub fn linguistic_priors(&self) -> &DialectScores {
        &self.linguistic_priors
    }

    pub fn hint_weight(&self) -> f64 {
        self.hint_weight
    }

    /// blake3 hex digest of the canonical payload.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

fn validate_table(table: &'static str, scores: &DialectScores) -> Result<(), ArtifactError> {
    if scores.is_empty() {
        return Err(ArtifactError::Empty { table });
    }
    if scores.total() <= 0.0 {
        return Err(ArtifactError::ZeroMass { table });
    }
    Ok(())
}
