use std::sync::Arc;

use bhasha_core::models::{ModelArtifact, ModelVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a registered version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Loaded,
    Active,
    Retired,
}

/// One registered model version. Retirement keeps the artifact.
#[derive(Debug, Clone)]
pub struct ModelVersionRecord {
    pub version: ModelVersion,
    pub artifact: Arc<ModelArtifact>,
    pub status: VersionStatus,
    pub loaded_at: DateTime<Utc>,
    /// Most recent promotion to active.
    pub activated_at: Option<DateTime<Utc>>,
    pub artifact_hash: String,
}

impl ModelVersionRecord {
    pub(crate) fn new(version: ModelVersion, artifact: Arc<ModelArtifact>) -> Self {
        let artifact_hash = artifact.content_hash().to_string();
        Self {
            version,
            artifact,
            status: VersionStatus::Loaded,
            loaded_at: Utc::now(),
            activated_at: None,
            artifact_hash,
        }
    }

    /// Loaded or active.
    pub fn is_available(&self) -> bool {
        self.status != VersionStatus::Retired
    }
}

/// What `load` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// New version registered.
    Loaded,
    /// Version was already loaded or active; nothing changed.
    AlreadyLoaded,
    /// A retired version was brought back to loaded.
    Restored,
}

/// The published active version and its artifact, read as one unit.
#[derive(Debug, Clone)]
pub struct ActiveModel {
    pub version: ModelVersion,
    pub artifact: Arc<ModelArtifact>,
}
