//! ModelVersionRegistry: version records plus the atomically published
//! active pointer.
//!
//! Readers of the active pointer never lock; it is only stored while the
//! `records` write lock is held.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use arc_swap::ArcSwap;

use bhasha_core::errors::{BhashaError, BhashaResult, RegistryError};
use bhasha_core::models::{ModelArtifact, ModelVersion};
use chrono::Utc;
use tracing::{info, warn};

use crate::record::{ActiveModel, LoadOutcome, ModelVersionRecord, VersionStatus};

/// Holds the in-flight flag for one switch, rollback, or retirement.
/// Dropping it releases the flag.
#[must_use = "the update flag is released as soon as the guard is dropped"]
pub struct UpdateGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct ModelVersionRegistry {
    records: RwLock<BTreeMap<ModelVersion, ModelVersionRecord>>,
    active: ArcSwap<ActiveModel>,
    /// Guard: only one switch/rollback/retire can run at a time.
    updating: AtomicBool,
}

impl ModelVersionRegistry {
    /// Registry whose first version is active from the start.
    pub fn new(initial_version: impl Into<ModelVersion>, artifact: ModelArtifact) -> Self {
        let version = initial_version.into();
        let artifact = Arc::new(artifact);
        let mut record = ModelVersionRecord::new(version.clone(), Arc::clone(&artifact));
        record.status = VersionStatus::Active;
        record.activated_at = Some(record.loaded_at);

        info!(version = %version, hash = %record.artifact_hash, "registry initialised");

        let mut records = BTreeMap::new();
        records.insert(version.clone(), record);
        Self {
            records: RwLock::new(records),
            active: ArcSwap::from_pointee(ActiveModel { version, artifact }),
            updating: AtomicBool::new(false),
        }
    }

    /// Claim the in-flight flag, or None if another update holds it.
    pub fn begin_update(&self) -> Option<UpdateGuard<'_>> {
        self.updating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| UpdateGuard {
                flag: &self.updating,
            })
    }

    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }

    /// Register an artifact under `version`. Idempotent for a version that is
    /// already loaded or active; a retired version is restored with the new
    /// artifact.
    pub fn load(
        &self,
        version: impl Into<ModelVersion>,
        artifact: ModelArtifact,
    ) -> BhashaResult<LoadOutcome> {
        let version = version.into();
        let mut records = self.write_records()?;

        if let Some(existing) = records.get_mut(&version) {
            if existing.is_available() {
                if existing.artifact_hash != artifact.content_hash() {
                    warn!(
                        version = %version,
                        "load ignored: version already registered with a different artifact"
                    );
                }
                return Ok(LoadOutcome::AlreadyLoaded);
            }
            let restored = ModelVersionRecord::new(version.clone(), Arc::new(artifact));
            info!(version = %version, hash = %restored.artifact_hash, "retired model version restored");
            *existing = restored;
            return Ok(LoadOutcome::Restored);
        }

        let record = ModelVersionRecord::new(version.clone(), Arc::new(artifact));
        info!(version = %version, hash = %record.artifact_hash, "model version loaded");
        records.insert(version, record);
        Ok(LoadOutcome::Loaded)
    }

    /// Promote a loaded version to active and demote the previous one to
    /// loaded. Switching to the current active version is a no-op.
    pub fn switch_active(&self, version: &ModelVersion) -> BhashaResult<()> {
        let _guard = self.acquire(version, "switch")?;
        let mut records = self.write_records()?;

        match records.get(version).map(|r| r.status) {
            None => return Err(unknown(version)),
            Some(VersionStatus::Retired) => {
                return Err(RegistryError::VersionRetired {
                    version: version.to_string(),
                }
                .into())
            }
            Some(VersionStatus::Active) => return Ok(()),
            Some(VersionStatus::Loaded) => {}
        }

        let previous = self.publish(&mut records, version, VersionStatus::Loaded)?;
        info!(from = %previous, to = %version, "active model version switched");
        Ok(())
    }

    /// Return to an earlier version. The version being rolled back from is
    /// retired; a retired target is revived from its retained artifact.
    pub fn rollback(&self, version: &ModelVersion) -> BhashaResult<()> {
        let _guard = self.acquire(version, "rollback")?;
        let mut records = self.write_records()?;

        match records.get(version).map(|r| r.status) {
            None => return Err(unknown(version)),
            Some(VersionStatus::Active) => return Ok(()),
            Some(VersionStatus::Loaded | VersionStatus::Retired) => {}
        }

        let previous = self.publish(&mut records, version, VersionStatus::Retired)?;
        info!(from = %previous, to = %version, "model version rolled back");
        Ok(())
    }

    /// Mark a loaded version retired. Idempotent; the active version cannot
    /// be retired.
    pub fn retire(&self, version: &ModelVersion) -> BhashaResult<()> {
        let _guard = self.acquire(version, "retire")?;
        let mut records = self.write_records()?;
        let record = records.get_mut(version).ok_or_else(|| unknown(version))?;
        match record.status {
            VersionStatus::Active => Err(RegistryError::ActiveVersionRetire {
                version: version.to_string(),
            }
            .into()),
            VersionStatus::Retired => Ok(()),
            VersionStatus::Loaded => {
                record.status = VersionStatus::Retired;
                info!(version = %version, "model version retired");
                Ok(())
            }
        }
    }

    /// The active version and its artifact as one consistent snapshot.
    pub fn active(&self) -> Arc<ActiveModel> {
        self.active.load_full()
    }

    pub fn active_version(&self) -> ModelVersion {
        self.active().version.clone()
    }

    pub fn active_artifact(&self) -> Arc<ModelArtifact> {
        Arc::clone(&self.active().artifact)
    }

    /// Artifact of a loaded or active version.
    pub fn artifact(&self, version: &ModelVersion) -> Option<Arc<ModelArtifact>> {
        self.read_records()
            .get(version)
            .filter(|r| r.is_available())
            .map(|r| Arc::clone(&r.artifact))
    }

    pub fn is_loaded(&self, version: &ModelVersion) -> bool {
        self.read_records()
            .get(version)
            .is_some_and(ModelVersionRecord::is_available)
    }

    /// Loaded and active versions, sorted. Retired versions are excluded.
    pub fn loaded_versions(&self) -> Vec<ModelVersion> {
        self.read_records()
            .values()
            .filter(|r| r.is_available())
            .map(|r| r.version.clone())
            .collect()
    }

    pub fn record(&self, version: &ModelVersion) -> Option<ModelVersionRecord> {
        self.read_records().get(version).cloned()
    }

    /// Every record, retired included, sorted by version.
    pub fn records(&self) -> Vec<ModelVersionRecord> {
        self.read_records().values().cloned().collect()
    }

    fn acquire(&self, version: &ModelVersion, operation: &'static str) -> BhashaResult<UpdateGuard<'_>> {
        self.begin_update().ok_or_else(|| {
            warn!(version = %version, operation, "rejected: another update is in flight");
            RegistryError::UpdateInProgress.into()
        })
    }

    /// Promote `target`, set the old active record to `demote_to`, and swap
    /// the active pointer. Returns the previous active version.
    fn publish(
        &self,
        records: &mut BTreeMap<ModelVersion, ModelVersionRecord>,
        target: &ModelVersion,
        demote_to: VersionStatus,
    ) -> BhashaResult<ModelVersion> {
        let previous = self.active.load().version.clone();

        let record = records.get_mut(target).ok_or_else(|| unknown(target))?;
        record.status = VersionStatus::Active;
        record.activated_at = Some(Utc::now());
        let next = Arc::new(ActiveModel {
            version: target.clone(),
            artifact: Arc::clone(&record.artifact),
        });

        if let Some(old) = records.get_mut(&previous) {
            old.status = demote_to;
        }
        self.active.store(next);
        Ok(previous)
    }

    fn write_records(
        &self,
    ) -> BhashaResult<std::sync::RwLockWriteGuard<'_, BTreeMap<ModelVersion, ModelVersionRecord>>> {
        self.records
            .write()
            .map_err(|e| BhashaError::ConcurrencyError(format!("registry lock poisoned: {e}")))
    }

    fn read_records(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<ModelVersion, ModelVersionRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unknown(version: &ModelVersion) -> BhashaError {
    RegistryError::UnknownVersion {
        version: version.to_string(),
    }
    .into()
}
