//! # bhasha-registry
//!
//! Holds every loaded model artifact and the single active version.
//! Switch and rollback are mutually exclusive and fail fast; the active
//! pointer is published as one `Arc` swap so readers never see a partial
//! version.

mod record;
mod registry;

pub use record::{ActiveModel, LoadOutcome, ModelVersionRecord, VersionStatus};
pub use registry::{ModelVersionRegistry, UpdateGuard};
