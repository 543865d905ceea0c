//! storage-init-rs library
//!
//! Plans boot-time storage provisioning for cloud instances: validates
//! RAID/LVM topologies, renders idempotent user-data scripts that assemble
//! and mount the storage, and emits the parallel block-storage volume
//! requests that must be attached before the script can succeed.
//!
//! # Design Principles
//!
//! - **Safety First**: No unsafe code (`#![forbid(unsafe_code)]`)
//! - **Validate Early**: Infeasible topologies are rejected at build time,
//!   before any resource request exists
//! - **Deterministic Output**: Identical inputs render byte-identical
//!   scripts, so generated artifacts stay diffable and testable
//!
//! The cloud resource engine that applies the plan (create/diff/destroy) is
//! an external collaborator; this crate only produces the artifacts it
//! consumes.

pub mod config;
pub mod device;
pub mod plan;
pub mod script;
pub mod topology;
pub mod volume;

mod error;

pub use error::ProvisionError;
pub use plan::ProvisioningPlan;
pub use topology::{CapabilityInfo, Filesystem, LvmTopology, RaidLevel, RaidTopology};
pub use volume::{VolumeSpec, VolumeType};

use serde::Serialize;

/// Desired storage arrangement for one provisioning request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageLayout {
    /// Software RAID array assembled with mdadm
    Raid(RaidTopology),
    /// Volume group aggregation, capacity only
    Lvm(LvmTopology),
}

impl StorageLayout {
    /// Attachment-level device names, in order
    pub fn device_names(&self) -> &[String] {
        match self {
            StorageLayout::Raid(t) => &t.device_names,
            StorageLayout::Lvm(t) => &t.device_names,
        }
    }

    pub fn mount_point(&self) -> &str {
        match self {
            StorageLayout::Raid(t) => &t.mount_point,
            StorageLayout::Lvm(t) => &t.mount_point,
        }
    }

    pub fn filesystem(&self) -> Filesystem {
        match self {
            StorageLayout::Raid(t) => t.filesystem,
            StorageLayout::Lvm(t) => t.filesystem,
        }
    }

    /// Human-readable summary exported for operator visibility
    pub fn description(&self) -> String {
        match self {
            StorageLayout::Raid(t) => t.description.clone(),
            StorageLayout::Lvm(_) => "Logical Volume Management without RAID".to_string(),
        }
    }

    /// Render the boot-time user-data script for this layout
    pub fn user_data(&self) -> String {
        match self {
            StorageLayout::Raid(t) => script::raid::user_data(t),
            StorageLayout::Lvm(t) => script::lvm::user_data(t),
        }
    }
}

impl std::fmt::Display for StorageLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageLayout::Raid(t) => write!(f, "raid{}", t.level),
            StorageLayout::Lvm(_) => write!(f, "lvm"),
        }
    }
}
