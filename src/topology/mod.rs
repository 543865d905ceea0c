//! RAID level catalog and storage topology validation
//!
//! All validation happens here, synchronously, before any volume request or
//! user-data script is produced. Invalid topologies never leave this module.

pub mod presets;

use crate::ProvisionError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supported software RAID levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RaidLevel {
    Raid0,
    Raid1,
    Raid5,
    Raid6,
    Raid10,
}

impl RaidLevel {
    /// All supported levels, in catalog order
    pub const ALL: [RaidLevel; 5] = [
        RaidLevel::Raid0,
        RaidLevel::Raid1,
        RaidLevel::Raid5,
        RaidLevel::Raid6,
        RaidLevel::Raid10,
    ];

    /// Numeric level as passed to mdadm
    pub fn as_u8(self) -> u8 {
        match self {
            RaidLevel::Raid0 => 0,
            RaidLevel::Raid1 => 1,
            RaidLevel::Raid5 => 5,
            RaidLevel::Raid6 => 6,
            RaidLevel::Raid10 => 10,
        }
    }

    /// Minimum number of member devices required to assemble this level
    pub fn min_volumes(self) -> usize {
        match self {
            RaidLevel::Raid0 | RaidLevel::Raid1 => 2,
            RaidLevel::Raid5 => 3,
            RaidLevel::Raid6 | RaidLevel::Raid10 => 4,
        }
    }

    /// Recommended member count for generated volume sets.
    ///
    /// A sizing heuristic, not a feasibility bound: RAID 5 and 6 get one
    /// device over the minimum for a better capacity/rebuild balance. Callers
    /// may override the count; only [`min_volumes`](Self::min_volumes) is
    /// enforced.
    pub fn recommended_volume_count(self) -> usize {
        match self {
            RaidLevel::Raid0 => 3,
            RaidLevel::Raid1 => 2,
            RaidLevel::Raid5 => 4,
            RaidLevel::Raid6 => 5,
            RaidLevel::Raid10 => 4,
        }
    }

    /// Capability metadata for this level
    pub fn capabilities(self) -> &'static CapabilityInfo {
        match self {
            RaidLevel::Raid0 => &CapabilityInfo {
                description: "RAID 0 - Striping (no redundancy, maximum performance)",
                min_volumes: 2,
                usable_capacity: "100% of total capacity",
                fault_tolerance: "None",
                performance: "Excellent",
            },
            RaidLevel::Raid1 => &CapabilityInfo {
                description: "RAID 1 - Mirroring (50% usable capacity, high redundancy)",
                min_volumes: 2,
                usable_capacity: "50% of total capacity",
                fault_tolerance: "Can survive failure of 1 disk",
                performance: "Good read, moderate write",
            },
            RaidLevel::Raid5 => &CapabilityInfo {
                description: "RAID 5 - Distributed parity (good balance of capacity and redundancy)",
                min_volumes: 3,
                usable_capacity: "(n-1)/n of total capacity",
                fault_tolerance: "Can survive failure of 1 disk",
                performance: "Good read, moderate write",
            },
            RaidLevel::Raid6 => &CapabilityInfo {
                description: "RAID 6 - Double distributed parity (high redundancy)",
                min_volumes: 4,
                usable_capacity: "(n-2)/n of total capacity",
                fault_tolerance: "Can survive failure of 2 disks",
                performance: "Good read, slower write",
            },
            RaidLevel::Raid10 => &CapabilityInfo {
                description: "RAID 10 - Striped mirrors (excellent performance and redundancy)",
                min_volumes: 4,
                usable_capacity: "50% of total capacity",
                fault_tolerance: "Can survive failure of 1 disk per mirror",
                performance: "Excellent read and write",
            },
        }
    }

    /// Check a device count against this level's minimum
    pub fn validate_device_count(
        self,
        device_count: usize,
    ) -> Result<&'static CapabilityInfo, ProvisionError> {
        let caps = self.capabilities();
        if device_count < caps.min_volumes {
            return Err(ProvisionError::InsufficientDevices {
                level: self.as_u8(),
                required: caps.min_volumes,
                provided: device_count,
            });
        }
        Ok(caps)
    }
}

impl From<RaidLevel> for u8 {
    fn from(level: RaidLevel) -> u8 {
        level.as_u8()
    }
}

impl TryFrom<u8> for RaidLevel {
    type Error = ProvisionError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(RaidLevel::Raid0),
            1 => Ok(RaidLevel::Raid1),
            5 => Ok(RaidLevel::Raid5),
            6 => Ok(RaidLevel::Raid6),
            10 => Ok(RaidLevel::Raid10),
            other => Err(ProvisionError::UnsupportedLevel { level: other }),
        }
    }
}

impl std::fmt::Display for RaidLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Validate a numeric RAID level against a device count.
///
/// Resolves the level first (so an unknown level is reported as
/// [`ProvisionError::UnsupportedLevel`] even when the count is also short),
/// then checks the count against the level's minimum.
pub fn validate(level: u8, device_count: usize) -> Result<&'static CapabilityInfo, ProvisionError> {
    RaidLevel::try_from(level)?.validate_device_count(device_count)
}

/// Capability metadata for a RAID level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityInfo {
    pub description: &'static str,
    pub min_volumes: usize,
    pub usable_capacity: &'static str,
    pub fault_tolerance: &'static str,
    pub performance: &'static str,
}

/// Filesystem to create on the assembled device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filesystem {
    #[default]
    Ext4,
    Xfs,
    Btrfs,
}

impl Filesystem {
    /// The mkfs invocation for a target device.
    ///
    /// xfs is resolved as its own branch; everything else follows the
    /// generic `mkfs.<fs>` pattern.
    pub fn mkfs_command(self, device: &str) -> String {
        match self {
            Filesystem::Xfs => format!("mkfs.xfs {device}"),
            other => format!("mkfs.{other} {device}"),
        }
    }
}

impl std::fmt::Display for Filesystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filesystem::Ext4 => write!(f, "ext4"),
            Filesystem::Xfs => write!(f, "xfs"),
            Filesystem::Btrfs => write!(f, "btrfs"),
        }
    }
}

impl std::str::FromStr for Filesystem {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ext4" => Ok(Filesystem::Ext4),
            "xfs" => Ok(Filesystem::Xfs),
            "btrfs" => Ok(Filesystem::Btrfs),
            other => Err(ProvisionError::config(format!(
                "Unknown filesystem: {other}"
            ))),
        }
    }
}

/// A validated software RAID topology.
///
/// Immutable once constructed; `new` refuses levels outside the supported
/// set, device lists below the level minimum, duplicate devices, and
/// relative mount points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaidTopology {
    pub level: RaidLevel,
    pub device_names: Vec<String>,
    pub mount_point: String,
    pub filesystem: Filesystem,
    pub array_device: String,
    pub description: String,
}

impl RaidTopology {
    pub fn new(
        level: RaidLevel,
        device_names: Vec<String>,
        mount_point: impl Into<String>,
        filesystem: Filesystem,
        array_device: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ProvisionError> {
        level.validate_device_count(device_names.len())?;
        check_unique_devices(&device_names)?;
        let mount_point = check_mount_point(mount_point.into())?;

        Ok(Self {
            level,
            device_names,
            mount_point,
            filesystem,
            array_device: array_device.into(),
            description: description.into(),
        })
    }
}

/// A validated LVM aggregation topology (no redundancy, capacity only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LvmTopology {
    pub device_names: Vec<String>,
    pub mount_point: String,
    pub filesystem: Filesystem,
    pub volume_group: String,
    pub logical_volume: String,
}

impl LvmTopology {
    pub const DEFAULT_MOUNT_POINT: &'static str = "/mnt/logical-volume";
    pub const DEFAULT_VOLUME_GROUP: &'static str = "storage_vg";
    pub const DEFAULT_LOGICAL_VOLUME: &'static str = "storage_lv";

    pub fn new(
        device_names: Vec<String>,
        mount_point: impl Into<String>,
        filesystem: Filesystem,
    ) -> Result<Self, ProvisionError> {
        Self::with_names(
            device_names,
            mount_point,
            filesystem,
            Self::DEFAULT_VOLUME_GROUP,
            Self::DEFAULT_LOGICAL_VOLUME,
        )
    }

    pub fn with_names(
        device_names: Vec<String>,
        mount_point: impl Into<String>,
        filesystem: Filesystem,
        volume_group: impl Into<String>,
        logical_volume: impl Into<String>,
    ) -> Result<Self, ProvisionError> {
        if device_names.is_empty() {
            return Err(ProvisionError::NoDevices);
        }
        check_unique_devices(&device_names)?;
        let mount_point = check_mount_point(mount_point.into())?;

        Ok(Self {
            device_names,
            mount_point,
            filesystem,
            volume_group: volume_group.into(),
            logical_volume: logical_volume.into(),
        })
    }

    /// Device-mapper path of the logical volume
    pub fn lv_path(&self) -> String {
        format!("/dev/{}/{}", self.volume_group, self.logical_volume)
    }
}

fn check_unique_devices(devices: &[String]) -> Result<(), ProvisionError> {
    let mut seen = HashSet::new();
    for device in devices {
        if !seen.insert(device.as_str()) {
            return Err(ProvisionError::DuplicateDevice {
                device: device.clone(),
            });
        }
    }
    Ok(())
}

fn check_mount_point(mount_point: String) -> Result<String, ProvisionError> {
    if !mount_point.starts_with('/') {
        return Err(ProvisionError::InvalidMountPoint(mount_point));
    }
    Ok(mount_point)
}
