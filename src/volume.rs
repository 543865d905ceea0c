//! Block-storage volume requests
//!
//! A topology describes the filesystem-level arrangement; the [`VolumeSpec`]
//! list describes the underlying disks that must be requested and attached
//! before the boot script can succeed. Specs keep the original attachment
//! device names; translation to guest paths happens only at script render
//! time.

use crate::ProvisionError;
use crate::topology::RaidLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Volume performance class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeType {
    Gp2,
    #[default]
    Gp3,
    Io1,
    Io2,
}

impl std::fmt::Display for VolumeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeType::Gp2 => write!(f, "gp2"),
            VolumeType::Gp3 => write!(f, "gp3"),
            VolumeType::Io1 => write!(f, "io1"),
            VolumeType::Io2 => write!(f, "io2"),
        }
    }
}

/// One block-storage volume to request and attach
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeSpec {
    pub name: String,
    pub size_gib: u32,
    #[serde(rename = "type")]
    pub volume_type: VolumeType,
    pub device_name: String,
    pub encrypted: bool,
    /// Required by the provider for io1/io2 volumes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl VolumeSpec {
    /// Volume restored from an existing snapshot
    pub fn from_snapshot(
        snapshot_id: impl Into<String>,
        device_name: impl Into<String>,
    ) -> Self {
        let snapshot_id = snapshot_id.into();
        let mut tags = BTreeMap::new();
        tags.insert("Name".to_string(), "Snapshot-Volume".to_string());
        tags.insert("Source".to_string(), format!("snapshot-{snapshot_id}"));
        Self {
            name: "snapshot-volume".to_string(),
            size_gib: 0,
            volume_type: VolumeType::Gp3,
            device_name: device_name.into(),
            encrypted: true,
            iops: None,
            snapshot_id: Some(snapshot_id),
            tags,
        }
    }

    /// io2 volume with provisioned IOPS for high-performance workloads
    pub fn io_optimized(size_gib: u32, device_name: impl Into<String>) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert("Name".to_string(), "IO-Optimized-Volume".to_string());
        tags.insert("Type".to_string(), "io2".to_string());
        Self {
            name: "io-optimized-volume".to_string(),
            size_gib,
            volume_type: VolumeType::Io2,
            device_name: device_name.into(),
            encrypted: true,
            iops: Some(3000),
            snapshot_id: None,
            tags,
        }
    }
}

/// Attachment device names for a generated volume set: /dev/sdc, /dev/sdd, ...
pub fn device_names(count: usize) -> Result<Vec<String>, ProvisionError> {
    // sdc through sdz; the provider reserves sda/sdb for root devices
    if count > 24 {
        return Err(ProvisionError::config(format!(
            "Cannot generate {count} device names; at most 24 attachment points available"
        )));
    }
    Ok((0..count)
        .map(|i| format!("/dev/sd{}", (b'c' + i as u8) as char))
        .collect())
}

/// Volume requests for a RAID level.
///
/// `count` defaults to the level's recommended member count and must meet the
/// level's minimum when given explicitly.
pub fn volumes_for_raid(
    level: RaidLevel,
    size_gib: u32,
    count: Option<usize>,
) -> Result<Vec<VolumeSpec>, ProvisionError> {
    let count = count.unwrap_or_else(|| level.recommended_volume_count());
    level.validate_device_count(count)?;
    Ok(volumes_for_raid_devices(level, &device_names(count)?, size_gib))
}

/// Volume requests paired 1:1, in order, with an existing RAID device list
pub fn volumes_for_raid_devices(
    level: RaidLevel,
    device_names: &[String],
    size_gib: u32,
) -> Vec<VolumeSpec> {
    device_names
        .iter()
        .enumerate()
        .map(|(i, device_name)| {
            let mut tags = BTreeMap::new();
            tags.insert("Name".to_string(), format!("RAID-Volume-{}", i + 1));
            tags.insert("Purpose".to_string(), format!("RAID {level} Storage"));
            tags.insert("RAID_Level".to_string(), level.to_string());
            VolumeSpec {
                name: format!("raid-volume-{}", i + 1),
                size_gib,
                volume_type: VolumeType::Gp3,
                device_name: device_name.clone(),
                encrypted: true,
                iops: None,
                snapshot_id: None,
                tags,
            }
        })
        .collect()
}

/// Volume requests backing an LVM device list, paired 1:1 by index
pub fn volumes_for_lvm(device_names: &[String], size_gib: u32) -> Vec<VolumeSpec> {
    device_names
        .iter()
        .enumerate()
        .map(|(i, device_name)| {
            let mut tags = BTreeMap::new();
            tags.insert("Name".to_string(), format!("Logical-Volume-{}", i + 1));
            tags.insert(
                "Purpose".to_string(),
                "Logical Volume Storage".to_string(),
            );
            tags.insert("Storage_Type".to_string(), "LVM".to_string());
            VolumeSpec {
                name: format!("logical-volume-{}", i + 1),
                size_gib,
                volume_type: VolumeType::Gp3,
                device_name: device_name.clone(),
                encrypted: true,
                iops: None,
                snapshot_id: None,
                tags,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_names_start_at_sdc() {
        assert_eq!(device_names(3).unwrap(), vec!["/dev/sdc", "/dev/sdd", "/dev/sde"]);
    }

    #[test]
    fn test_device_names_bounded() {
        assert!(device_names(24).is_ok());
        assert!(device_names(25).is_err());
    }

    #[test]
    fn test_raid_volumes_use_recommended_count() {
        let volumes = volumes_for_raid(RaidLevel::Raid5, 20, None).unwrap();
        assert_eq!(volumes.len(), 4);
        assert_eq!(volumes[0].name, "raid-volume-1");
        assert_eq!(volumes[0].device_name, "/dev/sdc");
        assert!(volumes.iter().all(|v| v.encrypted));
        assert_eq!(volumes[1].tags["RAID_Level"], "5");
    }

    #[test]
    fn test_raid_volume_count_override_still_validated() {
        // 6 members for RAID 6 is allowed; 3 is below the minimum
        assert_eq!(
            volumes_for_raid(RaidLevel::Raid6, 10, Some(6)).unwrap().len(),
            6
        );
        assert!(matches!(
            volumes_for_raid(RaidLevel::Raid6, 10, Some(3)),
            Err(crate::ProvisionError::InsufficientDevices { .. })
        ));
    }

    #[test]
    fn test_lvm_volumes_pair_by_index() {
        let devices = vec!["/dev/sdc".to_string(), "/dev/sdd".to_string()];
        let volumes = volumes_for_lvm(&devices, 50);
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[1].name, "logical-volume-2");
        assert_eq!(volumes[1].device_name, "/dev/sdd");
        assert_eq!(volumes[0].tags["Storage_Type"], "LVM");
    }

    #[test]
    fn test_io_optimized_requires_iops() {
        let volume = VolumeSpec::io_optimized(100, "/dev/sdf");
        assert_eq!(volume.volume_type, VolumeType::Io2);
        assert_eq!(volume.iops, Some(3000));
    }

    #[test]
    fn test_snapshot_volume_tags() {
        let volume = VolumeSpec::from_snapshot("snap-123", "/dev/sdf");
        assert_eq!(volume.snapshot_id.as_deref(), Some("snap-123"));
        assert_eq!(volume.tags["Source"], "snapshot-snap-123");
    }
}
