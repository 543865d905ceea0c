//! Preset topology catalog
//!
//! One fixed topology per supported RAID level, sized past the bare minimum
//! where that makes for a realistic layout, plus a custom factory that runs
//! the same validation.

use super::{Filesystem, RaidLevel, RaidTopology};
use crate::ProvisionError;

fn devices(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// RAID 0 for maximum throughput: temporary data, scratch space, processing
pub fn raid0() -> RaidTopology {
    RaidTopology {
        level: RaidLevel::Raid0,
        device_names: devices(&["/dev/sdf", "/dev/sdg", "/dev/sdh"]),
        mount_point: "/mnt/fast-storage".to_string(),
        filesystem: Filesystem::Xfs,
        array_device: "/dev/md0".to_string(),
        description: "RAID 0 - Maximum performance, no redundancy".to_string(),
    }
}

/// RAID 1 for high availability: databases, critical application storage
pub fn raid1() -> RaidTopology {
    RaidTopology {
        level: RaidLevel::Raid1,
        device_names: devices(&["/dev/sdf", "/dev/sdg"]),
        mount_point: "/mnt/redundant-storage".to_string(),
        filesystem: Filesystem::Ext4,
        array_device: "/dev/md0".to_string(),
        description: "RAID 1 - High availability, 50% usable capacity".to_string(),
    }
}

/// RAID 5 for cost-effective redundancy: file servers, backup storage
pub fn raid5() -> RaidTopology {
    RaidTopology {
        level: RaidLevel::Raid5,
        device_names: devices(&["/dev/sdf", "/dev/sdg", "/dev/sdh", "/dev/sdi"]),
        mount_point: "/mnt/efficient-storage".to_string(),
        filesystem: Filesystem::Ext4,
        array_device: "/dev/md0".to_string(),
        description: "RAID 5 - Cost-effective redundancy, good read performance".to_string(),
    }
}

/// RAID 6 for high redundancy: archives, high-reliability requirements
pub fn raid6() -> RaidTopology {
    RaidTopology {
        level: RaidLevel::Raid6,
        device_names: devices(&["/dev/sdf", "/dev/sdg", "/dev/sdh", "/dev/sdi", "/dev/sdj"]),
        mount_point: "/mnt/secure-storage".to_string(),
        filesystem: Filesystem::Ext4,
        array_device: "/dev/md0".to_string(),
        description: "RAID 6 - High redundancy, can survive 2 disk failures".to_string(),
    }
}

/// RAID 10 for performance plus redundancy: production databases
pub fn raid10() -> RaidTopology {
    RaidTopology {
        level: RaidLevel::Raid10,
        device_names: devices(&["/dev/sdf", "/dev/sdg", "/dev/sdh", "/dev/sdi"]),
        mount_point: "/mnt/production-storage".to_string(),
        filesystem: Filesystem::Ext4,
        array_device: "/dev/md0".to_string(),
        description: "RAID 10 - Best performance and redundancy combination".to_string(),
    }
}

/// Preset topology for a given level
pub fn for_level(level: RaidLevel) -> RaidTopology {
    match level {
        RaidLevel::Raid0 => raid0(),
        RaidLevel::Raid1 => raid1(),
        RaidLevel::Raid5 => raid5(),
        RaidLevel::Raid6 => raid6(),
        RaidLevel::Raid10 => raid10(),
    }
}

/// Build a custom topology with the same validation the presets satisfy
pub fn custom(
    level: RaidLevel,
    device_names: Vec<String>,
    mount_point: impl Into<String>,
    filesystem: Filesystem,
) -> Result<RaidTopology, ProvisionError> {
    RaidTopology::new(
        level,
        device_names,
        mount_point,
        filesystem,
        "/dev/md0",
        format!("Custom RAID {level} configuration"),
    )
}
