//! LVM user-data builder
//!
//! Same staging as the RAID path (wait, poll, ensure tooling, act, persist,
//! mount) but aggregating capacity through a volume group instead of
//! assembling an array. No redundancy is modeled here.

use super::steps::{ATTACHMENT_WAIT_SECS, Step};
use crate::device;
use crate::topology::LvmTopology;
use tracing::debug;

/// Step sequence for an LVM topology
pub fn steps(topology: &LvmTopology) -> Vec<Step> {
    let block_devices = device::translate_all(&topology.device_names);
    let lv_path = topology.lv_path();

    vec![
        Step::WaitForAttachment {
            seconds: ATTACHMENT_WAIT_SECS,
        },
        Step::WaitForDevices {
            devices: block_devices.clone(),
        },
        Step::EnsureTool {
            command: "pvcreate".to_string(),
            package: "lvm2".to_string(),
        },
        Step::CreatePhysicalVolumes {
            devices: block_devices.clone(),
        },
        Step::CreateVolumeGroup {
            volume_group: topology.volume_group.clone(),
            devices: block_devices,
        },
        Step::CreateLogicalVolume {
            volume_group: topology.volume_group.clone(),
            logical_volume: topology.logical_volume.clone(),
        },
        Step::Format {
            filesystem: topology.filesystem,
            device: lv_path.clone(),
        },
        Step::MountPersistent {
            device: lv_path,
            mount_point: topology.mount_point.clone(),
            filesystem: topology.filesystem,
        },
        Step::LvmStatus {
            mount_point: topology.mount_point.clone(),
        },
    ]
}

/// Render the complete LVM provisioning user-data script
pub fn user_data(topology: &LvmTopology) -> String {
    debug!(
        devices = topology.device_names.len(),
        volume_group = %topology.volume_group,
        mount_point = %topology.mount_point,
        "Rendering LVM user data"
    );
    super::render(
        "Logical volume management configuration script",
        &steps(topology),
    )
}
