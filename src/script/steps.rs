//! Typed provisioning steps and their shell formatter
//!
//! A generated script is a sequence of [`Step`] records rendered by one
//! formatter, so step order and content can be asserted independently of the
//! final string shape. Rendering is deterministic: the same steps always
//! produce the same bytes.

use crate::topology::{Filesystem, RaidLevel};
use std::fmt::Write;

/// Seconds to wait up front for asynchronous volume attachment
pub const ATTACHMENT_WAIT_SECS: u32 = 30;

/// Fixed interval between device-presence polls
pub const DEVICE_POLL_SECS: u32 = 5;

/// Fixed interval between resync polls
pub const RESYNC_POLL_SECS: u32 = 10;

/// One stage of a generated provisioning script.
///
/// Device names carried here must already be guest-visible paths (see
/// [`crate::device::translate`]); the formatter emits them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Fixed pause for storage attachment to complete
    WaitForAttachment { seconds: u32 },
    /// Poll until every device node exists, fixed interval, unbounded
    WaitForDevices { devices: Vec<String> },
    /// Install `package` unless `command` is already present
    EnsureTool { command: String, package: String },
    /// Assemble the RAID array
    CreateArray {
        array_device: String,
        level: RaidLevel,
        devices: Vec<String>,
    },
    /// Poll /proc/mdstat until background resync is no longer reported
    WaitForResync,
    /// Initialize each device as an LVM physical volume
    CreatePhysicalVolumes { devices: Vec<String> },
    /// Aggregate physical volumes into one volume group
    CreateVolumeGroup {
        volume_group: String,
        devices: Vec<String>,
    },
    /// Allocate one logical volume over all free space in the group
    CreateLogicalVolume {
        volume_group: String,
        logical_volume: String,
    },
    /// Create the filesystem on the assembled device
    Format {
        filesystem: Filesystem,
        device: String,
    },
    /// Create the mount point, persist it in fstab with nofail, mount, chmod
    MountPersistent {
        device: String,
        mount_point: String,
        filesystem: Filesystem,
    },
    /// Completion banner plus array status for diagnostic capture
    RaidStatus {
        level: RaidLevel,
        mount_point: String,
    },
    /// Completion banner plus vgs/lvs/pvs listings
    LvmStatus { mount_point: String },
}

impl Step {
    /// Append this step's shell fragment to the script body
    pub fn render(&self, out: &mut String) {
        match self {
            Step::WaitForAttachment { seconds } => {
                writeln!(out, "# Wait for all volumes to be attached and available").unwrap();
                writeln!(out, "echo \"Waiting for volumes to be available...\"").unwrap();
                writeln!(out, "sleep {seconds}").unwrap();
            }
            Step::WaitForDevices { devices } => {
                writeln!(out, "# Check if devices exist").unwrap();
                writeln!(out, "for device in {}; do", devices.join(" ")).unwrap();
                writeln!(out, "    while [ ! -b $device ]; do").unwrap();
                writeln!(
                    out,
                    "        echo \"Waiting for device $device to be available...\""
                )
                .unwrap();
                writeln!(out, "        sleep {DEVICE_POLL_SECS}").unwrap();
                writeln!(out, "    done").unwrap();
                writeln!(out, "    echo \"Device $device is available\"").unwrap();
                writeln!(out, "done").unwrap();
            }
            Step::EnsureTool { command, package } => {
                writeln!(out, "# Install {package} if not present").unwrap();
                writeln!(out, "if ! command -v {command} &> /dev/null; then").unwrap();
                writeln!(out, "    echo \"Installing {package}...\"").unwrap();
                writeln!(out, "    if command -v yum &> /dev/null; then").unwrap();
                writeln!(out, "        yum install -y {package}").unwrap();
                writeln!(out, "    elif command -v apt-get &> /dev/null; then").unwrap();
                writeln!(out, "        apt-get update && apt-get install -y {package}").unwrap();
                writeln!(out, "    fi").unwrap();
                writeln!(out, "fi").unwrap();
            }
            Step::CreateArray {
                array_device,
                level,
                devices,
            } => {
                writeln!(out, "echo \"Creating RAID {level} array...\"").unwrap();
                writeln!(
                    out,
                    "mdadm --create {array_device} --level={level} --raid-devices={} {}",
                    devices.len(),
                    devices.join(" ")
                )
                .unwrap();
            }
            Step::WaitForResync => {
                writeln!(out, "echo \"Waiting for RAID array to finish building...\"").unwrap();
                writeln!(out, "while grep -q \"resync\" /proc/mdstat; do").unwrap();
                writeln!(out, "    echo \"RAID array is still building...\"").unwrap();
                writeln!(out, "    sleep {RESYNC_POLL_SECS}").unwrap();
                writeln!(out, "done").unwrap();
            }
            Step::CreatePhysicalVolumes { devices } => {
                writeln!(out, "echo \"Creating physical volumes...\"").unwrap();
                writeln!(out, "for device in {}; do", devices.join(" ")).unwrap();
                writeln!(out, "    echo \"Creating physical volume on $device\"").unwrap();
                writeln!(out, "    pvcreate $device").unwrap();
                writeln!(out, "done").unwrap();
            }
            Step::CreateVolumeGroup {
                volume_group,
                devices,
            } => {
                writeln!(out, "echo \"Creating volume group '{volume_group}'...\"").unwrap();
                writeln!(out, "vgcreate {volume_group} {}", devices.join(" ")).unwrap();
            }
            Step::CreateLogicalVolume {
                volume_group,
                logical_volume,
            } => {
                writeln!(out, "echo \"Creating logical volume '{logical_volume}'...\"").unwrap();
                writeln!(out, "lvcreate -l 100%FREE -n {logical_volume} {volume_group}").unwrap();
            }
            Step::Format { filesystem, device } => {
                writeln!(out, "echo \"Creating {filesystem} filesystem on {device}...\"").unwrap();
                writeln!(out, "{}", filesystem.mkfs_command(device)).unwrap();
            }
            Step::MountPersistent {
                device,
                mount_point,
                filesystem,
            } => {
                writeln!(out, "echo \"Creating mount point {mount_point}...\"").unwrap();
                writeln!(out, "mkdir -p {mount_point}").unwrap();
                writeln!(out, "echo \"Persisting mount in fstab...\"").unwrap();
                writeln!(
                    out,
                    "echo \"{device} {mount_point} {filesystem} defaults,nofail 0 2\" >> /etc/fstab"
                )
                .unwrap();
                writeln!(out, "echo \"Mounting {device}...\"").unwrap();
                writeln!(out, "mount {device} {mount_point}").unwrap();
                writeln!(out, "chmod 755 {mount_point}").unwrap();
            }
            Step::RaidStatus { level, mount_point } => {
                writeln!(out, "echo \"RAID {level} setup complete!\"").unwrap();
                writeln!(out, "echo \"RAID array mounted at {mount_point}\"").unwrap();
                writeln!(out, "echo \"RAID status:\"").unwrap();
                writeln!(out, "cat /proc/mdstat").unwrap();
                writeln!(out, "df -h {mount_point}").unwrap();
            }
            Step::LvmStatus { mount_point } => {
                writeln!(out, "echo \"Logical volume setup complete!\"").unwrap();
                writeln!(out, "echo \"Logical volume mounted at {mount_point}\"").unwrap();
                writeln!(out, "echo \"Volume group information:\"").unwrap();
                writeln!(out, "vgs").unwrap();
                writeln!(out, "echo \"Logical volume information:\"").unwrap();
                writeln!(out, "lvs").unwrap();
                writeln!(out, "echo \"Physical volume information:\"").unwrap();
                writeln!(out, "pvs").unwrap();
            }
        }
    }
}
