//! RAID user-data builder
//!
//! Generates the boot-time script that waits for attached volumes, assembles
//! the mdadm array, formats it, and mounts it persistently. Also generates a
//! standalone health-monitoring script for the assembled array; downstream
//! monitoring greps its status markers, so the emitted wording is stable.

use super::steps::{ATTACHMENT_WAIT_SECS, Step};
use crate::device;
use crate::topology::RaidTopology;
use std::fmt::Write;
use tracing::debug;

/// Step sequence for a RAID topology.
///
/// Device names are translated to guest-visible paths here; the topology
/// keeps the original attachment names for the volume requests.
pub fn steps(topology: &RaidTopology) -> Vec<Step> {
    let block_devices = device::translate_all(&topology.device_names);

    vec![
        Step::WaitForAttachment {
            seconds: ATTACHMENT_WAIT_SECS,
        },
        Step::WaitForDevices {
            devices: block_devices.clone(),
        },
        Step::EnsureTool {
            command: "mdadm".to_string(),
            package: "mdadm".to_string(),
        },
        Step::CreateArray {
            array_device: topology.array_device.clone(),
            level: topology.level,
            devices: block_devices,
        },
        Step::WaitForResync,
        Step::Format {
            filesystem: topology.filesystem,
            device: topology.array_device.clone(),
        },
        Step::MountPersistent {
            device: topology.array_device.clone(),
            mount_point: topology.mount_point.clone(),
            filesystem: topology.filesystem,
        },
        Step::RaidStatus {
            level: topology.level,
            mount_point: topology.mount_point.clone(),
        },
    ]
}

/// Render the complete RAID provisioning user-data script
pub fn user_data(topology: &RaidTopology) -> String {
    debug!(
        level = %topology.level,
        devices = topology.device_names.len(),
        mount_point = %topology.mount_point,
        "Rendering RAID user data"
    );
    super::render("Software RAID configuration script", &steps(topology))
}

/// Render a health-monitoring script for an assembled array.
///
/// Logs to /var/log/raid-monitor.log, flags degraded member state from
/// /proc/mdstat, and warns when usage crosses 80%.
pub fn monitoring_script(array_device: &str) -> String {
    let mut out = String::new();
    writeln!(out, "#!/bin/bash").unwrap();
    writeln!(out, "# RAID monitoring script").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "RAID_DEVICE=\"{array_device}\"").unwrap();
    writeln!(out, "LOG_FILE=\"/var/log/raid-monitor.log\"").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "log_message() {{").unwrap();
    writeln!(
        out,
        "    echo \"$(date '+%Y-%m-%d %H:%M:%S') - $1\" | tee -a $LOG_FILE"
    )
    .unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "check_raid_status() {{").unwrap();
    writeln!(out, "    if [ -e $RAID_DEVICE ]; then").unwrap();
    writeln!(
        out,
        "        RAID_STATUS=$(cat /proc/mdstat | grep -A 10 \"{}\")",
        array_device.trim_start_matches("/dev/")
    )
    .unwrap();
    writeln!(out).unwrap();
    // A member shown as "_" inside the bracket summary is failed or missing
    writeln!(
        out,
        "        if echo \"$RAID_STATUS\" | grep -q \"\\[.*_.*\\]\"; then"
    )
    .unwrap();
    writeln!(
        out,
        "            log_message \"WARNING: RAID array has failed devices!\""
    )
    .unwrap();
    writeln!(out, "            log_message \"RAID Status: $RAID_STATUS\"").unwrap();
    writeln!(out, "            return 1").unwrap();
    writeln!(out, "        else").unwrap();
    writeln!(out, "            log_message \"RAID array is healthy\"").unwrap();
    writeln!(out, "            log_message \"RAID Status: $RAID_STATUS\"").unwrap();
    writeln!(out, "            return 0").unwrap();
    writeln!(out, "        fi").unwrap();
    writeln!(out, "    else").unwrap();
    writeln!(
        out,
        "        log_message \"ERROR: RAID device $RAID_DEVICE not found!\""
    )
    .unwrap();
    writeln!(out, "        return 1").unwrap();
    writeln!(out, "    fi").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "check_disk_space() {{").unwrap();
    writeln!(
        out,
        "    MOUNT_POINT=$(df $RAID_DEVICE | tail -1 | awk '{{print $6}}')"
    )
    .unwrap();
    writeln!(out, "    if [ -n \"$MOUNT_POINT\" ]; then").unwrap();
    writeln!(
        out,
        "        USAGE=$(df -h $MOUNT_POINT | tail -1 | awk '{{print $5}}' | sed 's/%//')"
    )
    .unwrap();
    writeln!(out, "        if [ \"$USAGE\" -gt 80 ]; then").unwrap();
    writeln!(
        out,
        "            log_message \"WARNING: RAID array usage is ${{USAGE}}%\""
    )
    .unwrap();
    writeln!(out, "        else").unwrap();
    writeln!(out, "            log_message \"RAID array usage: ${{USAGE}}%\"").unwrap();
    writeln!(out, "        fi").unwrap();
    writeln!(out, "    fi").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "log_message \"Starting RAID monitoring check\"").unwrap();
    writeln!(out, "check_raid_status").unwrap();
    writeln!(out, "check_disk_space").unwrap();
    writeln!(out, "log_message \"RAID monitoring check complete\"").unwrap();
    out
}
