//! End-to-end tests for generated user-data scripts

use storage_init_rs::topology::{self, Filesystem, LvmTopology, RaidLevel, RaidTopology, presets};
use storage_init_rs::{device, script};

fn raid1_topology() -> RaidTopology {
    RaidTopology::new(
        RaidLevel::Raid1,
        vec!["/dev/sdf".into(), "/dev/sdg".into()],
        "/mnt/redundant-storage",
        Filesystem::Ext4,
        "/dev/md0",
        "RAID 1 - High availability, 50% usable capacity",
    )
    .unwrap()
}

// ==================== Scenario A: RAID 1 over two devices ====================

#[test]
fn test_raid1_script_contains_assembly_commands() {
    assert!(topology::validate(1, 2).is_ok());

    let user_data = script::raid::user_data(&raid1_topology());

    assert!(user_data.contains(
        "mdadm --create /dev/md0 --level=1 --raid-devices=2 /dev/xvdf /dev/xvdg"
    ));
    assert!(user_data.contains("mkfs.ext4 /dev/md0"));
    assert!(user_data.contains("/dev/md0 /mnt/redundant-storage ext4 defaults,nofail 0 2"));
}

#[test]
fn test_raid_script_is_fail_fast_bash() {
    let user_data = script::raid::user_data(&raid1_topology());
    assert!(user_data.starts_with("#!/bin/bash\n"));
    // set -e must come before any provisioning command
    let set_e = user_data.find("set -e").unwrap();
    let first_cmd = user_data.find("sleep 30").unwrap();
    assert!(set_e < first_cmd);
}

#[test]
fn test_raid_script_polls_before_assembly() {
    let user_data = script::raid::user_data(&raid1_topology());
    let poll = user_data.find("while [ ! -b $device ]").unwrap();
    let create = user_data.find("mdadm --create").unwrap();
    let resync = user_data.find("while grep -q \"resync\" /proc/mdstat").unwrap();
    let mkfs = user_data.find("mkfs.ext4").unwrap();
    let mount = user_data.find("mount /dev/md0 /mnt/redundant-storage").unwrap();
    assert!(poll < create && create < resync && resync < mkfs && mkfs < mount);
}

// ==================== Scenario B: infeasible RAID 5 ====================

#[test]
fn test_raid5_two_devices_rejected_before_generation() {
    assert!(topology::validate(5, 2).is_err());
    assert!(
        RaidTopology::new(
            RaidLevel::Raid5,
            vec!["/dev/sdf".into(), "/dev/sdg".into()],
            "/mnt/data",
            Filesystem::Ext4,
            "/dev/md0",
            "infeasible",
        )
        .is_err()
    );
}

// ==================== Scenario C: LVM aggregation ====================

#[test]
fn test_lvm_script_contains_volume_group_commands() {
    let topology = LvmTopology::new(
        vec!["/dev/sdc".into(), "/dev/sdd".into()],
        "/mnt/logical-storage",
        Filesystem::Ext4,
    )
    .unwrap();

    let user_data = script::lvm::user_data(&topology);

    assert!(user_data.contains("vgcreate storage_vg /dev/xvdc /dev/xvdd"));
    assert!(user_data.contains("lvcreate -l 100%FREE -n storage_lv storage_vg"));
    assert!(user_data.contains("mount /dev/storage_vg/storage_lv /mnt/logical-storage"));
    assert!(
        user_data
            .contains("/dev/storage_vg/storage_lv /mnt/logical-storage ext4 defaults,nofail 0 2")
    );
}

#[test]
fn test_lvm_script_installs_lvm2_and_lists_state() {
    let topology = LvmTopology::new(
        vec!["/dev/sdc".into(), "/dev/sdd".into()],
        "/mnt/logical-storage",
        Filesystem::Ext4,
    )
    .unwrap();

    let user_data = script::lvm::user_data(&topology);
    assert!(user_data.contains("command -v pvcreate"));
    assert!(user_data.contains("yum install -y lvm2"));
    assert!(user_data.contains("apt-get update && apt-get install -y lvm2"));
    assert!(user_data.contains("\nvgs\n"));
    assert!(user_data.contains("\nlvs\n"));
    assert!(user_data.contains("\npvs\n"));
}

// ==================== Scenario D: xfs special case ====================

#[test]
fn test_xfs_filesystem_command() {
    let topology = presets::raid0();
    assert_eq!(topology.filesystem, Filesystem::Xfs);

    let user_data = script::raid::user_data(&topology);
    assert!(user_data.contains("mkfs.xfs /dev/md0"));
    assert!(!user_data.contains("mkfs.xfs./dev/md0"));
}

// ==================== Determinism ====================

#[test]
fn test_raid_generation_is_deterministic() {
    let a = script::raid::user_data(&raid1_topology());
    let b = script::raid::user_data(&raid1_topology());
    assert_eq!(a, b);
}

#[test]
fn test_lvm_generation_is_deterministic() {
    let topology = LvmTopology::new(
        vec!["/dev/sdc".into(), "/dev/sdd".into()],
        "/mnt/logical-storage",
        Filesystem::Ext4,
    )
    .unwrap();
    assert_eq!(script::lvm::user_data(&topology), script::lvm::user_data(&topology));
}

// ==================== Device Translation ====================

#[test]
fn test_translation_applies_exactly_once() {
    let once = device::translate("/dev/sdf");
    assert_eq!(once, "/dev/xvdf");
    // Re-applying to an already-translated name is a no-op
    assert_eq!(device::translate(&once), "/dev/xvdf");
}

#[test]
fn test_script_never_mentions_untranslated_devices() {
    let user_data = script::raid::user_data(&raid1_topology());
    assert!(!user_data.contains("/dev/sdf"));
    assert!(!user_data.contains("/dev/sdg"));
}

// ==================== Monitoring Script ====================

#[test]
fn test_monitoring_script_status_markers() {
    let script = script::raid::monitoring_script("/dev/md0");
    // Downstream monitoring greps these exact markers
    assert!(script.contains("Starting RAID monitoring check"));
    assert!(script.contains("RAID monitoring check complete"));
    assert!(script.contains("WARNING: RAID array has failed devices!"));
    assert!(script.contains("grep -A 10 \"md0\""));
}
