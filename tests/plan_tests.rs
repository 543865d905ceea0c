//! Tests for plan files and full plan assembly

use std::fs;
use storage_init_rs::config::PlanConfig;
use storage_init_rs::topology::presets;
use storage_init_rs::{ProvisionError, ProvisioningPlan, StorageLayout};
use tempfile::TempDir;

// ==================== Plan Files ====================

#[test]
fn test_plan_file_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plan.yaml");
    fs::write(
        &path,
        "layout: raid\nraid_level: 10\ndevices:\n  - /dev/sdf\n  - /dev/sdg\n  - /dev/sdh\n  - /dev/sdi\nmount_point: /mnt/production-storage\nvolume_size_gib: 100\n",
    )
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let plan = ProvisioningPlan::from_config(PlanConfig::from_yaml(&content).unwrap()).unwrap();

    assert_eq!(plan.volumes.len(), 4);
    assert!(plan.volumes.iter().all(|v| v.size_gib == 100));
    assert!(plan.user_data.contains("--level=10 --raid-devices=4"));
}

#[test]
fn test_plan_file_validation_happens_before_rendering() {
    let config =
        PlanConfig::from_yaml("layout: raid\nraid_level: 9\n").unwrap();
    assert!(matches!(
        ProvisioningPlan::from_config(config),
        Err(ProvisionError::UnsupportedLevel { level: 9 })
    ));
}

// ==================== Assembled Plans ====================

#[test]
fn test_plan_volumes_and_topology_agree() {
    let plan = ProvisioningPlan::new(StorageLayout::Raid(presets::raid5()), 20);

    // 1:1 pairing, same order
    assert_eq!(plan.volumes.len(), plan.layout.device_names().len());
    for (volume, device) in plan.volumes.iter().zip(plan.layout.device_names()) {
        assert_eq!(&volume.device_name, device);
    }
}

#[test]
fn test_plan_exports_operator_outputs() {
    let plan = ProvisioningPlan::new(StorageLayout::Raid(presets::raid6()), 10);
    assert_eq!(plan.outputs["mount_point"], "/mnt/secure-storage");
    assert_eq!(plan.outputs["filesystem"], "ext4");
    assert_eq!(
        plan.outputs["devices"],
        "/dev/sdf /dev/sdg /dev/sdh /dev/sdi /dev/sdj"
    );
}

#[test]
fn test_plan_json_is_machine_readable() {
    let plan = ProvisioningPlan::new(StorageLayout::Raid(presets::raid1()), 50);
    let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

    assert_eq!(json["layout"]["kind"], "raid");
    assert_eq!(json["volumes"][0]["type"], "gp3");
    assert_eq!(json["volumes"][0]["encrypted"], true);
    assert!(json["user_data"].as_str().unwrap().starts_with("#!/bin/bash"));
}

#[test]
fn test_lvm_plan_end_to_end() {
    let config = PlanConfig::from_yaml(
        "layout: lvm\ndevices: [/dev/sdc, /dev/sdd]\nmount_point: /mnt/logical-storage\nvolume_size_gib: 50\n",
    )
    .unwrap();
    let plan = ProvisioningPlan::from_config(config).unwrap();

    assert_eq!(plan.volumes.len(), 2);
    assert_eq!(plan.volumes[0].tags["Storage_Type"], "LVM");
    assert!(plan.user_data.contains("vgcreate storage_vg /dev/xvdc /dev/xvdd"));
    assert!(plan.user_data.contains("lvcreate -l 100%FREE -n storage_lv storage_vg"));
}

#[test]
fn test_plan_is_deterministic() {
    let a = ProvisioningPlan::new(StorageLayout::Raid(presets::raid10()), 100);
    let b = ProvisioningPlan::new(StorageLayout::Raid(presets::raid10()), 100);
    assert_eq!(a.user_data, b.user_data);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}
