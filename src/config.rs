//! Plan file parsing
//!
//! A plan file is a small YAML document describing the desired storage
//! layout. It parses into explicit structs: a missing required field or a
//! misspelled key is a parse error, not a silent default.

use crate::ProvisionError;
use crate::topology::Filesystem;
use serde::{Deserialize, Serialize};

/// Parsed plan file, tagged by layout kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum PlanConfig {
    Raid(RaidPlanConfig),
    Lvm(LvmPlanConfig),
}

impl PlanConfig {
    /// Parse a plan file from YAML
    pub fn from_yaml(content: &str) -> Result<Self, ProvisionError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// RAID plan: level is required; devices may be listed explicitly or
/// generated from `volume_count` (defaulting to the level's recommended
/// count)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaidPlanConfig {
    pub raid_level: u8,

    /// Explicit attachment device names; generated when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,

    #[serde(default)]
    pub filesystem: Filesystem,

    #[serde(default = "default_array_device")]
    pub array_device: String,

    /// Size of each requested volume
    #[serde(default = "default_volume_size_gib")]
    pub volume_size_gib: u32,

    /// Member count when devices are generated; ignored if `devices` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_count: Option<usize>,
}

/// LVM plan: devices are required; group and volume names default to the
/// conventional `storage_vg`/`storage_lv`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LvmPlanConfig {
    pub devices: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,

    #[serde(default)]
    pub filesystem: Filesystem,

    #[serde(default = "default_volume_group")]
    pub volume_group: String,

    #[serde(default = "default_logical_volume")]
    pub logical_volume: String,

    #[serde(default = "default_volume_size_gib")]
    pub volume_size_gib: u32,
}

fn default_array_device() -> String {
    "/dev/md0".to_string()
}

fn default_volume_size_gib() -> u32 {
    10
}

fn default_volume_group() -> String {
    crate::topology::LvmTopology::DEFAULT_VOLUME_GROUP.to_string()
}

fn default_logical_volume() -> String {
    crate::topology::LvmTopology::DEFAULT_LOGICAL_VOLUME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raid_plan() {
        let yaml = r#"
layout: raid
raid_level: 5
devices: ["/dev/sdf", "/dev/sdg", "/dev/sdh"]
mount_point: /mnt/data
filesystem: xfs
volume_size_gib: 50
"#;
        let PlanConfig::Raid(config) = PlanConfig::from_yaml(yaml).unwrap() else {
            panic!("expected raid plan");
        };
        assert_eq!(config.raid_level, 5);
        assert_eq!(config.filesystem, Filesystem::Xfs);
        assert_eq!(config.array_device, "/dev/md0");
        assert_eq!(config.volume_size_gib, 50);
    }

    #[test]
    fn test_parse_lvm_plan_defaults() {
        let yaml = r#"
layout: lvm
devices: ["/dev/sdc", "/dev/sdd"]
"#;
        let PlanConfig::Lvm(config) = PlanConfig::from_yaml(yaml).unwrap() else {
            panic!("expected lvm plan");
        };
        assert_eq!(config.volume_group, "storage_vg");
        assert_eq!(config.logical_volume, "storage_lv");
        assert_eq!(config.filesystem, Filesystem::Ext4);
        assert_eq!(config.volume_size_gib, 10);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        // raid_level is required, no silent default
        let yaml = "layout: raid\nmount_point: /mnt/data\n";
        assert!(PlanConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_misspelled_key_is_an_error() {
        let yaml = "layout: lvm\ndevices: [/dev/sdc]\nmuont_point: /mnt/data\n";
        assert!(PlanConfig::from_yaml(yaml).is_err());
    }
}
