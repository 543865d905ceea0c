//! Provisioning plan assembly
//!
//! Ties a validated layout to everything a caller hands to the provisioning
//! collaborators: the rendered user-data script for the instance request, the
//! volume requests for the storage collaborator, and the exported outputs an
//! operator sees after provisioning completes.

use crate::config::{LvmPlanConfig, PlanConfig, RaidPlanConfig};
use crate::topology::{LvmTopology, RaidLevel, RaidTopology};
use crate::volume::{self, VolumeSpec};
use crate::{ProvisionError, StorageLayout, script};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// A complete provisioning request: layout, boot script, volume requests,
/// and operator-visible outputs
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningPlan {
    pub layout: StorageLayout,
    pub user_data: String,
    pub volumes: Vec<VolumeSpec>,
    pub outputs: BTreeMap<String, String>,
}

impl ProvisioningPlan {
    /// Build a plan from a validated layout.
    ///
    /// Volume requests pair 1:1, in order, with the layout's device names and
    /// keep the original attachment names (translation happens only inside
    /// the rendered script).
    pub fn new(layout: StorageLayout, volume_size_gib: u32) -> Self {
        let user_data = layout.user_data();
        let volumes = match &layout {
            StorageLayout::Raid(topology) => volume::volumes_for_raid_devices(
                topology.level,
                &topology.device_names,
                volume_size_gib,
            ),
            StorageLayout::Lvm(topology) => {
                volume::volumes_for_lvm(&topology.device_names, volume_size_gib)
            }
        };

        let mut outputs = BTreeMap::new();
        outputs.insert("devices".to_string(), layout.device_names().join(" "));
        outputs.insert("mount_point".to_string(), layout.mount_point().to_string());
        outputs.insert(
            "filesystem".to_string(),
            layout.filesystem().to_string(),
        );
        outputs.insert("description".to_string(), layout.description());

        info!(
            volumes = volumes.len(),
            mount_point = %layout.mount_point(),
            "Assembled provisioning plan"
        );

        Self {
            layout,
            user_data,
            volumes,
            outputs,
        }
    }

    /// Build a plan from a parsed plan file
    pub fn from_config(config: PlanConfig) -> Result<Self, ProvisionError> {
        match config {
            PlanConfig::Raid(raid) => Self::from_raid_config(raid),
            PlanConfig::Lvm(lvm) => Self::from_lvm_config(lvm),
        }
    }

    fn from_raid_config(config: RaidPlanConfig) -> Result<Self, ProvisionError> {
        let level = RaidLevel::try_from(config.raid_level)?;
        let devices = match config.devices {
            Some(devices) => devices,
            None => {
                let count = config
                    .volume_count
                    .unwrap_or_else(|| level.recommended_volume_count());
                volume::device_names(count)?
            }
        };
        let mount_point = config
            .mount_point
            .unwrap_or_else(|| "/mnt/raid".to_string());

        let topology = RaidTopology::new(
            level,
            devices,
            mount_point,
            config.filesystem,
            config.array_device,
            format!("Custom RAID {level} configuration"),
        )?;

        Ok(Self::new(
            StorageLayout::Raid(topology),
            config.volume_size_gib,
        ))
    }

    fn from_lvm_config(config: LvmPlanConfig) -> Result<Self, ProvisionError> {
        let mount_point = config
            .mount_point
            .unwrap_or_else(|| LvmTopology::DEFAULT_MOUNT_POINT.to_string());

        let topology = LvmTopology::with_names(
            config.devices,
            mount_point,
            config.filesystem,
            config.volume_group,
            config.logical_volume,
        )?;

        Ok(Self::new(
            StorageLayout::Lvm(topology),
            config.volume_size_gib,
        ))
    }

    /// Base64-encoded user-data payload
    pub fn user_data_base64(&self) -> String {
        script::user_data_base64(&self.user_data)
    }

    /// Machine-readable plan for downstream tooling
    pub fn to_json(&self) -> Result<String, ProvisionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
