//! Error types for storage-init-rs

use thiserror::Error;

/// Main error type for storage provisioning operations
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Unsupported RAID level: {level}")]
    UnsupportedLevel { level: u8 },

    #[error("RAID {level} requires at least {required} volumes, but only {provided} provided")]
    InsufficientDevices {
        level: u8,
        required: usize,
        provided: usize,
    },

    #[error("Duplicate device name in topology: {device}")]
    DuplicateDevice { device: String },

    #[error("At least one device is required")]
    NoDevices,

    #[error("Mount point must be an absolute path: {0}")]
    InvalidMountPoint(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProvisionError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
