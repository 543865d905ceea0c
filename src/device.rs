//! Logical-to-guest block device name translation
//!
//! Volumes are requested at `/dev/sd[c-z]` attachment points, but HVM guests
//! expose them as `/dev/xvd*`. Scripts that touch device paths must use the
//! translated name; the storage-attachment request must keep the original.

/// Translate a requested attachment device name to the guest-visible path.
///
/// `/dev/sdf` becomes `/dev/xvdf`; names with any other prefix (including
/// already-translated `/dev/xvd*` names) pass through unchanged.
pub fn translate(device: &str) -> String {
    match device.strip_prefix("/dev/sd") {
        Some(rest) => format!("/dev/xvd{rest}"),
        None => device.to_string(),
    }
}

/// Translate a whole device list, preserving order
pub fn translate_all(devices: &[String]) -> Vec<String> {
    devices.iter().map(|d| translate(d)).collect()
}
