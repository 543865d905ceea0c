//! User-data script generation
//!
//! Builders turn a validated topology into a sequence of typed steps; the
//! renderer turns steps into a self-contained bash script that fails fast
//! (`set -e`). Runtime failures inside the script are deliberately left to
//! boot logs; nothing here retries.

pub mod lvm;
pub mod raid;
pub mod steps;

pub use steps::Step;

use base64::Engine;

/// Render a step sequence as a complete user-data script.
///
/// The script starts with the interpreter directive and `set -e`, so any
/// failing command aborts the remaining steps. Output is byte-identical for
/// identical inputs.
pub fn render(title: &str, steps: &[Step]) -> String {
    let mut out = String::new();
    out.push_str("#!/bin/bash\n");
    out.push_str(&format!("# {title}\n"));
    out.push_str("set -e\n");
    for step in steps {
        out.push('\n');
        step.render(&mut out);
    }
    out
}

/// Base64-encode a rendered script for providers that require encoded
/// user-data payloads
pub fn user_data_base64(script: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prologue() {
        let script = render("Test script", &[]);
        assert!(script.starts_with("#!/bin/bash\n# Test script\nset -e\n"));
    }

    #[test]
    fn test_base64_round_trip() {
        let script = render("Test script", &[]);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(user_data_base64(&script))
            .unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), script);
    }
}
