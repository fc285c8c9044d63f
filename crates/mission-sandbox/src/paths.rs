// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sandbox root resolution and per-mission workspace layout (spec §4.1, §6).

use mission_core::MissionId;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// `OPENJULES_SANDBOX_ROOT` overrides settings; settings override the
/// `<home>/.openjules/sandboxes` default (spec §6).
pub fn resolve_sandbox_root(settings_root: Option<&str>) -> PathBuf {
    if let Ok(env_root) = std::env::var("OPENJULES_SANDBOX_ROOT") {
        if !env_root.is_empty() {
            return PathBuf::from(env_root);
        }
    }
    if let Some(root) = settings_root {
        if !root.is_empty() {
            return PathBuf::from(root);
        }
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")).join(".openjules").join("sandboxes")
}

/// `<root>/sandbox-<missionId>-<8-hex>-<8-hex>` (spec §6).
pub fn sandbox_dir_name(mission_id: &MissionId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(mission_id.as_str().as_bytes());
    let digest = hasher.finalize();
    let hash_component = hex_prefix(&digest, 8);
    let rand_component = hex_prefix(nanoid::nanoid!(8).as_bytes(), 8);
    format!("sandbox-{}-{}-{}", mission_id, hash_component, rand_component)
}

fn hex_prefix(bytes: &[u8], chars: usize) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>().chars().take(chars).collect()
}

/// Reject any path component equal to `..`, guarding against escaping the
/// sandbox's repo root (spec §6, mandatory for any host-path consumer).
pub fn is_safe_relative_path(path: &str) -> bool {
    !std::path::Path::new(path).components().any(|c| matches!(c, std::path::Component::ParentDir))
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
