// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial(sandbox_root_env)]
fn env_var_overrides_settings_root() {
    std::env::set_var("OPENJULES_SANDBOX_ROOT", "/tmp/env-root");
    let root = resolve_sandbox_root(Some("/tmp/settings-root"));
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    assert_eq!(root, PathBuf::from("/tmp/env-root"));
}

#[test]
#[serial(sandbox_root_env)]
fn settings_root_used_when_no_env_override() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let root = resolve_sandbox_root(Some("/tmp/settings-root"));
    assert_eq!(root, PathBuf::from("/tmp/settings-root"));
}

#[test]
#[serial(sandbox_root_env)]
fn falls_back_to_home_dot_openjules_sandboxes() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let root = resolve_sandbox_root(None);
    assert!(root.ends_with(".openjules/sandboxes"));
}

#[test]
fn sandbox_dir_name_has_expected_shape() {
    let mission_id = MissionId::new();
    let name = sandbox_dir_name(&mission_id);
    assert!(name.starts_with(&format!("sandbox-{mission_id}-")));
    let suffix = name.strip_prefix(&format!("sandbox-{mission_id}-")).unwrap();
    let parts: Vec<&str> = suffix.split('-').collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].len(), 8);
    assert_eq!(parts[1].len(), 8);
}

#[test]
fn parent_dir_components_are_unsafe() {
    assert!(!is_safe_relative_path("../escape"));
    assert!(!is_safe_relative_path("a/../../b"));
    assert!(is_safe_relative_path("a/b/c"));
}
