// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn command_guard_defaults_match_spec() {
    let guard = CommandGuardSettings::default();
    assert!(guard.enabled);
    assert!(guard.block_destructive);
    assert!(guard.block_hanging);
    assert!(guard.block_network_exfil);
    assert!(guard.block_privilege_esc);
    assert!(guard.block_shell_injection);
    assert!(!guard.ai_review);
    assert!(guard.custom_deny_patterns.is_empty());
}

#[test]
fn settings_deserialize_from_partial_json() {
    let json = serde_json::json!({
        "ai": { "provider": "openai", "openai": { "apiKey": "sk-test" } },
        "execution": { "persistSandbox": true }
    });
    let settings: Settings = serde_json::from_value(json).unwrap();
    assert_eq!(settings.ai.provider.as_deref(), Some("openai"));
    assert_eq!(settings.ai.openai.api_key.as_deref(), Some("sk-test"));
    assert!(settings.execution.persist_sandbox);
    // untouched nested defaults still apply
    assert!(settings.execution.command_guard.enabled);
}

#[test]
fn empty_json_object_yields_full_defaults() {
    let settings: Settings = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(settings.execution.command_guard.block_hanging);
    assert!(settings.ai.roles.planner.provider.is_none());
}
