// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mission_core::ProviderCredentials;

#[test]
fn falls_back_to_static_when_nothing_is_configured() {
    let settings = Settings::default();
    let provider = resolve_provider(Role::Planner, &settings);
    assert_eq!(provider.name(), "static");
}

#[test]
fn global_provider_is_used_when_no_role_override_is_set() {
    let mut settings = Settings::default();
    settings.ai.provider = Some("openai".to_string());
    settings.ai.openai = ProviderCredentials { api_key: Some("sk-test".to_string()), model: None };
    let provider = resolve_provider(Role::Coder, &settings);
    assert_eq!(provider.name(), "openai");
}

#[test]
fn role_override_provider_wins_over_the_global_one() {
    let mut settings = Settings::default();
    settings.ai.provider = Some("openai".to_string());
    settings.ai.openai = ProviderCredentials { api_key: Some("sk-test".to_string()), model: None };
    settings.ai.anthropic = ProviderCredentials { api_key: Some("anthropic-key".to_string()), model: None };
    settings.ai.roles.guard.provider = Some("anthropic".to_string());

    let provider = resolve_provider(Role::Guard, &settings);
    assert_eq!(provider.name(), "anthropic");
}

#[test]
fn missing_api_key_for_the_chosen_provider_falls_back_to_static() {
    let mut settings = Settings::default();
    settings.ai.provider = Some("openai".to_string());
    let provider = resolve_provider(Role::Planner, &settings);
    assert_eq!(provider.name(), "static");
}
