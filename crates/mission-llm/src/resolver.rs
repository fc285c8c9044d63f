// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves which back-end answers a given role's chat calls (spec §4.3):
//! a per-role override wins, then the project's global provider, then the
//! heuristic static fallback when no API key is configured at all.

use crate::default_models::default_model_for;
use crate::providers::{AnthropicProvider, GoogleProvider, OpenAiCompatProvider, StaticProvider};
use crate::provider::Provider;
use crate::role::Role;
use mission_core::{AiSettings, RoleOverride, RoleOverrides, Settings};

pub fn resolve_provider(role: Role, settings: &Settings) -> Box<dyn Provider> {
    let role_override = role_override_for(role, &settings.ai.roles);

    let provider_name = role_override.provider.clone().or_else(|| settings.ai.provider.clone());
    if let Some(name) = provider_name {
        if let Some(provider) = build_provider(&name, role_override.model.as_deref(), &settings.ai) {
            return provider;
        }
    }

    Box::new(StaticProvider::new())
}

fn role_override_for(role: Role, roles: &RoleOverrides) -> RoleOverride {
    match role {
        Role::Planner => roles.planner.clone(),
        Role::Coder => roles.coder.clone(),
        Role::Reviewer => roles.reviewer.clone(),
        Role::Thinker => roles.thinker.clone(),
        Role::Guard => roles.guard.clone(),
        Role::Troubleshooter => roles.troubleshooter.clone(),
    }
}

fn build_provider(name: &str, model_override: Option<&str>, ai: &AiSettings) -> Option<Box<dyn Provider>> {
    match name {
        "openai" => {
            let api_key = ai.openai.api_key.clone()?;
            let model = model_override.map(str::to_string).or_else(|| ai.openai.model.clone()).or_else(|| default_model_for("openai").map(str::to_string))?;
            Some(Box::new(OpenAiCompatProvider::openai(api_key, model)))
        }
        "anthropic" => {
            let api_key = ai.anthropic.api_key.clone()?;
            let model = model_override.map(str::to_string).or_else(|| ai.anthropic.model.clone()).or_else(|| default_model_for("anthropic").map(str::to_string))?;
            Some(Box::new(AnthropicProvider::new(api_key, model)))
        }
        "google" => {
            let api_key = ai.google.api_key.clone()?;
            let model = model_override.map(str::to_string).or_else(|| ai.google.model.clone()).or_else(|| default_model_for("google").map(str::to_string))?;
            Some(Box::new(GoogleProvider::new(api_key, model)))
        }
        "groq" => {
            let api_key = ai.groq.api_key.clone()?;
            let model = model_override.map(str::to_string).or_else(|| ai.groq.model.clone()).or_else(|| default_model_for("groq").map(str::to_string))?;
            Some(Box::new(OpenAiCompatProvider::groq(api_key, model)))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
