// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve effective sandbox configuration from settings + environment
//! (spec §4.1, §6).

use mission_core::DockerSettings;

pub const DEFAULT_IMAGE: &str = "node:20-bookworm-slim";

#[derive(Debug, Clone)]
pub struct ResolvedDockerConfig {
    pub image: String,
    pub cpu_limit: Option<f64>,
    pub mem_limit_mb: Option<u64>,
    pub pids_limit: Option<u64>,
    pub network_mode: Option<String>,
}

/// `OPENJULES_DOCKER_IMAGE` overrides `execution.docker.image`, which
/// overrides the built-in default (spec §4.1, §6).
pub fn resolve_docker_config(settings: &DockerSettings) -> ResolvedDockerConfig {
    let image = std::env::var("OPENJULES_DOCKER_IMAGE")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| settings.image.clone())
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

    ResolvedDockerConfig {
        image,
        cpu_limit: settings.cpu_limit,
        mem_limit_mb: settings.mem_limit_mb,
        pids_limit: settings.pids_limit,
        network_mode: settings.network_mode.clone(),
    }
}

/// `OPENJULES_SANDBOX_PERSIST` overrides `execution.persistSandbox`
/// (spec §6).
pub fn resolve_persist(settings_persist: bool) -> bool {
    match std::env::var("OPENJULES_SANDBOX_PERSIST") {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => settings_persist,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
