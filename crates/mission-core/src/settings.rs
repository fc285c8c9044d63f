// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-project settings recognised across the runtime (spec §3, §6).

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// `execution.commandGuard` (spec §4.2, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandGuardSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub block_destructive: bool,
    #[serde(default = "default_true")]
    pub block_hanging: bool,
    #[serde(default = "default_true")]
    pub block_network_exfil: bool,
    #[serde(default = "default_true")]
    pub block_privilege_esc: bool,
    #[serde(default = "default_true")]
    pub block_shell_injection: bool,
    #[serde(default)]
    pub custom_deny_patterns: Vec<String>,
    #[serde(default)]
    pub custom_allow_patterns: Vec<String>,
    #[serde(default)]
    pub ai_review: bool,
}

impl Default for CommandGuardSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            block_destructive: true,
            block_hanging: true,
            block_network_exfil: true,
            block_privilege_esc: true,
            block_shell_injection: true,
            custom_deny_patterns: Vec::new(),
            custom_allow_patterns: Vec::new(),
            ai_review: false,
        }
    }
}

/// `execution.docker` (spec §4.1, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerSettings {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cpu_limit: Option<f64>,
    #[serde(default)]
    pub mem_limit_mb: Option<u64>,
    #[serde(default)]
    pub pids_limit: Option<u64>,
    #[serde(default)]
    pub network_mode: Option<String>,
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self { image: None, cpu_limit: None, mem_limit_mb: None, pids_limit: None, network_mode: None }
    }
}

/// `execution.*` (spec §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSettings {
    #[serde(default)]
    pub sandbox_root: Option<String>,
    #[serde(default)]
    pub persist_sandbox: bool,
    #[serde(default)]
    pub docker: DockerSettings,
    #[serde(default)]
    pub command_guard: CommandGuardSettings,
}

/// A provider's API key + default model override (spec §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// `ai.roles.<role>` override of provider and/or model (spec §4.3, §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleOverride {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// `ai.roles.*` (spec §4.3): one override slot per LLM role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleOverrides {
    #[serde(default)]
    pub planner: RoleOverride,
    #[serde(default)]
    pub coder: RoleOverride,
    #[serde(default)]
    pub reviewer: RoleOverride,
    #[serde(default)]
    pub thinker: RoleOverride,
    #[serde(default)]
    pub guard: RoleOverride,
    #[serde(default)]
    pub troubleshooter: RoleOverride,
}

/// `ai.*` (spec §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub openai: ProviderCredentials,
    #[serde(default)]
    pub anthropic: ProviderCredentials,
    #[serde(default)]
    pub google: ProviderCredentials,
    #[serde(default)]
    pub groq: ProviderCredentials,
    #[serde(default)]
    pub roles: RoleOverrides,
}

/// `prompts.*` (spec §6): currently just the planner override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptOverride {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsSettings {
    #[serde(default)]
    pub planner: PromptOverride,
}

/// Per-project settings (spec §3): `ai`, `execution`, `prompts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ai: AiSettings,
    #[serde(default)]
    pub execution: ExecutionSettings,
    #[serde(default)]
    pub prompts: PromptsSettings,
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
