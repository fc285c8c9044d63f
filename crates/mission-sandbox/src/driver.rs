// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Sandbox Driver (spec §4.1): provisions and tears down one container
//! per mission.

use crate::config::{resolve_docker_config, resolve_persist};
use crate::container_host::{ContainerHost, ContainerSpec};
use crate::docker_host::DockerHost;
use crate::error::SandboxError;
use crate::instance::Instance;
use crate::paths::{resolve_sandbox_root, sandbox_dir_name};
use mission_core::{JobId, MissionId, Settings};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const GIT_AUTHOR_NAME: &str = "OpenJules";
const GIT_AUTHOR_EMAIL: &str = "openjules@local";
const STOP_GRACE: Duration = Duration::from_secs(1);

struct Bookkeeping {
    workspace_root: PathBuf,
    persist: bool,
}

/// Provisions, initializes, and tears down per-mission sandboxes.
///
/// Holds no mission-specific state beyond the bookkeeping needed for
/// [`Self::teardown`]; everything else lives on the returned [`Instance`].
pub struct SandboxDriver {
    host: Arc<dyn ContainerHost>,
    bookkeeping: Mutex<HashMap<String, Bookkeeping>>,
}

impl Default for SandboxDriver {
    fn default() -> Self {
        Self::new(Arc::new(DockerHost::new()))
    }
}

impl SandboxDriver {
    pub fn new(host: Arc<dyn ContainerHost>) -> Self {
        Self { host, bookkeeping: Mutex::new(HashMap::new()) }
    }

    /// Provision a fresh sandbox (spec §4.1 `Spawn`, steps a-g).
    pub async fn spawn(
        &self,
        mission_id: &MissionId,
        _project_id: &str,
        _job_id: &JobId,
        settings: &Settings,
    ) -> Result<Instance, SandboxError> {
        let root = resolve_sandbox_root(settings.execution.sandbox_root.as_deref());
        let workspace_root = root.join(sandbox_dir_name(mission_id));
        let repo_path = workspace_root.join("repo");
        tokio::fs::create_dir_all(&repo_path).await?;

        let docker_config = resolve_docker_config(&settings.execution.docker);
        if !self.host.image_exists(&docker_config.image).await? {
            self.host
                .pull_image(&docker_config.image)
                .await
                .map_err(|e| SandboxError::ImagePull { image: docker_config.image.clone(), source: Box::new(e) })?;
        }

        let container_name = format!("openjules-{mission_id}");
        let spec = ContainerSpec {
            name: container_name,
            image: docker_config.image,
            host_workspace: workspace_root.to_string_lossy().to_string(),
            cpu_limit: docker_config.cpu_limit,
            mem_limit_mb: docker_config.mem_limit_mb,
            pids_limit: docker_config.pids_limit,
            network_mode: docker_config.network_mode,
        };
        let container_id = self.host.create_and_start(&spec).await?;

        let persist = resolve_persist(settings.execution.persist_sandbox);
        self.bookkeeping
            .lock()
            .await
            .insert(container_id.clone(), Bookkeeping { workspace_root, persist });

        Ok(Instance::new(container_id.clone(), container_id, repo_path, "bash".to_string(), self.host.clone()))
    }

    /// Detect a shell, best-effort install `git`/`curl`/`wget`/`procps`,
    /// then `git init` with the fixed author identity (spec §4.1 `Instance.Init`).
    pub async fn init(&self, instance: &mut Instance) -> Result<(), SandboxError> {
        let (shell_out, _, shell_code) = instance.command("command -v bash", None, 10_000).await?;
        instance.shell = if shell_code == 0 && !shell_out.trim().is_empty() { "bash".to_string() } else { "sh".to_string() };

        let ensure_tools = "\
            (command -v git >/dev/null 2>&1 && command -v curl >/dev/null 2>&1 \
             && command -v wget >/dev/null 2>&1 && command -v ps >/dev/null 2>&1) || \
            (apk add --no-cache git curl wget procps 2>/dev/null || \
             (apt-get update -qq && apt-get install -y -qq git curl wget procps))";
        let _ = instance.command(ensure_tools, None, 120_000).await?;

        let init_cmd = format!(
            "git init -q && git config user.name '{GIT_AUTHOR_NAME}' && git config user.email '{GIT_AUTHOR_EMAIL}'"
        );
        let (_, stderr, code) = instance.command(&init_cmd, None, 30_000).await?;
        if code != 0 {
            return Err(SandboxError::InitFailed { exit_code: code, stderr });
        }

        tracing::info!(container_id = %instance.container_id, shell = %instance.shell, "sandbox container ready");
        Ok(())
    }

    /// Stop (1s grace), force-remove, and — unless `persist=true` —
    /// recursively delete the workspace (spec §4.1 `Teardown`).
    pub async fn teardown(&self, instance: &Instance) -> Result<(), SandboxError> {
        self.host.stop(&instance.container_id, STOP_GRACE).await.ok();
        self.host.remove(&instance.container_id, true).await.ok();

        if let Some(entry) = self.bookkeeping.lock().await.remove(&instance.container_id) {
            if !entry.persist {
                let _ = tokio::fs::remove_dir_all(&entry.workspace_root).await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
