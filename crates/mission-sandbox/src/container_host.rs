// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The seam between [`crate::instance::Instance`] and an actual container
//! runtime, so the executor-facing API can be exercised against a fake host
//! in tests instead of requiring a real Docker daemon.

use crate::error::SandboxError;
use async_trait::async_trait;
use std::time::Duration;

/// Resource limits and image selection for a new container (spec §4.1 (e)).
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub host_workspace: String,
    pub cpu_limit: Option<f64>,
    pub mem_limit_mb: Option<u64>,
    pub pids_limit: Option<u64>,
    pub network_mode: Option<String>,
}

/// Result of a foreground exec (spec §4.1 `Instance.Command`).
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[async_trait]
pub trait ContainerHost: Send + Sync {
    async fn image_exists(&self, image: &str) -> Result<bool, SandboxError>;
    async fn pull_image(&self, image: &str) -> Result<(), SandboxError>;
    async fn create_and_start(&self, spec: &ContainerSpec) -> Result<String, SandboxError>;

    /// `shell -lc cmd` inside the container, with a host->container workdir
    /// already resolved by the caller (spec §4.1 `Instance.Command`).
    async fn exec(
        &self,
        container_id: &str,
        shell: &str,
        cmd: &str,
        workdir: Option<&str>,
    ) -> Result<ExecOutput, SandboxError>;

    /// Launch `cmd` detached, redirecting to `log_path` and writing its pid
    /// to `{log_path}.pid` (spec §4.1 `Instance.BackgroundCommand` step 2).
    async fn exec_detached(
        &self,
        container_id: &str,
        shell: &str,
        cmd: &str,
        log_path: &str,
    ) -> Result<(), SandboxError>;

    /// Full contents of a file inside the container, used to poll the
    /// background log and to detect readiness (spec §4.1 step 3/5).
    async fn read_file(&self, container_id: &str, path: &str) -> Result<String, SandboxError>;

    /// `kill -0 $(cat pid_file)`, used for the background liveness race
    /// (spec §4.1 step 4).
    async fn pid_alive(&self, container_id: &str, pid_file: &str) -> Result<bool, SandboxError>;

    async fn stop(&self, container_id: &str, grace: Duration) -> Result<(), SandboxError>;
    async fn remove(&self, container_id: &str, force: bool) -> Result<(), SandboxError>;
}
