// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Production [`ContainerHost`] implementation shelling out to `docker`.

use crate::container_host::{ContainerHost, ContainerSpec, ExecOutput};
use crate::docker_cli;
use crate::error::SandboxError;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy)]
pub struct DockerHost;

impl DockerHost {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContainerHost for DockerHost {
    async fn image_exists(&self, image: &str) -> Result<bool, SandboxError> {
        match docker_cli::run(&["image", "inspect", image]).await {
            Ok(_) => Ok(true),
            Err(SandboxError::DockerCommand { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn pull_image(&self, image: &str) -> Result<(), SandboxError> {
        docker_cli::run(&["pull", image]).await.map(|_| ())
    }

    async fn create_and_start(&self, spec: &ContainerSpec) -> Result<String, SandboxError> {
        let mount = format!("{}:/workspace", spec.host_workspace);
        let mut args: Vec<String> = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            spec.name.clone(),
            "-v".to_string(),
            mount,
            "-w".to_string(),
            "/workspace".to_string(),
        ];
        if let Some(cpu) = spec.cpu_limit {
            args.push("--cpus".to_string());
            args.push(cpu.to_string());
        }
        if let Some(mem) = spec.mem_limit_mb {
            args.push("--memory".to_string());
            args.push(format!("{mem}m"));
        }
        if let Some(pids) = spec.pids_limit {
            args.push("--pids-limit".to_string());
            args.push(pids.to_string());
        }
        if let Some(ref net) = spec.network_mode {
            args.push("--network".to_string());
            args.push(net.clone());
        }
        args.push(spec.image.clone());
        // idle keep-alive: the container must stay up for exec to target it.
        args.push("sh".to_string());
        args.push("-c".to_string());
        args.push("while true; do sleep 3600; done".to_string());

        let container_id = docker_cli::run(&args.iter().map(String::as_str).collect::<Vec<_>>())
            .await
            .map_err(|e| SandboxError::ContainerStart(e.to_string()))?;
        Ok(container_id)
    }

    async fn exec(
        &self,
        container_id: &str,
        shell: &str,
        cmd: &str,
        workdir: Option<&str>,
    ) -> Result<ExecOutput, SandboxError> {
        let (stdout, stderr, exit_code) = docker_cli::exec(container_id, shell, cmd, workdir).await?;
        Ok(ExecOutput { stdout, stderr, exit_code })
    }

    async fn exec_detached(
        &self,
        container_id: &str,
        shell: &str,
        cmd: &str,
        log_path: &str,
    ) -> Result<(), SandboxError> {
        // Escape single quotes in `cmd` (spec §4.1 step 2).
        let escaped = cmd.replace('\'', r"'\''");
        let launcher = format!(
            "nohup {shell} -c '{escaped}' > {log_path} 2>&1 & echo $! > {log_path}.pid"
        );
        docker_cli::run(&["exec", container_id, shell, "-lc", &launcher]).await.map(|_| ())
    }

    async fn read_file(&self, container_id: &str, path: &str) -> Result<String, SandboxError> {
        docker_cli::run(&["exec", container_id, "cat", path]).await
    }

    async fn pid_alive(&self, container_id: &str, pid_file: &str) -> Result<bool, SandboxError> {
        let cmd = format!("kill -0 $(cat {pid_file}) 2>/dev/null");
        match docker_cli::run(&["exec", container_id, "sh", "-c", &cmd]).await {
            Ok(_) => Ok(true),
            Err(SandboxError::DockerCommand { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn stop(&self, container_id: &str, grace: Duration) -> Result<(), SandboxError> {
        docker_cli::run(&["stop", "-t", &grace.as_secs().to_string(), container_id]).await.map(|_| ())
    }

    async fn remove(&self, container_id: &str, force: bool) -> Result<(), SandboxError> {
        let mut args = vec!["rm"];
        if force {
            args.push("-f");
        }
        args.push(container_id);
        docker_cli::run(&args).await.map(|_| ())
    }
}
