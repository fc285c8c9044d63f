// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin wrapper over the `docker` CLI binary. No docker-API crate is used;
//! every operation shells out, matching the teacher's own container adapter.

use crate::error::SandboxError;
use std::process::Stdio;
use tokio::process::Command;

fn socket_path() -> String {
    std::env::var("DOCKER_SOCKET_PATH").unwrap_or_else(|_| "/var/run/docker.sock".to_string())
}

fn docker_command() -> Command {
    let mut cmd = Command::new("docker");
    cmd.env("DOCKER_HOST", format!("unix://{}", socket_path()));
    cmd.stdin(Stdio::null());
    cmd
}

/// Run `docker <args>` to completion and return trimmed stdout.
pub async fn run(args: &[&str]) -> Result<String, SandboxError> {
    let output = docker_command()
        .args(args)
        .output()
        .await
        .map_err(|e| SandboxError::DockerExec(e.to_string()))?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(SandboxError::DockerCommand {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// `docker exec <container> <shell> -lc <cmd>`, returning the full
/// stdout/stderr/exit-code triple rather than failing on non-zero exit —
/// command failure is data the step executor decides how to handle
/// (spec §4.1 "Exec errors ... do NOT kill the mission").
pub async fn exec(
    container_id: &str,
    shell: &str,
    cmd: &str,
    workdir: Option<&str>,
) -> Result<(String, String, i32), SandboxError> {
    let mut args: Vec<String> = vec!["exec".to_string()];
    if let Some(wd) = workdir {
        args.push("-w".to_string());
        args.push(wd.to_string());
    }
    args.push(container_id.to_string());
    args.push(shell.to_string());
    args.push("-lc".to_string());
    args.push(cmd.to_string());

    let output = docker_command()
        .args(args.iter().map(String::as_str))
        .output()
        .await
        .map_err(|e| SandboxError::DockerExec(e.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);
    Ok((stdout, stderr, exit_code))
}
