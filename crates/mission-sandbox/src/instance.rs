// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A live per-mission sandbox: a running container plus its host-side
//! workspace mount (spec §4.1).

use crate::container_host::ContainerHost;
use crate::error::SandboxError;
use crate::log_sink::{LogSink, NullLogSink};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::{self, Instant};

/// Default background-command readiness timeout (spec §4.1 step 6).
pub const DEFAULT_BACKGROUND_TIMEOUT_MS: u64 = 120_000;

const BACKGROUND_POLL_INTERVAL: Duration = Duration::from_millis(500);
const PID_CHECK_INTERVAL: Duration = Duration::from_secs(2);
const DIED_TAIL_CHARS: usize = 2_000;

pub struct Instance {
    pub id: String,
    pub container_id: String,
    pub host_repo_path: PathBuf,
    pub shell: String,
    host: Arc<dyn ContainerHost>,
    sink: Mutex<Arc<dyn LogSink>>,
}

impl Instance {
    pub fn new(id: String, container_id: String, host_repo_path: PathBuf, shell: String, host: Arc<dyn ContainerHost>) -> Self {
        Self { id, container_id, host_repo_path, shell, host, sink: Mutex::new(Arc::new(NullLogSink)) }
    }

    /// Register a single sink; subsequent Command/BackgroundCommand calls
    /// forward chunks to it (spec §4.1 `Instance.StreamLogs`).
    pub fn stream_logs(&self, sink: Arc<dyn LogSink>) {
        *self.sink.lock().expect("log sink mutex poisoned") = sink;
    }

    fn emit(&self, stream: &str, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.sink.lock().expect("log sink mutex poisoned").on_chunk(&self.id, stream, chunk);
    }

    /// Translate a host-relative workdir into its in-container path under
    /// `/workspace` (spec §4.1 `Instance.Command`).
    fn container_workdir(&self, workdir: Option<&str>) -> Option<String> {
        workdir.map(|w| {
            let trimmed = w.trim_start_matches('/');
            if trimmed.is_empty() {
                "/workspace".to_string()
            } else {
                format!("/workspace/{trimmed}")
            }
        })
    }

    /// Exec a foreground command with a timeout (spec §4.1 `Instance.Command`).
    pub async fn command(
        &self,
        cmd: &str,
        workdir: Option<&str>,
        timeout_ms: u64,
    ) -> Result<(String, String, i32), SandboxError> {
        let workdir = self.container_workdir(workdir);
        let fut = self.host.exec(&self.container_id, &self.shell, cmd, workdir.as_deref());
        let result = match time::timeout(Duration::from_millis(timeout_ms), fut).await {
            Ok(r) => r,
            Err(_) => {
                self.emit("stderr", "command timed out\n");
                return Ok((String::new(), "command timed out".to_string(), -1));
            }
        };
        match result {
            Ok(out) => {
                self.emit("stdout", &out.stdout);
                self.emit("stderr", &out.stderr);
                Ok((out.stdout, out.stderr, out.exit_code))
            }
            // exec errors are reported via stderr/exitCode=-1, not bubbled up
            // (spec §4.1 "Exec errors ... do NOT kill the mission").
            Err(e) => {
                let msg = e.to_string();
                self.emit("stderr", &msg);
                Ok((String::new(), msg, -1))
            }
        }
    }

    /// The background-command protocol (spec §4.1 `Instance.BackgroundCommand`,
    /// steps 1-6): launch detached, then race pid-liveness, pattern match,
    /// and an overall timeout.
    pub async fn background_command(
        &self,
        cmd: &str,
        ready_pattern: &str,
        timeout_ms: Option<u64>,
    ) -> Result<(String, String, i32), SandboxError> {
        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_BACKGROUND_TIMEOUT_MS);
        let pattern = Regex::new(&format!("(?i){ready_pattern}"))
            .map_err(|e| SandboxError::DockerExec(format!("invalid readyPattern: {e}")))?;

        let rand = nanoid::nanoid!(8);
        let log_path = format!("/tmp/bg-{rand}.log");
        let pid_path = format!("{log_path}.pid");

        self.host.exec_detached(&self.container_id, &self.shell, cmd, &log_path).await?;

        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        let mut last_pid_check = Instant::now();
        let mut buffer = String::new();

        loop {
            if Instant::now() >= deadline {
                return Err(SandboxError::BackgroundReadyTimeout(timeout_ms));
            }

            if let Ok(contents) = self.host.read_file(&self.container_id, &log_path).await {
                if contents.len() > buffer.len() {
                    self.emit("stdout", &contents[buffer.len()..]);
                }
                buffer = contents;
            }

            if pattern.is_match(&buffer) {
                return Ok((buffer, String::new(), 0));
            }

            if last_pid_check.elapsed() >= PID_CHECK_INTERVAL {
                last_pid_check = Instant::now();
                match self.host.pid_alive(&self.container_id, &pid_path).await {
                    Ok(true) => {}
                    Ok(false) => {
                        let tail = tail_chars(&buffer, DIED_TAIL_CHARS);
                        return Err(SandboxError::BackgroundDied { tail });
                    }
                    Err(_) => {}
                }
            }

            time::sleep(BACKGROUND_POLL_INTERVAL).await;
        }
    }

    pub async fn write_file(&self, relative_path: &str, content: &str) -> Result<(), SandboxError> {
        if !crate::paths::is_safe_relative_path(relative_path) {
            return Err(SandboxError::UnknownInstance(format!("unsafe path: {relative_path}")));
        }
        let path = self.host_repo_path.join(relative_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub async fn read_file(&self, relative_path: &str) -> Result<String, SandboxError> {
        if !crate::paths::is_safe_relative_path(relative_path) {
            return Err(SandboxError::UnknownInstance(format!("unsafe path: {relative_path}")));
        }
        let contents = tokio::fs::read_to_string(self.host_repo_path.join(relative_path)).await?;
        Ok(contents)
    }

    /// `git diff --no-color -- .` against the host-side mount (spec §4.1
    /// `Instance.CreatePatch`).
    pub async fn create_patch(&self) -> Result<String, SandboxError> {
        let output = TokioCommand::new("git")
            .args(["diff", "--no-color", "--", "."])
            .current_dir(&self.host_repo_path)
            .stdin(Stdio::null())
            .output()
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn tail_chars(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        return s.to_string();
    }
    s.chars().rev().take(n).collect::<Vec<_>>().into_iter().rev().collect()
}

pub fn repo_subdir(root: &Path) -> PathBuf {
    root.join("repo")
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
