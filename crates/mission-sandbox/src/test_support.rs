// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`ContainerHost`] double, for exercising [`crate::Instance`]
//! and the mission engine without a real Docker daemon.

use crate::container_host::{ContainerHost, ContainerSpec, ExecOutput};
use crate::error::SandboxError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScriptedExec {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ScriptedExec {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { stdout: stdout.into(), stderr: String::new(), exit_code: 0 }
    }

    pub fn failing(stderr: impl Into<String>, exit_code: i32) -> Self {
        Self { stdout: String::new(), stderr: stderr.into(), exit_code }
    }
}

#[derive(Default)]
struct FakeState {
    /// keyed by the exact command string
    scripted: HashMap<String, ScriptedExec>,
    /// in-container file contents, keyed by path (used for bg logs/pid files)
    files: HashMap<String, String>,
    removed: Vec<String>,
}

/// A [`ContainerHost`] that never shells out, driven entirely by
/// pre-scripted responses keyed by command string.
#[derive(Default)]
pub struct FakeContainerHost {
    state: Mutex<FakeState>,
}

impl FakeContainerHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, cmd: impl Into<String>, response: ScriptedExec) {
        self.state.lock().scripted.insert(cmd.into(), response);
    }

    /// Pre-seed the contents of an in-container file (e.g. a background
    /// log path), so a test can drive readiness deterministically.
    pub fn seed_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.state.lock().files.insert(path.into(), content.into());
    }

    pub fn set_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.state.lock().files.insert(path.into(), content.into());
    }

    pub fn removed_containers(&self) -> Vec<String> {
        self.state.lock().removed.clone()
    }

    /// Simulate every in-flight background process dying: drop every
    /// `*.pid` file so the next liveness poll reports it gone.
    pub fn kill_all_pids(&self) {
        self.state.lock().files.retain(|path, _| !path.ends_with(".pid"));
    }
}

#[async_trait]
impl ContainerHost for FakeContainerHost {
    async fn image_exists(&self, _image: &str) -> Result<bool, SandboxError> {
        Ok(true)
    }

    async fn pull_image(&self, _image: &str) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn create_and_start(&self, spec: &ContainerSpec) -> Result<String, SandboxError> {
        Ok(format!("fake-{}", spec.name))
    }

    async fn exec(
        &self,
        _container_id: &str,
        _shell: &str,
        cmd: &str,
        _workdir: Option<&str>,
    ) -> Result<ExecOutput, SandboxError> {
        let scripted = self.state.lock().scripted.get(cmd).cloned();
        match scripted {
            Some(s) => Ok(ExecOutput { stdout: s.stdout, stderr: s.stderr, exit_code: s.exit_code }),
            None => Ok(ExecOutput { stdout: String::new(), stderr: String::new(), exit_code: 0 }),
        }
    }

    async fn exec_detached(
        &self,
        _container_id: &str,
        _shell: &str,
        cmd: &str,
        log_path: &str,
    ) -> Result<(), SandboxError> {
        let mut state = self.state.lock();
        let content = state.scripted.get(cmd).map(|s| s.stdout.clone()).unwrap_or_default();
        state.files.entry(log_path.to_string()).or_insert(content);
        state.files.entry(format!("{log_path}.pid")).or_insert_with(|| "1".to_string());
        Ok(())
    }

    async fn read_file(&self, _container_id: &str, path: &str) -> Result<String, SandboxError> {
        self.state.lock().files.get(path).cloned().ok_or_else(|| SandboxError::UnknownInstance(path.to_string()))
    }

    async fn pid_alive(&self, _container_id: &str, pid_file: &str) -> Result<bool, SandboxError> {
        Ok(self.state.lock().files.contains_key(pid_file))
    }

    async fn stop(&self, _container_id: &str, _grace: Duration) -> Result<(), SandboxError> {
        Ok(())
    }

    async fn remove(&self, container_id: &str, _force: bool) -> Result<(), SandboxError> {
        self.state.lock().removed.push(container_id.to_string());
        Ok(())
    }
}
