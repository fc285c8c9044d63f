// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{FakeContainerHost, ScriptedExec};
use mission_core::JobId;
use serial_test::serial;
use tempfile::tempdir;

fn settings_with_root(root: &std::path::Path) -> Settings {
    let mut settings = Settings::default();
    settings.execution.sandbox_root = Some(root.to_string_lossy().to_string());
    settings
}

#[tokio::test]
#[serial(sandbox_root_env)]
async fn spawn_creates_the_repo_directory() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let tmp = tempdir().unwrap();
    let host = Arc::new(FakeContainerHost::new());
    let driver = SandboxDriver::new(host);
    let mission_id = MissionId::new();
    let instance = driver
        .spawn(&mission_id, "proj-1", &JobId::new(), &settings_with_root(tmp.path()))
        .await
        .unwrap();
    assert!(instance.host_repo_path.exists());
    assert!(instance.host_repo_path.ends_with("repo"));
}

#[tokio::test]
#[serial(sandbox_root_env)]
async fn init_detects_bash_and_runs_git_init() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let tmp = tempdir().unwrap();
    let host = Arc::new(FakeContainerHost::new());
    host.script("command -v bash", ScriptedExec::ok("/bin/bash\n"));
    let driver = SandboxDriver::new(host);
    let mission_id = MissionId::new();
    let mut instance = driver
        .spawn(&mission_id, "proj-1", &JobId::new(), &settings_with_root(tmp.path()))
        .await
        .unwrap();
    driver.init(&mut instance).await.unwrap();
    assert_eq!(instance.shell, "bash");
}

#[tokio::test]
#[serial(sandbox_root_env)]
async fn init_falls_back_to_sh_when_bash_is_absent() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let tmp = tempdir().unwrap();
    let host = Arc::new(FakeContainerHost::new());
    host.script("command -v bash", ScriptedExec::failing("", 1));
    let driver = SandboxDriver::new(host);
    let mission_id = MissionId::new();
    let mut instance = driver
        .spawn(&mission_id, "proj-1", &JobId::new(), &settings_with_root(tmp.path()))
        .await
        .unwrap();
    driver.init(&mut instance).await.unwrap();
    assert_eq!(instance.shell, "sh");
}

#[tokio::test]
#[serial(sandbox_root_env)]
async fn teardown_without_persist_deletes_the_workspace() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let tmp = tempdir().unwrap();
    let host = Arc::new(FakeContainerHost::new());
    let driver = SandboxDriver::new(host);
    let mission_id = MissionId::new();
    let instance = driver
        .spawn(&mission_id, "proj-1", &JobId::new(), &settings_with_root(tmp.path()))
        .await
        .unwrap();
    let workspace_root = instance.host_repo_path.parent().unwrap().to_path_buf();
    assert!(workspace_root.exists());
    driver.teardown(&instance).await.unwrap();
    assert!(!workspace_root.exists());
}

#[tokio::test]
#[serial(sandbox_root_env)]
async fn teardown_with_persist_keeps_the_workspace() {
    std::env::remove_var("OPENJULES_SANDBOX_ROOT");
    let tmp = tempdir().unwrap();
    let host = Arc::new(FakeContainerHost::new());
    let driver = SandboxDriver::new(host);
    let mission_id = MissionId::new();
    let mut settings = settings_with_root(tmp.path());
    settings.execution.persist_sandbox = true;
    let instance = driver.spawn(&mission_id, "proj-1", &JobId::new(), &settings).await.unwrap();
    let workspace_root = instance.host_repo_path.parent().unwrap().to_path_buf();
    driver.teardown(&instance).await.unwrap();
    assert!(workspace_root.exists());
}
