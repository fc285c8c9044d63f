// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mission_core::{MissionId, StepId};
use mission_sandbox::test_support::{FakeContainerHost, ScriptedExec};
use std::sync::Arc;

fn instance(host: Arc<FakeContainerHost>) -> Instance {
    Instance::new("inst".to_string(), "container-1".to_string(), std::env::temp_dir(), "bash".to_string(), host)
}

fn step(command: &str) -> MissionStep {
    MissionStep::new(StepId::new(), MissionId::new(), 0, command)
}

#[tokio::test]
async fn a_successful_command_marks_the_step_done() {
    let host = Arc::new(FakeContainerHost::new());
    host.script("echo hi", ScriptedExec::ok("hi\n"));
    let instance = instance(host);
    let settings = CommandGuardSettings::default();
    let executor = StepExecutor::new(&settings, None);

    let mut s = step("echo hi");
    executor.execute(&instance, &mut s, || 1_000).await.unwrap();

    assert_eq!(s.status, StepStatus::Done);
    assert_eq!(s.exit_code, Some(0));
    assert_eq!(s.stdout_tail, "hi\n");
}

#[tokio::test]
async fn a_destructive_command_is_blocked_before_it_runs() {
    let host = Arc::new(FakeContainerHost::new());
    let instance = instance(host);
    let settings = CommandGuardSettings::default();
    let executor = StepExecutor::new(&settings, None);

    let mut s = step("rm -rf /");
    executor.execute(&instance, &mut s, || 1_000).await.unwrap();

    assert_eq!(s.status, StepStatus::Blocked);
    assert_eq!(s.exit_code, Some(-2));
    assert!(s.result_summary.as_deref().unwrap_or_default().contains("rm-rf-root"));
}

#[tokio::test]
async fn a_hanging_command_is_auto_promoted_to_background() {
    let host = Arc::new(FakeContainerHost::new());
    host.script("npm start", ScriptedExec::ok("server listening on 3000\n"));
    let instance = instance(host);
    let settings = CommandGuardSettings::default();
    let executor = StepExecutor::new(&settings, None);

    let mut s = step("npm start");
    executor.execute(&instance, &mut s, || 1_000).await.unwrap();

    assert!(s.background);
    assert_eq!(s.status, StepStatus::Done);
}

#[tokio::test]
async fn a_non_retryable_failure_is_recorded_as_failed() {
    let host = Arc::new(FakeContainerHost::new());
    host.script("false", ScriptedExec::failing("boom", 1));
    let instance = instance(host);
    let settings = CommandGuardSettings::default();
    let executor = StepExecutor::new(&settings, None);

    let mut s = step("false");
    executor.execute(&instance, &mut s, || 1_000).await.unwrap();

    assert_eq!(s.status, StepStatus::Failed);
    assert_eq!(s.exit_code, Some(1));
    assert_eq!(s.retry_count, 0);
}

#[tokio::test(start_paused = true)]
async fn a_retryable_failure_retries_up_to_max_retries() {
    let host = Arc::new(FakeContainerHost::new());
    host.script("flaky", ScriptedExec::failing("still broken", 1));
    let instance = instance(host);
    let settings = CommandGuardSettings::default();
    let executor = StepExecutor::new(&settings, None);

    let mut s = step("flaky");
    s.retryable = true;
    s.max_retries = 1;
    executor.execute(&instance, &mut s, || 1_000).await.unwrap();

    assert_eq!(s.status, StepStatus::Failed);
    assert_eq!(s.retry_count, 1);
}
