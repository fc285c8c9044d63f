// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mission_core::{FakeClock, Job, JobPayload};
use mission_sandbox::test_support::FakeContainerHost;
use mission_store::InMemoryStore;
use std::sync::Arc;

fn controller() -> (Controller<FakeClock>, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let sandbox = Arc::new(SandboxDriver::new(Arc::new(FakeContainerHost::new())));
    let clock = FakeClock::new();
    (Controller::new(store.clone(), sandbox, clock), store)
}

#[tokio::test]
async fn a_mission_with_no_repository_runs_to_completion() {
    let (controller, store) = controller();

    let mission_id = MissionId::new();
    let mission = Mission::new(mission_id, "proj-1", "scaffold a hello world service");
    store.put_mission(mission, 0).await.unwrap();

    let mut job = Job::new(JobId::new(), "proj-1", JobPayload::default());
    job.mission_id = Some(mission_id);
    let job_id = job.id;
    store.put_job(job, 0).await.unwrap();

    // Pre-seed the approvals a human reviewer would send, so the run drives
    // straight through without a concurrent approval task.
    store.push_control_patch(&mission_id, ControlPatch::Plan(PlanAction::Approve)).await.unwrap();
    store.push_control_patch(&mission_id, ControlPatch::Review(ReviewAction::Approve)).await.unwrap();

    controller.run_job(&job_id).await.unwrap();

    let mission = store.get_mission(mission_id.as_str()).await.unwrap();
    assert_eq!(mission.status, MissionStatus::Completed);
    assert!(mission.result_summary.is_some());
    assert!(mission.finished_at_ms.is_some());

    let job = store.get_job(job_id.as_str()).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.result.is_some());

    let steps = store.list_steps(&mission_id).await.unwrap();
    assert!(!steps.is_empty());
    assert!(steps.iter().all(|s| s.status == StepStatus::Done));
}

#[tokio::test]
async fn a_rejected_plan_fails_the_mission() {
    let (controller, store) = controller();

    let mission_id = MissionId::new();
    let mission = Mission::new(mission_id, "proj-1", "scaffold a hello world service");
    store.put_mission(mission, 0).await.unwrap();

    let mut job = Job::new(JobId::new(), "proj-1", JobPayload::default());
    job.mission_id = Some(mission_id);
    let job_id = job.id;
    store.put_job(job, 0).await.unwrap();

    store.push_control_patch(&mission_id, ControlPatch::Plan(PlanAction::Reject)).await.unwrap();

    controller.run_job(&job_id).await.unwrap();

    let mission = store.get_mission(mission_id.as_str()).await.unwrap();
    assert_eq!(mission.status, MissionStatus::Failed);
    assert!(mission.fail_reason.is_some());

    let job = store.get_job(job_id.as_str()).await.unwrap();
    assert_eq!(job.status, JobStatus::Failed);
}
