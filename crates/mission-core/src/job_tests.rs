// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn mission_status_projects_onto_job_status() {
    assert_eq!(JobStatus::from_mission_status(MissionStatus::Queued), JobStatus::Running);
    assert_eq!(JobStatus::from_mission_status(MissionStatus::Paused), JobStatus::WaitingReview);
    assert_eq!(JobStatus::from_mission_status(MissionStatus::WaitingInput), JobStatus::WaitingReview);
    assert_eq!(
        JobStatus::from_mission_status(MissionStatus::WaitingPlanApproval),
        JobStatus::WaitingReview
    );
    assert_eq!(
        JobStatus::from_mission_status(MissionStatus::WaitingReview),
        JobStatus::WaitingReview
    );
    assert_eq!(JobStatus::from_mission_status(MissionStatus::Completed), JobStatus::Completed);
    assert_eq!(JobStatus::from_mission_status(MissionStatus::Failed), JobStatus::Failed);
}

#[test]
fn sync_to_mission_sets_finished_at_once() {
    let mut job = Job::new(JobId::new(), "proj-1", JobPayload::default());
    job.sync_to_mission(MissionStatus::Executing, 10);
    assert_eq!(job.status, JobStatus::Running);
    assert!(job.finished_at_ms.is_none());

    job.sync_to_mission(MissionStatus::Completed, 500);
    assert_eq!(job.finished_at_ms, Some(500));

    // a later sync must not move finished_at_ms
    job.sync_to_mission(MissionStatus::Completed, 900);
    assert_eq!(job.finished_at_ms, Some(500));
}

#[test]
fn status_serializes_to_snake_case() {
    assert_eq!(serde_json::to_string(&JobStatus::WaitingReview).unwrap(), "\"waiting_review\"");
}
