// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs: the external trigger record a caller polls, distinct from the
//! mission it drives (spec §3, §6).

use crate::define_id;
use crate::mission::{MissionId, MissionStatus};
use serde::{Deserialize, Serialize};

define_id! {
    /// Unique identifier for a job.
    pub struct JobId("job-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    WaitingReview,
    Completed,
    Failed,
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        WaitingReview => "waiting_review",
        Completed => "completed",
        Failed => "failed",
    }
}

impl JobStatus {
    /// Project a mission's status onto the job status alphabet (spec §6).
    ///
    /// A mission that hasn't been created yet (no `mission_id`) stays
    /// `pending`; everything else is a pure function of `MissionStatus`.
    pub fn from_mission_status(status: MissionStatus) -> Self {
        match status {
            MissionStatus::Queued | MissionStatus::Planning | MissionStatus::Executing | MissionStatus::Validating => JobStatus::Running,
            MissionStatus::WaitingReview | MissionStatus::WaitingPlanApproval | MissionStatus::Paused | MissionStatus::WaitingInput => JobStatus::WaitingReview,
            MissionStatus::Completed => JobStatus::Completed,
            MissionStatus::Failed => JobStatus::Failed,
        }
    }
}

/// Caller-supplied payload describing what to work on (spec §3, §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPayload {
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

/// The record an external caller creates and polls (spec §3).
///
/// A job drives at most one mission at a time, and the runtime enforces
/// exactly one running job per mission (spec §5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub project_id: String,
    #[serde(default)]
    pub mission_id: Option<MissionId>,
    pub status: JobStatus,
    #[serde(default)]
    pub payload: JobPayload,
    #[serde(default)]
    pub started_at_ms: Option<u64>,
    #[serde(default)]
    pub heartbeat_at_ms: Option<u64>,
    #[serde(default)]
    pub finished_at_ms: Option<u64>,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl Job {
    pub fn new(id: JobId, project_id: impl Into<String>, payload: JobPayload) -> Self {
        Self {
            id,
            project_id: project_id.into(),
            mission_id: None,
            status: JobStatus::Pending,
            payload,
            started_at_ms: None,
            heartbeat_at_ms: None,
            finished_at_ms: None,
            last_error: None,
            result: None,
        }
    }

    /// Pull the job's status up to date with its mission, per the
    /// projection table in spec §6.
    pub fn sync_to_mission(&mut self, mission_status: MissionStatus, now_ms: u64) {
        self.status = JobStatus::from_mission_status(mission_status);
        if matches!(self.status, JobStatus::Completed | JobStatus::Failed) && self.finished_at_ms.is_none()
        {
            self.finished_at_ms = Some(now_ms);
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
