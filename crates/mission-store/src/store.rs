// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Store` adapter (spec §4.6): typed reads/writes for missions, steps,
//! logs, jobs and settings. Every write bumps `updated_at`; the caller
//! supplies `now_ms` so the store stays off the wall clock, matching the
//! `Clock` abstraction used everywhere else.

use crate::control::ControlPatch;
use crate::error::StoreError;
use async_trait::async_trait;
use mission_core::{Job, JobId, Mission, MissionId, MissionLog, MissionStep, Settings, StepId};

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_mission(&self, id: &str) -> Result<Mission, StoreError>;
    async fn put_mission(&self, mission: Mission, now_ms: u64) -> Result<(), StoreError>;

    async fn list_steps(&self, mission_id: &MissionId) -> Result<Vec<MissionStep>, StoreError>;
    async fn put_step(&self, step: MissionStep, now_ms: u64) -> Result<(), StoreError>;
    /// Deletes every `PENDING` step for the mission (replanning, spec §5/§8);
    /// `DONE`/`FAILED` rows are untouched.
    async fn delete_pending_steps(&self, mission_id: &MissionId) -> Result<(), StoreError>;

    async fn append_log(&self, log: MissionLog) -> Result<(), StoreError>;
    async fn list_logs(&self, mission_id: &MissionId) -> Result<Vec<MissionLog>, StoreError>;

    async fn get_job(&self, id: &str) -> Result<Job, StoreError>;
    async fn get_job_by_mission(&self, mission_id: &MissionId) -> Result<Option<Job>, StoreError>;
    async fn put_job(&self, job: Job, now_ms: u64) -> Result<(), StoreError>;

    /// Idempotent: a missing project yields `Settings::default()`.
    async fn get_settings(&self, project_id: &str) -> Result<Settings, StoreError>;
    async fn put_settings(&self, project_id: &str, settings: Settings, now_ms: u64) -> Result<(), StoreError>;

    /// Queues an out-of-band control action a CRUD layer would otherwise
    /// write directly onto a Mission row.
    async fn push_control_patch(&self, mission_id: &MissionId, patch: ControlPatch) -> Result<(), StoreError>;
    /// Pops the oldest queued patch for the mission, if any (spec §5: the
    /// controller observes control actions only between steps).
    async fn poll_control_patch(&self, mission_id: &MissionId) -> Result<Option<ControlPatch>, StoreError>;

    /// The `updated_at_ms` recorded for the given store-internal key, used
    /// by tests to assert every write bumps it. Keys are `"mission:<id>"`,
    /// `"step:<id>"`, `"job:<id>"`, `"settings:<project_id>"`.
    async fn updated_at(&self, key: &str) -> Option<u64>;
}

pub(crate) fn job_key(id: &JobId) -> String {
    format!("job:{id}")
}

pub(crate) fn mission_key(id: &MissionId) -> String {
    format!("mission:{id}")
}

pub(crate) fn step_key(id: &StepId) -> String {
    format!("step:{id}")
}

pub(crate) fn settings_key(project_id: &str) -> String {
    format!("settings:{project_id}")
}
