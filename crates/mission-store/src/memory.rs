// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory `Store` (spec §4.6): parking_lot-guarded maps keyed by id,
//! looked up by id-or-prefix — grounded on the teacher's
//! `MaterializedState` (`storage/state/mod.rs`). Used both as the default
//! local adapter and as `mission-engine`'s test double.

use crate::control::ControlPatch;
use crate::error::StoreError;
use crate::helpers::find_by_prefix;
use crate::store::{job_key, mission_key, settings_key, step_key, Store};
use async_trait::async_trait;
use mission_core::{Job, Mission, MissionId, MissionLog, MissionStep, Settings, StepStatus};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

#[derive(Default)]
struct State {
    missions: HashMap<String, Mission>,
    steps: HashMap<String, MissionStep>,
    logs: Vec<MissionLog>,
    jobs: HashMap<String, Job>,
    settings: HashMap<String, Settings>,
    control_patches: HashMap<String, VecDeque<ControlPatch>>,
    updated_at: HashMap<String, u64>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn get_mission(&self, id: &str) -> Result<Mission, StoreError> {
        let state = self.state.lock();
        find_by_prefix(&state.missions, id, "mission").map(Clone::clone)
    }

    async fn put_mission(&self, mission: Mission, now_ms: u64) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        let key = mission_key(&mission.id);
        state.missions.insert(mission.id.to_string(), mission);
        state.updated_at.insert(key, now_ms);
        Ok(())
    }

    async fn list_steps(&self, mission_id: &MissionId) -> Result<Vec<MissionStep>, StoreError> {
        let state = self.state.lock();
        let mut steps: Vec<MissionStep> = state.steps.values().filter(|s| s.mission_id == *mission_id).cloned().collect();
        steps.sort_by_key(|s| s.order_index);
        Ok(steps)
    }

    async fn put_step(&self, step: MissionStep, now_ms: u64) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        let key = step_key(&step.id);
        state.steps.insert(step.id.to_string(), step);
        state.updated_at.insert(key, now_ms);
        Ok(())
    }

    async fn delete_pending_steps(&self, mission_id: &MissionId) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.steps.retain(|_, step| !(step.mission_id == *mission_id && step.status == StepStatus::Pending));
        Ok(())
    }

    async fn append_log(&self, log: MissionLog) -> Result<(), StoreError> {
        self.state.lock().logs.push(log);
        Ok(())
    }

    async fn list_logs(&self, mission_id: &MissionId) -> Result<Vec<MissionLog>, StoreError> {
        Ok(self.state.lock().logs.iter().filter(|l| l.mission_id == *mission_id).cloned().collect())
    }

    async fn get_job(&self, id: &str) -> Result<Job, StoreError> {
        let state = self.state.lock();
        find_by_prefix(&state.jobs, id, "job").map(Clone::clone)
    }

    async fn get_job_by_mission(&self, mission_id: &MissionId) -> Result<Option<Job>, StoreError> {
        Ok(self.state.lock().jobs.values().find(|j| j.mission_id.as_ref() == Some(mission_id)).cloned())
    }

    async fn put_job(&self, job: Job, now_ms: u64) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        let key = job_key(&job.id);
        state.jobs.insert(job.id.to_string(), job);
        state.updated_at.insert(key, now_ms);
        Ok(())
    }

    async fn get_settings(&self, project_id: &str) -> Result<Settings, StoreError> {
        Ok(self.state.lock().settings.get(project_id).cloned().unwrap_or_default())
    }

    async fn put_settings(&self, project_id: &str, settings: Settings, now_ms: u64) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        let key = settings_key(project_id);
        state.settings.insert(project_id.to_string(), settings);
        state.updated_at.insert(key, now_ms);
        Ok(())
    }

    async fn push_control_patch(&self, mission_id: &MissionId, patch: ControlPatch) -> Result<(), StoreError> {
        self.state.lock().control_patches.entry(mission_id.to_string()).or_default().push_back(patch);
        Ok(())
    }

    async fn poll_control_patch(&self, mission_id: &MissionId) -> Result<Option<ControlPatch>, StoreError> {
        Ok(self.state.lock().control_patches.get_mut(mission_id.as_str()).and_then(VecDeque::pop_front))
    }

    async fn updated_at(&self, key: &str) -> Option<u64> {
        self.state.lock().updated_at.get(key).copied()
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
