// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Mission Controller (spec §4.4): one state-machine loop per running
//! Job, grounded on the teacher's `daemon::engine::runtime` outer loop but
//! calling `mission-store::Store` directly rather than a WAL-backed engine.

use crate::error::EngineError;
use crate::executor::StepExecutor;
use crate::guard_adapter::LlmAiReviewer;
use mission_core::{
    Clock, JobId, JobStatus, LogId, LogKind, Mission, MissionId, MissionLog, MissionStatus,
    MissionStep, StepId, StepStatus,
};
use mission_guard::AiReviewer;
use mission_llm::{request_plan, request_step_command, resolve_provider, PlanContext, Role, StepCommandContext};
use mission_sandbox::{Instance, SandboxDriver};
use mission_store::{ControlAction, ControlPatch, PlanAction, ReviewAction, Store};
use std::sync::Arc;
use std::time::Duration;

const WAIT_INTERVAL: Duration = Duration::from_secs(2);

/// Drives a single Job's mission through the state machine in spec.md §4.4
/// until it reaches a terminal status.
pub struct Controller<C: Clock> {
    store: Arc<dyn Store>,
    sandbox: Arc<SandboxDriver>,
    clock: C,
}

impl<C: Clock> Controller<C> {
    pub fn new(store: Arc<dyn Store>, sandbox: Arc<SandboxDriver>, clock: C) -> Self {
        Self { store, sandbox, clock }
    }

    /// Entry point for the per-Job task spawned by `mission-runtime`.
    pub async fn run_job(&self, job_id: &JobId) -> Result<(), EngineError> {
        let job = self.store.get_job(job_id.as_str()).await?;
        let mission_id = job.mission_id.ok_or(EngineError::MissingMissionId)?;
        self.drive(&mission_id, job_id).await
    }

    async fn drive(&self, mission_id: &MissionId, job_id: &JobId) -> Result<(), EngineError> {
        let mut instance: Option<Instance> = None;
        let outcome = self.drive_inner(mission_id, job_id, &mut instance).await;

        // Spec §5: every exit path, normal or error, tears down the sandbox.
        if let Some(inst) = instance.take() {
            if let Err(e) = self.sandbox.teardown(&inst).await {
                tracing::warn!(error = %e, %mission_id, "sandbox teardown failed");
            }
        }

        if let Err(err) = &outcome {
            tracing::error!(error = %err, %mission_id, "mission aborted");
            self.fail_mission(mission_id, err.to_string()).await?;
        }
        self.project_job(mission_id, job_id).await?;
        outcome
    }

    async fn drive_inner(&self, mission_id: &MissionId, job_id: &JobId, instance: &mut Option<Instance>) -> Result<(), EngineError> {
        loop {
            let mission = self.store.get_mission(mission_id.as_str()).await?;
            if mission.status.is_terminal() {
                return Ok(());
            }
            self.project_job(mission_id, job_id).await?;

            match mission.status {
                MissionStatus::Queued => self.begin(mission_id).await?,
                MissionStatus::Planning => self.plan(mission_id, &mission).await?,
                MissionStatus::WaitingPlanApproval => {
                    if !self.handle_control_patch(mission_id).await? {
                        self.wait().await;
                    }
                }
                MissionStatus::Executing => {
                    if self.handle_control_patch(mission_id).await? {
                        continue;
                    }
                    if instance.is_none() {
                        *instance = Some(self.provision(mission_id, job_id, &mission).await?);
                    }
                    let Some(inst) = instance.as_ref() else {
                        return Err(EngineError::NoSandboxInstance);
                    };
                    if !self.execute_next_step(mission_id, inst).await? {
                        self.wait().await;
                    }
                }
                MissionStatus::Paused | MissionStatus::WaitingInput => {
                    if !self.handle_control_patch(mission_id).await? {
                        self.wait().await;
                    }
                }
                MissionStatus::Validating => {
                    let inst = instance.as_ref().ok_or(EngineError::NoSandboxInstance)?;
                    self.validate(mission_id, job_id, inst).await?;
                }
                MissionStatus::WaitingReview => {
                    if !self.handle_control_patch(mission_id).await? {
                        self.wait().await;
                    }
                }
                MissionStatus::Completed | MissionStatus::Failed => return Ok(()),
            }
        }
    }

    async fn wait(&self) {
        tokio::time::sleep(WAIT_INTERVAL).await;
    }

    async fn begin(&self, mission_id: &MissionId) -> Result<(), EngineError> {
        let mut mission = self.store.get_mission(mission_id.as_str()).await?;
        let now = self.clock.epoch_ms();
        mission.transition(MissionStatus::Planning, now)?;
        self.store.put_mission(mission, now).await?;
        Ok(())
    }

    /// Runs the `planner` role and replaces the mission's plan (spec §4.4
    /// `PLANNING -> WAITING_PLAN_APPROVAL`, §5 replanning ordering guarantee:
    /// only `PENDING` steps are ever deleted, new ones append after the
    /// highest existing `order_index`).
    async fn plan(&self, mission_id: &MissionId, mission: &Mission) -> Result<(), EngineError> {
        let settings = self.store.get_settings(&mission.project_id).await?;
        let provider = resolve_provider(Role::Planner, &settings);

        let ctx = PlanContext {
            goal: &mission.goal,
            repo_present: mission.repo_url.is_some(),
            file_tree: None,
            package_json: None,
            readme: None,
            custom_instructions: settings.prompts.planner.content.as_deref(),
        };
        let plan = request_plan(provider.as_ref(), &ctx).await?;

        let now = self.clock.epoch_ms();
        let mut mission = mission.clone();
        mission.plan_reasoning = Some(plan.reasoning.clone());
        mission.ai_provider = Some(plan.provider.clone());
        mission.ai_model = Some(plan.model.clone());
        mission.token_usage.record(&Role::Planner.to_string(), plan.usage);
        mission.transition(MissionStatus::WaitingPlanApproval, now)?;
        self.store.put_mission(mission, now).await?;

        self.store.append_log(MissionLog::new(LogId::new(), *mission_id, LogKind::Thought, plan.reasoning, now)).await?;

        self.store.delete_pending_steps(mission_id).await?;
        let existing = self.store.list_steps(mission_id).await?;
        let mut next_index = existing.iter().map(|s| s.order_index + 1).max().unwrap_or(0);
        for planned in plan.steps {
            let mut step = MissionStep::new(StepId::new(), *mission_id, next_index, String::new());
            step.description = Some(planned.description);
            step.timeout_ms = planned.timeout_ms;
            step.retryable = planned.retryable;
            step.background = planned.background;
            step.ready_pattern = planned.ready_pattern;
            self.store.put_step(step, now).await?;
            next_index += 1;
        }
        Ok(())
    }

    async fn provision(&self, mission_id: &MissionId, job_id: &JobId, mission: &Mission) -> Result<Instance, EngineError> {
        let settings = self.store.get_settings(&mission.project_id).await?;
        let mut instance = self.sandbox.spawn(mission_id, &mission.project_id, job_id, &settings).await?;
        self.sandbox.init(&mut instance).await?;
        Ok(instance)
    }

    /// Runs one `PENDING` step, or transitions to `VALIDATING` if none
    /// remain. Returns whether progress was made (vs. the caller should
    /// sleep before re-polling).
    async fn execute_next_step(&self, mission_id: &MissionId, instance: &Instance) -> Result<bool, EngineError> {
        let mut steps = self.store.list_steps(mission_id).await?;
        let Some(pending_index) = steps.iter().position(|s| s.status == StepStatus::Pending) else {
            let mut mission = self.store.get_mission(mission_id.as_str()).await?;
            let now = self.clock.epoch_ms();
            mission.transition(MissionStatus::Validating, now)?;
            self.store.put_mission(mission, now).await?;
            return Ok(true);
        };

        let mut mission = self.store.get_mission(mission_id.as_str()).await?;
        let settings = self.store.get_settings(&mission.project_id).await?;
        let now = self.clock.epoch_ms();

        let user_hint = mission.latest_user_input.take();
        if let Some(input) = &user_hint {
            self.store.put_mission(mission.clone(), now).await?;
            self.store
                .append_log(MissionLog::new(LogId::new(), *mission_id, LogKind::Thought, format!("user input: {input}"), now))
                .await?;
        }

        let mut step = steps.remove(pending_index);
        let other_steps: Vec<&MissionStep> = steps.iter().collect();

        if step.command.is_empty() {
            let provider = resolve_provider(Role::Coder, &settings);
            let plan_overview = plan_overview(&other_steps, &step);
            let ctx = StepCommandContext {
                goal: &mission.goal,
                step_index: step.order_index as usize,
                total_steps: other_steps.len() + 1,
                plan_overview: &plan_overview,
                previous_output: None,
                file_tree: None,
                package_json: None,
                guard_feedback: None,
                user_hint: user_hint.as_deref(),
                troubleshooter_analysis: None,
            };
            match request_step_command(provider.as_ref(), &ctx).await {
                Ok(command) => {
                    mission.ai_provider = Some(command.provider.clone());
                    mission.ai_model = Some(command.model.clone());
                    mission.token_usage.record(&Role::Coder.to_string(), command.usage);
                    self.store.put_mission(mission.clone(), now).await?;

                    step.command = command.command;
                    step.background = step.background || command.background;
                    if step.ready_pattern.is_none() {
                        step.ready_pattern = command.ready_pattern;
                    }
                }
                Err(e) => {
                    // Spec §7: a coder LLMError doesn't abort the mission, it
                    // falls back to a safety command that fails loudly.
                    tracing::warn!(error = %e, step_id = %step.id, "coder failed to produce a command, using safety fallback");
                    step.command = format!("echo \"Coder could not generate command for: {}\"", step.description.clone().unwrap_or_default());
                }
            }
        }

        let ai_provider = settings.execution.command_guard.ai_review.then(|| resolve_provider(Role::Guard, &settings));
        let ai_reviewer = ai_provider.as_deref().map(LlmAiReviewer::new);
        let reviewer: Option<&dyn AiReviewer> = ai_reviewer.as_ref().map(|r| r as &dyn AiReviewer);

        let executor = StepExecutor::new(&settings.execution.command_guard, reviewer);
        executor.execute(instance, &mut step, || self.clock.epoch_ms()).await?;

        // Logged after execution (spec §4.5 steps 1-3: guard + promotion run
        // before this event), so `background` reflects auto-promotion.
        self.store
            .append_log(
                MissionLog::new(LogId::new(), *mission_id, LogKind::Command, step.command.clone(), now)
                    .for_step(step.id)
                    .with_details(serde_json::json!({
                        "timeoutMs": step.timeout_ms,
                        "retryable": step.retryable,
                        "background": step.background,
                    })),
            )
            .await?;

        let finished_at = self.clock.epoch_ms();
        self.store.put_step(step.clone(), finished_at).await?;

        if step.status == StepStatus::Blocked {
            self.store
                .append_log(
                    MissionLog::new(LogId::new(), *mission_id, LogKind::Error, format!("\u{1F6E1} {}", step.result_summary.clone().unwrap_or_default()), finished_at)
                        .for_step(step.id),
                )
                .await?;
            return Ok(true);
        }

        self.store
            .append_log(
                MissionLog::new(LogId::new(), *mission_id, LogKind::ToolOutput, step.result_summary.clone().unwrap_or_default(), finished_at)
                    .for_step(step.id)
                    .with_details(serde_json::json!({
                        "exitCode": step.exit_code,
                        "durationMs": step.duration_ms,
                        "stdoutTail": step.stdout_tail,
                        "stderrTail": step.stderr_tail,
                    })),
            )
            .await?;

        if step.status == StepStatus::Failed {
            let mut mission = self.store.get_mission(mission_id.as_str()).await?;
            let now = self.clock.epoch_ms();
            mission.fail_reason = Some(format!("Step {} failed.", step.order_index));
            mission.transition(MissionStatus::Failed, now)?;
            self.store.put_mission(mission, now).await?;
        }
        Ok(true)
    }

    async fn validate(&self, mission_id: &MissionId, job_id: &JobId, instance: &Instance) -> Result<(), EngineError> {
        let patch = instance.create_patch().await?;
        let now = self.clock.epoch_ms();

        let mut job = self.store.get_job(job_id.as_str()).await?;
        job.result = Some(serde_json::json!({ "patch": patch }));
        self.store.put_job(job, now).await?;

        let mut mission = self.store.get_mission(mission_id.as_str()).await?;
        mission.transition(MissionStatus::WaitingReview, now)?;
        self.store.put_mission(mission, now).await?;
        Ok(())
    }

    /// Applies at most one queued control-action patch, if any (spec §5:
    /// "a user controlAction is observed only between steps"). Returns
    /// whether a patch was applied.
    async fn handle_control_patch(&self, mission_id: &MissionId) -> Result<bool, EngineError> {
        let Some(patch) = self.store.poll_control_patch(mission_id).await? else {
            return Ok(false);
        };
        let mut mission = self.store.get_mission(mission_id.as_str()).await?;
        let now = self.clock.epoch_ms();

        match patch {
            ControlPatch::Control { action: ControlAction::Input, message } => {
                mission.apply_input_control_action(message.unwrap_or_default());
            }
            ControlPatch::Control { action: ControlAction::Pause, .. } => {
                mission.transition(MissionStatus::Paused, now)?;
            }
            ControlPatch::Control { action: ControlAction::Resume, .. } => {
                mission.transition(MissionStatus::Executing, now)?;
            }
            ControlPatch::Plan(PlanAction::Approve) => {
                mission.transition(MissionStatus::Executing, now)?;
            }
            ControlPatch::Plan(PlanAction::Reject) => {
                mission.fail_reason = Some("plan rejected by reviewer".to_string());
                mission.transition(MissionStatus::Failed, now)?;
            }
            ControlPatch::Review(ReviewAction::Approve) => {
                mission.result_summary = Some("reviewer approved the mission result".to_string());
                mission.transition(MissionStatus::Completed, now)?;
            }
            ControlPatch::Review(ReviewAction::Reject) => {
                mission.fail_reason = Some("mission result rejected by reviewer".to_string());
                mission.transition(MissionStatus::Failed, now)?;
            }
        }
        self.store.put_mission(mission, now).await?;
        Ok(true)
    }

    /// The controller's single outer error handler (spec §7): writes one
    /// `error` log and force-fails the mission. `Mission::transition`'s table
    /// doesn't enumerate every (status, FAILED) pair — e.g. `PLANNING` has no
    /// listed route to `FAILED` even though a planner `LLMError` must end the
    /// mission — so this sets status directly, the same way
    /// `Mission::apply_input_control_action` bypasses the table.
    async fn fail_mission(&self, mission_id: &MissionId, reason: String) -> Result<(), EngineError> {
        let mut mission = self.store.get_mission(mission_id.as_str()).await?;
        if mission.status.is_terminal() {
            return Ok(());
        }
        let now = self.clock.epoch_ms();
        mission.fail_reason = Some(reason.clone());
        mission.status = MissionStatus::Failed;
        mission.finished_at_ms.get_or_insert(now);
        if let Some(started) = mission.started_at_ms {
            mission.total_duration_ms.get_or_insert(now.saturating_sub(started));
        }
        self.store.put_mission(mission, now).await?;
        self.store.append_log(MissionLog::new(LogId::new(), *mission_id, LogKind::Error, reason, now)).await?;
        Ok(())
    }

    /// Keeps the Job status in sync with its mission (spec §6 projection
    /// table), called once per outer-loop iteration plus once at exit.
    async fn project_job(&self, mission_id: &MissionId, job_id: &JobId) -> Result<(), EngineError> {
        let mission = self.store.get_mission(mission_id.as_str()).await?;
        let mut job = self.store.get_job(job_id.as_str()).await?;
        let now = self.clock.epoch_ms();
        job.sync_to_mission(mission.status, now);
        if mission.status == MissionStatus::Failed {
            job.last_error = mission.fail_reason.clone();
        }
        self.store.put_job(job, now).await?;
        Ok(())
    }
}

fn plan_overview(other_steps: &[&MissionStep], current: &MissionStep) -> String {
    let mut all: Vec<&MissionStep> = other_steps.to_vec();
    all.push(current);
    all.sort_by_key(|s| s.order_index);
    all.iter()
        .map(|s| {
            let marker = if s.id == current.id { "->" } else { "  " };
            format!("{marker} {}. {}", s.order_index, s.description.as_deref().unwrap_or(&s.command))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Updates `jobs.heartbeat_at` every 2s for an external liveness scanner
/// (spec §5). Runs as its own task alongside the controller's.
pub async fn heartbeat_loop(store: Arc<dyn Store>, job_id: JobId, clock: impl Clock) {
    loop {
        tokio::time::sleep(WAIT_INTERVAL).await;
        let Ok(mut job) = store.get_job(job_id.as_str()).await else { return };
        if matches!(job.status, JobStatus::Completed | JobStatus::Failed) {
            return;
        }
        let now = clock.epoch_ms();
        job.heartbeat_at_ms = Some(now);
        let _ = store.put_job(job, now).await;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
