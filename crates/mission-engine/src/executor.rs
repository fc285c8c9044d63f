// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Step Executor (spec §4.5): guard, then run, then persist one step.

use crate::error::EngineError;
use mission_core::{CommandGuardSettings, MissionStep, StepStatus};
use mission_guard::{AiReviewer, CommandGuard};
use mission_sandbox::{Instance, SandboxError};
use std::time::Duration;

/// Default retry budget when a step is retryable but the plan didn't set one
/// (spec §4.5 step 5: "up to `max_retries` (default 2)").
pub const DEFAULT_MAX_RETRIES: u32 = 2;

pub struct StepExecutor<'a> {
    guard: CommandGuard<'a>,
    reviewer: Option<&'a dyn AiReviewer>,
}

impl<'a> StepExecutor<'a> {
    pub fn new(settings: &'a CommandGuardSettings, reviewer: Option<&'a dyn AiReviewer>) -> Self {
        Self { guard: CommandGuard::new(settings), reviewer }
    }

    /// Run one step to completion, mutating it in place (spec §4.5). Never
    /// returns `Err` for a step-local failure — `BLOCKED`/`FAILED` are
    /// encoded on `step` itself; `Err` is reserved for guard misconfiguration.
    pub async fn execute(&self, instance: &Instance, step: &mut MissionStep, now_ms: impl Fn() -> u64) -> Result<(), EngineError> {
        if step.max_retries == 0 && step.retryable {
            step.max_retries = DEFAULT_MAX_RETRIES;
        }

        let verdict = self.guard.evaluate_with_ai_review(&step.command, step.background, self.reviewer).await?;
        if !verdict.allowed {
            step.status = StepStatus::Blocked;
            step.exit_code = Some(-2);
            step.result_summary = Some(match (&verdict.rule, &verdict.reason) {
                (Some(rule), Some(reason)) => format!("{rule}: {reason}"),
                (Some(rule), None) => rule.clone(),
                (None, Some(reason)) => reason.clone(),
                (None, None) => "blocked by command guard".to_string(),
            });
            step.finished_at_ms = Some(now_ms());
            return Ok(());
        }
        if verdict.promoted_to_background {
            step.background = true;
            if step.ready_pattern.is_none() {
                step.ready_pattern = verdict.suggested_ready_pattern.clone();
            }
        }

        step.status = StepStatus::InProgress;
        step.started_at_ms = Some(now_ms());

        loop {
            let (stdout, stderr, exit_code) = if step.background {
                match instance.background_command(&step.command, step.ready_pattern.as_deref().unwrap_or(""), Some(step.timeout_ms)).await {
                    Ok(out) => out,
                    Err(SandboxError::BackgroundReadyTimeout(ms)) => {
                        (String::new(), format!("Timeout: background command did not signal readiness within {ms}ms"), -1)
                    }
                    Err(e) => (String::new(), e.to_string(), -1),
                }
            } else {
                instance.command(&step.command, None, step.timeout_ms).await?
            };

            if exit_code == 0 || !step.can_retry() {
                let finished_at = now_ms();
                step.exit_code = Some(exit_code);
                step.set_output(&stdout, &stderr);
                step.finished_at_ms = Some(finished_at);
                step.duration_ms = step.started_at_ms.map(|started| finished_at.saturating_sub(started));
                step.status = if exit_code == 0 { StepStatus::Done } else { StepStatus::Failed };
                step.result_summary = Some(format!("exit={exit_code} duration={}ms", step.duration_ms.unwrap_or_default()));
                return Ok(());
            }

            let attempt = step.retry_count;
            step.retry_count += 1;
            let backoff = Duration::from_secs(2) * 2u32.saturating_pow(attempt);
            tokio::time::sleep(backoff).await;
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
