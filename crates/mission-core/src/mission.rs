// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mission: a user goal under execution, and its state machine (spec §3, §4.4).

use crate::define_id;
use crate::error::IllegalTransition;
use crate::token_usage::TokenUsage;
use serde::{Deserialize, Serialize};

define_id! {
    /// Unique identifier for a mission.
    pub struct MissionId("msn-");
}

/// Wire-exact mission status alphabet (spec §6). The external CRUD layer and
/// the Job status projection both depend on these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    Queued,
    Planning,
    WaitingPlanApproval,
    Executing,
    Paused,
    WaitingInput,
    Validating,
    WaitingReview,
    Completed,
    Failed,
}

crate::simple_display! {
    MissionStatus {
        Queued => "QUEUED",
        Planning => "PLANNING",
        WaitingPlanApproval => "WAITING_PLAN_APPROVAL",
        Executing => "EXECUTING",
        Paused => "PAUSED",
        WaitingInput => "WAITING_INPUT",
        Validating => "VALIDATING",
        WaitingReview => "WAITING_REVIEW",
        Completed => "COMPLETED",
        Failed => "FAILED",
    }
}

impl MissionStatus {
    /// True for the two statuses a mission never leaves (spec §3 lifecycle).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Spec §3 invariant: `finished_at` is set iff status is one of these three.
    pub fn sets_finished_at(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::WaitingReview)
    }

    /// Validate a transition against the table in spec.md §4.4.
    ///
    /// This is the *normal* transition table. The `controlAction=input`
    /// control action is intentionally exempt from it — see
    /// [`Mission::apply_input_control_action`].
    pub fn can_transition_to(self, to: Self) -> bool {
        use MissionStatus::*;
        matches!(
            (self, to),
            (Queued, Planning)
                | (Planning, WaitingPlanApproval)
                | (WaitingPlanApproval, Executing)
                | (WaitingPlanApproval, Failed)
                | (WaitingPlanApproval, Planning)
                | (Executing, Validating)
                | (Executing, Failed)
                | (Executing, Paused)
                | (Executing, Planning)
                | (Paused, Executing)
                | (WaitingInput, Executing)
                | (Validating, WaitingReview)
                | (WaitingReview, Completed)
                | (WaitingReview, Failed)
        )
    }
}

/// Per-role + total token usage, nested as spec.md §3 requires.
pub type MissionTokenUsage = TokenUsage;

/// A user goal being pursued end-to-end (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub project_id: String,
    pub goal: String,
    pub status: MissionStatus,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub latest_user_input: Option<String>,
    #[serde(default)]
    pub latest_agent_question: Option<String>,
    #[serde(default)]
    pub plan_reasoning: Option<String>,
    #[serde(default)]
    pub fail_reason: Option<String>,
    #[serde(default)]
    pub result_summary: Option<String>,
    #[serde(default)]
    pub started_at_ms: Option<u64>,
    #[serde(default)]
    pub finished_at_ms: Option<u64>,
    #[serde(default)]
    pub total_duration_ms: Option<u64>,
    #[serde(default)]
    pub ai_provider: Option<String>,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default)]
    pub token_usage: MissionTokenUsage,
}

impl Mission {
    pub fn new(id: MissionId, project_id: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            id,
            project_id: project_id.into(),
            goal: goal.into(),
            status: MissionStatus::Queued,
            repo_url: None,
            latest_user_input: None,
            latest_agent_question: None,
            plan_reasoning: None,
            fail_reason: None,
            result_summary: None,
            started_at_ms: None,
            finished_at_ms: None,
            total_duration_ms: None,
            ai_provider: None,
            ai_model: None,
            token_usage: MissionTokenUsage::default(),
        }
    }

    /// Apply a validated transition, enforcing the spec §3 `finished_at`
    /// invariant and §4.4's `started_at` side effect on QUEUED -> PLANNING.
    pub fn transition(&mut self, to: MissionStatus, now_ms: u64) -> Result<(), IllegalTransition> {
        if !self.status.can_transition_to(to) {
            return Err(IllegalTransition { from: self.status, to });
        }
        if self.status == MissionStatus::Queued && to == MissionStatus::Planning {
            self.started_at_ms = Some(now_ms);
        }
        if to.sets_finished_at() && self.finished_at_ms.is_none() {
            self.finished_at_ms = Some(now_ms);
            if let Some(started) = self.started_at_ms {
                self.total_duration_ms = Some(now_ms.saturating_sub(started));
            }
        }
        self.status = to;
        Ok(())
    }

    /// The `controlAction=input` transition (spec §4.4, §9 open question (b)):
    /// the source sets mission to PLANNING unconditionally, even from
    /// WAITING_REVIEW. We follow that behaviour rather than the strict table.
    pub fn apply_input_control_action(&mut self, message: String) {
        self.latest_user_input = Some(message);
        self.status = MissionStatus::Planning;
    }

    /// Spec §8: `status=FAILED ⇒ fail_reason ≠ null`.
    pub fn is_well_formed(&self) -> bool {
        if self.status == MissionStatus::Failed && self.fail_reason.is_none() {
            return false;
        }
        if self.status == MissionStatus::Completed && self.result_summary.is_none() {
            return false;
        }
        if self.status == MissionStatus::WaitingReview
            && (self.finished_at_ms.is_none() || self.total_duration_ms.is_none())
        {
            return false;
        }
        true
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Mission {
    /// Test-only convenience: build a mission already in a given status,
    /// skipping the transition table (useful for setting up fixtures).
    pub fn fixture(status: MissionStatus) -> Self {
        let mut m = Self::new(MissionId::new(), "proj-1", "do a thing");
        m.status = status;
        if status == MissionStatus::Failed {
            m.fail_reason = Some("test failure".to_string());
        }
        if status == MissionStatus::Completed {
            m.result_summary = Some("test summary".to_string());
        }
        if status == MissionStatus::WaitingReview {
            m.finished_at_ms = Some(1);
            m.total_duration_ms = Some(1);
        }
        m
    }
}

#[cfg(test)]
#[path = "mission_tests.rs"]
mod tests;
