// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mission steps: the unit of planned and executed work (spec §3, §4.5).

use crate::define_id;
use crate::mission::MissionId;
use serde::{Deserialize, Serialize};

define_id! {
    /// Unique identifier for a mission step.
    pub struct StepId("stp-");
}

/// Default foreground command timeout (spec §3, §6): 300_000ms.
pub const DEFAULT_TIMEOUT_MS: u64 = 300_000;

/// Cap applied to the tail of captured stdout kept on the step record.
pub const STDOUT_TAIL_LIMIT: usize = 5_000;

/// Cap applied to the tail of captured stderr kept on the step record.
pub const STDERR_TAIL_LIMIT: usize = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Pending,
    InProgress,
    Done,
    Failed,
    Blocked,
}

crate::simple_display! {
    StepStatus {
        Pending => "PENDING",
        InProgress => "IN_PROGRESS",
        Done => "DONE",
        Failed => "FAILED",
        Blocked => "BLOCKED",
    }
}

/// One planned shell action and its execution record (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionStep {
    pub id: StepId,
    pub mission_id: MissionId,
    pub order_index: u32,
    pub command: String,
    pub status: StepStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub retryable: bool,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub background: bool,
    #[serde(default)]
    pub ready_pattern: Option<String>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub started_at_ms: Option<u64>,
    #[serde(default)]
    pub finished_at_ms: Option<u64>,
    #[serde(default)]
    pub stdout_tail: String,
    #[serde(default)]
    pub stderr_tail: String,
    #[serde(default)]
    pub result_summary: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl MissionStep {
    pub fn new(id: StepId, mission_id: MissionId, order_index: u32, command: impl Into<String>) -> Self {
        Self {
            id,
            mission_id,
            order_index,
            command: command.into(),
            status: StepStatus::Pending,
            description: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retryable: false,
            max_retries: 0,
            retry_count: 0,
            background: false,
            ready_pattern: None,
            exit_code: None,
            duration_ms: None,
            started_at_ms: None,
            finished_at_ms: None,
            stdout_tail: String::new(),
            stderr_tail: String::new(),
            result_summary: None,
        }
    }

    /// Whether another retry attempt is permitted (spec §4.5, §8).
    pub fn can_retry(&self) -> bool {
        self.retryable && self.retry_count < self.max_retries
    }

    /// Set captured output, truncating to the retained-tail limits with a
    /// leading ellipsis marker when truncation occurs (spec §3).
    pub fn set_output(&mut self, stdout: &str, stderr: &str) {
        self.stdout_tail = tail_with_ellipsis(stdout, STDOUT_TAIL_LIMIT);
        self.stderr_tail = tail_with_ellipsis(stderr, STDERR_TAIL_LIMIT);
    }
}

fn tail_with_ellipsis(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_string();
    }
    let keep = limit.saturating_sub(1);
    let start = s.len() - keep;
    // don't split a UTF-8 codepoint in half
    let start = (start..s.len()).find(|&i| s.is_char_boundary(i)).unwrap_or(start);
    format!("…{}", &s[start..])
}

#[cfg(any(test, feature = "test-support"))]
impl MissionStep {
    pub fn fixture(mission_id: MissionId, order_index: u32) -> Self {
        Self::new(StepId::new(), mission_id, order_index, "echo hi")
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
