// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mission logs: the append-only narration/audit trail (spec §3, §6).

use crate::define_id;
use crate::mission::MissionId;
use crate::step::StepId;
use serde::{Deserialize, Serialize};

define_id! {
    /// Unique identifier for a mission log entry.
    pub struct LogId("log-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Thought,
    Command,
    ToolOutput,
    Error,
    Metric,
    AgentQuestion,
}

crate::simple_display! {
    LogKind {
        Thought => "thought",
        Command => "command",
        ToolOutput => "tool_output",
        Error => "error",
        Metric => "metric",
        AgentQuestion => "agent_question",
    }
}

/// One append-only entry in a mission's narration/audit trail (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionLog {
    pub id: LogId,
    pub mission_id: MissionId,
    #[serde(default)]
    pub step_id: Option<StepId>,
    pub kind: LogKind,
    pub message: String,
    pub created_at_ms: u64,
    /// Opaque, kind-specific payload (e.g. a metric's numeric fields), kept
    /// as JSON rather than typed out per spec §3's "opaque fields" note.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl MissionLog {
    pub fn new(
        id: LogId,
        mission_id: MissionId,
        kind: LogKind,
        message: impl Into<String>,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id,
            mission_id,
            step_id: None,
            kind,
            message: message.into(),
            created_at_ms,
            details: None,
        }
    }

    pub fn for_step(mut self, step_id: StepId) -> Self {
        self.step_id = Some(step_id);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
