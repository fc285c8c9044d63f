// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn kind_serializes_to_snake_case() {
    assert_eq!(serde_json::to_string(&LogKind::ToolOutput).unwrap(), "\"tool_output\"");
    assert_eq!(serde_json::to_string(&LogKind::AgentQuestion).unwrap(), "\"agent_question\"");
}

#[test]
fn builder_methods_attach_step_and_details() {
    let mission_id = MissionId::new();
    let step_id = StepId::new();
    let log = MissionLog::new(LogId::new(), mission_id, LogKind::Metric, "tokens used", 10)
        .for_step(step_id)
        .with_details(json!({ "prompt": 10, "completion": 5 }));
    assert_eq!(log.step_id, Some(step_id));
    assert_eq!(log.details.unwrap()["prompt"], 10);
}
