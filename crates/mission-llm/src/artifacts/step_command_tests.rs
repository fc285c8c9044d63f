// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::FakeProvider;

fn ctx() -> StepCommandContext<'static> {
    StepCommandContext { goal: "ship the feature", step_index: 0, total_steps: 3, plan_overview: "1. install\n2. test\n3. summarize", ..Default::default() }
}

#[tokio::test]
async fn parses_a_well_formed_command() {
    let body = serde_json::json!({"command": "npm test", "reasoning": "runs the suite", "background": false, "readyPattern": null}).to_string();
    let provider = FakeProvider::responding_with("fake", body);
    let result = request_step_command(&provider, &ctx()).await.unwrap();
    assert_eq!(result.command, "npm test");
}

#[tokio::test]
async fn backtick_substitution_is_rejected() {
    let body = serde_json::json!({"command": "echo `date`", "reasoning": "x", "background": false, "readyPattern": null}).to_string();
    let provider = FakeProvider::responding_with("fake", body);
    let err = request_step_command(&provider, &ctx()).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse { .. }));
}

#[tokio::test]
async fn background_without_a_ready_pattern_is_rejected() {
    let body = serde_json::json!({"command": "npm run dev", "reasoning": "x", "background": true, "readyPattern": null}).to_string();
    let provider = FakeProvider::responding_with("fake", body);
    let err = request_step_command(&provider, &ctx()).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse { .. }));
}

#[tokio::test]
async fn background_with_a_ready_pattern_is_accepted() {
    let body = serde_json::json!({"command": "npm run dev", "reasoning": "x", "background": true, "readyPattern": "ready"}).to_string();
    let provider = FakeProvider::responding_with("fake", body);
    let result = request_step_command(&provider, &ctx()).await.unwrap();
    assert!(result.background);
    assert_eq!(result.ready_pattern.as_deref(), Some("ready"));
}
