// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::FakeProvider;

fn valid_plan_json() -> String {
    serde_json::json!({
        "reasoning": "three steps cover the goal",
        "steps": [
            {"description": "Install dependencies", "timeoutMs": 60_000, "retryable": true, "background": false, "readyPattern": null},
            {"description": "Run the test suite", "timeoutMs": 300_000, "retryable": true, "background": false, "readyPattern": null},
            {"description": "Summarize the result", "timeoutMs": 60_000, "retryable": false, "background": false, "readyPattern": null},
        ],
    })
    .to_string()
}

#[tokio::test]
async fn parses_a_well_formed_plan() {
    let provider = FakeProvider::responding_with("fake", valid_plan_json());
    let ctx = PlanContext { goal: "ship the feature", repo_present: true, ..Default::default() };
    let plan = request_plan(&provider, &ctx).await.unwrap();
    assert_eq!(plan.steps.len(), 3);
    assert_eq!(plan.steps[0].description, "Install dependencies");
}

#[tokio::test]
async fn too_few_steps_is_rejected() {
    let body = serde_json::json!({
        "reasoning": "too short",
        "steps": [{"description": "Only step", "timeoutMs": 60_000, "retryable": false, "background": false, "readyPattern": null}],
    })
    .to_string();
    let provider = FakeProvider::responding_with("fake", body);
    let ctx = PlanContext { goal: "ship the feature", repo_present: true, ..Default::default() };
    let err = request_plan(&provider, &ctx).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse { .. }));
}

#[tokio::test]
async fn prose_wrapped_json_is_still_extracted() {
    let body = format!("Sure thing! Here is the plan:\n{}\nLet me know if you need anything else.", valid_plan_json());
    let provider = FakeProvider::responding_with("fake", body);
    let ctx = PlanContext { goal: "ship the feature", repo_present: false, ..Default::default() };
    let plan = request_plan(&provider, &ctx).await.unwrap();
    assert_eq!(plan.steps.len(), 3);
}
