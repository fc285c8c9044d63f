// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::FakeProvider;

#[tokio::test]
async fn returns_the_providers_strategy_text_verbatim() {
    let provider = FakeProvider::responding_with("fake", "The test runner is missing a dependency; install it before retrying.");
    let ctx = ErrorAnalysisContext {
        goal: "ship the feature",
        step_description: "Run the test suite",
        failed_command: "npm test",
        exit_code: 1,
        combined_output: "Error: cannot find module 'jest'",
    };
    let strategy = request_error_analysis(&provider, &ctx).await.unwrap();
    assert!(strategy.contains("missing a dependency"));
}

#[test]
fn tail_keeps_only_the_last_bytes_on_a_char_boundary() {
    let text = "é".repeat(3_000);
    let result = tail(&text, 4_000);
    assert!(result.chars().all(|c| c == 'é'));
}
