// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_step_takes_the_default_timeout() {
    let step = MissionStep::fixture(MissionId::new(), 0);
    assert_eq!(step.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(step.status, StepStatus::Pending);
}

#[test]
fn can_retry_respects_retryable_and_max_retries() {
    let mut step = MissionStep::fixture(MissionId::new(), 0);
    assert!(!step.can_retry());
    step.retryable = true;
    step.max_retries = 2;
    assert!(step.can_retry());
    step.retry_count = 2;
    assert!(!step.can_retry());
}

#[test]
fn short_output_is_kept_verbatim() {
    let mut step = MissionStep::fixture(MissionId::new(), 0);
    step.set_output("hello", "oops");
    assert_eq!(step.stdout_tail, "hello");
    assert_eq!(step.stderr_tail, "oops");
}

#[test]
fn long_stdout_is_truncated_to_the_tail_with_ellipsis() {
    let mut step = MissionStep::fixture(MissionId::new(), 0);
    let big = "x".repeat(STDOUT_TAIL_LIMIT + 100);
    step.set_output(&big, "");
    assert!(step.stdout_tail.starts_with('…'));
    assert_eq!(step.stdout_tail.chars().count(), STDOUT_TAIL_LIMIT);
}

#[test]
fn status_serializes_to_wire_exact_strings() {
    let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
    assert_eq!(json, "\"IN_PROGRESS\"");
}
