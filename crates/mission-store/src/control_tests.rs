// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn plan_action_is_case_insensitive() {
    assert_eq!(ControlPatch::parse(Some("APPROVE"), None, None, None), Some(ControlPatch::Plan(PlanAction::Approve)));
    assert_eq!(ControlPatch::parse(Some("Reject"), None, None, None), Some(ControlPatch::Plan(PlanAction::Reject)));
}

#[test]
fn review_action_is_case_insensitive() {
    assert_eq!(ControlPatch::parse(None, Some("approve"), None, None), Some(ControlPatch::Review(ReviewAction::Approve)));
}

#[test]
fn input_requires_a_non_empty_message() {
    assert_eq!(ControlPatch::parse(None, None, Some("input"), None), None);
    assert_eq!(ControlPatch::parse(None, None, Some("input"), Some("   ")), None);
    assert_eq!(
        ControlPatch::parse(None, None, Some("input"), Some("use TypeScript")),
        Some(ControlPatch::Control { action: ControlAction::Input, message: Some("use TypeScript".to_string()) })
    );
}

#[test]
fn pause_and_resume_need_no_message() {
    assert_eq!(ControlPatch::parse(None, None, Some("pause"), None), Some(ControlPatch::Control { action: ControlAction::Pause, message: None }));
    assert_eq!(ControlPatch::parse(None, None, Some("resume"), None), Some(ControlPatch::Control { action: ControlAction::Resume, message: None }));
}

#[test]
fn unrecognised_values_yield_no_patch() {
    assert_eq!(ControlPatch::parse(Some("maybe"), None, None, None), None);
    assert_eq!(ControlPatch::parse(None, None, None, None), None);
}
