// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-band user control actions (spec §4.6, §6): patches an external
//! CRUD layer would normally write onto a Mission row. Since that layer is
//! out of scope here, the `Store` owns a small per-mission patch queue that
//! the Mission Controller drains on its next poll.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Pause,
    Resume,
    Input,
}

/// One of the three patch shapes spec §6 recognises, case-insensitively
/// parsed at the CRUD boundary into these typed variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPatch {
    Plan(PlanAction),
    Review(ReviewAction),
    Control { action: ControlAction, message: Option<String> },
}

impl ControlPatch {
    /// Parse the case-insensitive wire strings from spec §6 into a patch.
    /// `input` requires a non-empty `message`.
    pub fn parse(plan_action: Option<&str>, review_action: Option<&str>, control_action: Option<&str>, message: Option<&str>) -> Option<Self> {
        if let Some(value) = plan_action {
            return match value.to_lowercase().as_str() {
                "approve" => Some(Self::Plan(PlanAction::Approve)),
                "reject" => Some(Self::Plan(PlanAction::Reject)),
                _ => None,
            };
        }
        if let Some(value) = review_action {
            return match value.to_lowercase().as_str() {
                "approve" => Some(Self::Review(ReviewAction::Approve)),
                "reject" => Some(Self::Review(ReviewAction::Reject)),
                _ => None,
            };
        }
        if let Some(value) = control_action {
            return match value.to_lowercase().as_str() {
                "pause" => Some(Self::Control { action: ControlAction::Pause, message: None }),
                "resume" => Some(Self::Control { action: ControlAction::Resume, message: None }),
                "input" => {
                    let message = message?.trim();
                    if message.is_empty() {
                        return None;
                    }
                    Some(Self::Control { action: ControlAction::Input, message: Some(message.to_string()) })
                }
                _ => None,
            };
        }
        None
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
