// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Command Guard's output type (spec §4.2).

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a proposed command against the guard rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub allowed: bool,
    pub sanitised: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub promoted_to_background: bool,
    #[serde(default)]
    pub suggested_ready_pattern: Option<String>,
}

impl Verdict {
    pub fn allow(sanitised: impl Into<String>) -> Self {
        Self {
            allowed: true,
            sanitised: sanitised.into(),
            reason: None,
            rule: None,
            promoted_to_background: false,
            suggested_ready_pattern: None,
        }
    }

    pub fn allow_with_rule(sanitised: impl Into<String>, rule: impl Into<String>) -> Self {
        Self { rule: Some(rule.into()), ..Self::allow(sanitised) }
    }

    pub fn promote_to_background(
        sanitised: impl Into<String>,
        rule: impl Into<String>,
        ready_pattern: impl Into<String>,
    ) -> Self {
        Self {
            allowed: true,
            sanitised: sanitised.into(),
            reason: None,
            rule: Some(rule.into()),
            promoted_to_background: true,
            suggested_ready_pattern: Some(ready_pattern.into()),
        }
    }

    pub fn deny(
        sanitised: impl Into<String>,
        rule: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            allowed: false,
            sanitised: sanitised.into(),
            reason: Some(reason.into()),
            rule: Some(rule.into()),
            promoted_to_background: false,
            suggested_ready_pattern: None,
        }
    }
}
