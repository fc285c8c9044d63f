// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LLM roles (spec §4.3, §6): each mission activity talks to a distinct role
//! so per-role provider/model overrides and token accounting line up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Planner,
    Coder,
    Reviewer,
    Thinker,
    Guard,
    Troubleshooter,
}

mission_core::simple_display! {
    Role {
        Planner => "planner",
        Coder => "coder",
        Reviewer => "reviewer",
        Thinker => "thinker",
        Guard => "guard",
        Troubleshooter => "troubleshooter",
    }
}
