// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use mission_core::IllegalTransition;
use mission_guard::GuardError;
use mission_llm::LlmError;
use mission_sandbox::SandboxError;
use mission_store::StoreError;
use thiserror::Error;

/// Errors that abort a mission outright (spec §7). Step-local failures
/// (`BLOCKED`, retryable `FAILED`) are handled inside the executor and never
/// surface here; only `SandboxFatal` and an unrecoverable `LLMError` from the
/// planner reach the controller's outer handler.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("command guard error: {0}")]
    Guard(#[from] GuardError),
    #[error("sandbox error: {0}")]
    Sandbox(#[from] SandboxError),
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("illegal mission transition: {0}")]
    Transition(#[from] IllegalTransition),
    #[error("job has no associated mission")]
    MissingMissionId,
    #[error("mission reached VALIDATING with no provisioned sandbox instance")]
    NoSandboxInstance,
}
