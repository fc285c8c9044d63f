// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The optional LLM second opinion (spec §4.2 step 9).
//!
//! `mission-guard` only depends on `mission-core`; the actual `guard` role
//! call is implemented by `mission-llm` and wired in by `mission-engine`,
//! which depends on both. This trait is the seam between them.

use async_trait::async_trait;

/// The provider's verdict on whether a command is safe to run.
#[derive(Debug, Clone)]
pub struct AiReviewVerdict {
    pub safe: bool,
    pub reason: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AiReviewError {
    #[error("provider request failed: {0}")]
    Provider(String),
    #[error("could not parse a {{safe,reason}} object from the response")]
    Unparseable,
}

#[async_trait]
pub trait AiReviewer: Send + Sync {
    /// Ask the `guard` role whether `command` is safe to run.
    ///
    /// Spec §4.2 step 9: a parse failure must deny (treated the same as
    /// `Ok(AiReviewVerdict { safe: false, .. })`); only a transport/provider
    /// error allows, logged. Callers should match on `Err` vs. `Ok` rather
    /// than collapsing both into one outcome.
    async fn review(&self, command: &str, is_background: bool) -> Result<AiReviewVerdict, AiReviewError>;
}

#[cfg(test)]
#[path = "ai_review_tests.rs"]
mod tests;
