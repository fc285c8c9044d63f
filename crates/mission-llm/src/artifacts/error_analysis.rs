// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `troubleshooter` role's artefact: a short strategy for recovering from
//! a failed step (spec §4.3). Plain text, not a corrected command — the
//! `coder` role turns the strategy into the next attempt.

use crate::chat::{ChatMessage, ChatOptions};
use crate::error::LlmError;
use crate::provider::Provider;

const OUTPUT_TAIL_LIMIT: usize = 4_000;

const SYSTEM_PROMPT: &str = "You are the troubleshooting stage of an autonomous software engineering agent. \
A step's command just failed. In at most three sentences, describe the likely cause and a strategy for the \
next attempt. Do not propose a corrected command yourself; a later stage turns your strategy into one.";

#[derive(Debug, Clone, Default)]
pub struct ErrorAnalysisContext<'a> {
    pub goal: &'a str,
    pub step_description: &'a str,
    pub failed_command: &'a str,
    pub exit_code: i32,
    pub combined_output: &'a str,
}

fn tail(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let start = text.len() - limit;
    let mut boundary = start;
    while boundary < text.len() && !text.is_char_boundary(boundary) {
        boundary += 1;
    }
    &text[boundary..]
}

fn build_user_message(ctx: &ErrorAnalysisContext<'_>) -> String {
    format!(
        "Mission goal: {}\nStep: {}\nFailed command: {}\nExit code: {}\nOutput (tail):\n{}",
        ctx.goal,
        ctx.step_description,
        ctx.failed_command,
        ctx.exit_code,
        tail(ctx.combined_output, OUTPUT_TAIL_LIMIT),
    )
}

pub async fn request_error_analysis(provider: &dyn Provider, ctx: &ErrorAnalysisContext<'_>) -> Result<String, LlmError> {
    let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(build_user_message(ctx))];
    let response = provider.chat(&messages, &ChatOptions::default()).await?;
    Ok(response.content)
}

#[cfg(test)]
#[path = "error_analysis_tests.rs"]
mod tests;
