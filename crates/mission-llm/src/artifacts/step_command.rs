// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `coder` role's artefact: the single shell command that executes one
//! plan step (spec §4.3).

use crate::chat::{ChatMessage, ChatOptions};
use crate::error::LlmError;
use crate::json_extract::extract_first_json_object;
use crate::provider::Provider;
use mission_core::TokenBucket;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = r#"You are the execution stage of an autonomous software engineering agent.
Produce the single shell command that carries out the current step, as JSON: {"command": string, "reasoning": string, "background": bool, "readyPattern": string|null}.
Rules:
- Respond with JSON only, no prose outside the object.
- Never launch an interactive program; it has no terminal to answer prompts.
- Never use backticks for command substitution; use $(...) if substitution is needed.
- When the command creates a file inline, use a quoted heredoc (<<'EOF') so its body is never interpreted as shell syntax.
- If the command is long-running (a dev server, a watcher, a daemon), set "background": true and give a "readyPattern" regex that matches its output once it is ready to accept work.
- Prefer an existing script from package.json over hand-rolling the equivalent command.
- Never run `npm init -y`; a package.json that needs creating should be written directly.
- Do not propose a script that does not exist in the project's package.json."#;

#[derive(Debug, Clone, Default)]
pub struct StepCommandContext<'a> {
    pub goal: &'a str,
    pub step_index: usize,
    pub total_steps: usize,
    pub plan_overview: &'a str,
    pub previous_output: Option<&'a str>,
    pub file_tree: Option<&'a str>,
    pub package_json: Option<&'a str>,
    pub guard_feedback: Option<&'a str>,
    pub user_hint: Option<&'a str>,
    pub troubleshooter_analysis: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCommand {
    pub command: String,
    pub reasoning: String,
    #[serde(default)]
    pub background: bool,
    #[serde(default)]
    pub ready_pattern: Option<String>,
    /// Token accounting and provenance for this call, filled in after the
    /// provider responds, not part of the model's own JSON output.
    #[serde(skip)]
    pub usage: TokenBucket,
    #[serde(skip)]
    pub provider: String,
    #[serde(skip)]
    pub model: String,
}

fn build_user_message(ctx: &StepCommandContext<'_>) -> String {
    let mut sections = Vec::new();
    sections.push(format!("Mission goal: {}", ctx.goal));
    sections.push(format!("Current step: {} of {}", ctx.step_index + 1, ctx.total_steps));
    sections.push(format!("Plan:\n{}", ctx.plan_overview));
    if let Some(previous) = ctx.previous_output {
        sections.push(format!("Previous step output:\n{previous}"));
    }
    if let Some(tree) = ctx.file_tree {
        sections.push(format!("File tree:\n{tree}"));
    }
    if let Some(package_json) = ctx.package_json {
        sections.push(format!("package.json:\n{package_json}"));
    }
    if let Some(feedback) = ctx.guard_feedback {
        sections.push(format!("The previous command was rejected by the command guard: {feedback}"));
    }
    if let Some(hint) = ctx.user_hint {
        sections.push(format!("User guidance: {hint}"));
    }
    if let Some(analysis) = ctx.troubleshooter_analysis {
        sections.push(format!("Troubleshooting analysis from the previous failure:\n{analysis}"));
    }
    sections.join("\n\n")
}

pub async fn request_step_command(provider: &dyn Provider, ctx: &StepCommandContext<'_>) -> Result<StepCommand, LlmError> {
    let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(build_user_message(ctx))];
    let opts = ChatOptions { json_mode: true, ..ChatOptions::default() };
    let response = provider.chat(&messages, &opts).await?;

    let json_text = extract_first_json_object(&response.content).unwrap_or(&response.content);
    let mut step_command: StepCommand = serde_json::from_str(json_text)
        .map_err(|e| LlmError::Parse { provider: provider.name().to_string(), reason: e.to_string() })?;

    if step_command.command.contains('`') {
        return Err(LlmError::Parse { provider: provider.name().to_string(), reason: "command uses backticks".to_string() });
    }
    if step_command.background && step_command.ready_pattern.is_none() {
        return Err(LlmError::Parse {
            provider: provider.name().to_string(),
            reason: "background command is missing a readyPattern".to_string(),
        });
    }
    step_command.usage = TokenBucket::new(response.prompt_tokens, response.completion_tokens);
    step_command.provider = response.provider.clone();
    step_command.model = response.model.clone();
    Ok(step_command)
}

#[cfg(test)]
#[path = "step_command_tests.rs"]
mod tests;
