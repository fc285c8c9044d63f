// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `planner` role's artefact: a reasoning string plus an ordered list of
//! steps (spec §4.3). The planner never proposes shell commands itself and
//! never stalls on a missing repository.

use crate::chat::{ChatMessage, ChatOptions};
use crate::error::LlmError;
use crate::json_extract::extract_first_json_object;
use crate::provider::Provider;
use mission_core::TokenBucket;
use serde::{Deserialize, Serialize};

const README_TRUNCATE_LIMIT: usize = 8_000;
const MIN_STEPS: usize = 3;
const MAX_STEPS: usize = 8;

const SYSTEM_PROMPT: &str = r#"You are the planning stage of an autonomous software engineering agent.
Produce a short plan for the stated goal as JSON: {"reasoning": string, "steps": [{"description": string, "timeoutMs": number, "retryable": bool, "background": bool, "readyPattern": string|null}]}.
Rules:
- Respond with JSON only, no prose outside the object.
- Never include shell commands, file contents, or code in a step description; steps are descriptions of intent, a later stage turns them into commands.
- If there is no existing repository yet, do not ask clarifying questions about it: plan to scaffold what the goal needs.
- Produce between 3 and 8 steps."#;

#[derive(Debug, Clone, Default)]
pub struct PlanContext<'a> {
    pub goal: &'a str,
    pub repo_present: bool,
    pub file_tree: Option<&'a str>,
    pub package_json: Option<&'a str>,
    pub readme: Option<&'a str>,
    pub custom_instructions: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    pub description: String,
    pub timeout_ms: u64,
    #[serde(default)]
    pub retryable: bool,
    #[serde(default)]
    pub background: bool,
    #[serde(default)]
    pub ready_pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub reasoning: String,
    pub steps: Vec<PlanStep>,
    /// Token accounting and provenance for this call, filled in after the
    /// provider responds (spec §3's `tokenUsage`/`aiProvider`/`aiModel`
    /// fields), not part of the model's own JSON output.
    #[serde(skip)]
    pub usage: TokenBucket,
    #[serde(skip)]
    pub provider: String,
    #[serde(skip)]
    pub model: String,
}

fn build_user_message(ctx: &PlanContext<'_>) -> String {
    let mut sections = Vec::new();
    sections.push(format!("Goal: {}", ctx.goal));
    sections.push(if ctx.repo_present {
        "An existing repository is checked out in the workspace.".to_string()
    } else {
        "There is no existing repository to work from; the workspace is empty.".to_string()
    });
    if let Some(tree) = ctx.file_tree {
        sections.push(format!("File tree:\n{tree}"));
    }
    if let Some(package_json) = ctx.package_json {
        sections.push(format!("package.json:\n{package_json}"));
    }
    if let Some(readme) = ctx.readme {
        let truncated = if readme.len() > README_TRUNCATE_LIMIT { &readme[..README_TRUNCATE_LIMIT] } else { readme };
        sections.push(format!("README (truncated):\n{truncated}"));
    }
    if let Some(instructions) = ctx.custom_instructions {
        sections.push(format!("Project instructions:\n{instructions}"));
    }
    sections.join("\n\n")
}

pub async fn request_plan(provider: &dyn Provider, ctx: &PlanContext<'_>) -> Result<Plan, LlmError> {
    let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(build_user_message(ctx))];
    let opts = ChatOptions { json_mode: true, ..ChatOptions::default() };
    let response = provider.chat(&messages, &opts).await?;

    let json_text = extract_first_json_object(&response.content).unwrap_or(&response.content);
    let mut plan: Plan = serde_json::from_str(json_text)
        .map_err(|e| LlmError::Parse { provider: provider.name().to_string(), reason: e.to_string() })?;

    if plan.steps.len() < MIN_STEPS || plan.steps.len() > MAX_STEPS {
        return Err(LlmError::Parse {
            provider: provider.name().to_string(),
            reason: format!("plan had {} steps, expected {MIN_STEPS}-{MAX_STEPS}", plan.steps.len()),
        });
    }
    for step in &mut plan.steps {
        if step.timeout_ms == 0 {
            step.timeout_ms = mission_core::DEFAULT_TIMEOUT_MS;
        }
    }
    plan.usage = TokenBucket::new(response.prompt_tokens, response.completion_tokens);
    plan.provider = response.provider.clone();
    plan.model = response.model.clone();
    Ok(plan)
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
