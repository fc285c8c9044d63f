// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridges the `guard` LLM role to [`mission_guard::AiReviewer`] (spec §4.2
//! step 9). `mission-guard` only knows the trait; this is the one place that
//! actually calls out to a `mission-llm` provider.

use mission_guard::{AiReviewError, AiReviewVerdict, AiReviewer};
use mission_llm::json_extract::extract_first_json_object;
use mission_llm::{ChatMessage, ChatOptions, Provider};
use async_trait::async_trait;

const SYSTEM_PROMPT: &str = r#"You are the guard role of an autonomous software engineering agent's command safety check.
A shell command already passed the rule-based filters; give a second opinion as JSON: {"safe": bool, "reason": string|null}.
Respond with JSON only, no prose outside the object."#;

pub struct LlmAiReviewer<'a> {
    provider: &'a dyn Provider,
}

impl<'a> LlmAiReviewer<'a> {
    pub fn new(provider: &'a dyn Provider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AiReviewer for LlmAiReviewer<'_> {
    async fn review(&self, command: &str, is_background: bool) -> Result<AiReviewVerdict, AiReviewError> {
        let user = format!("Command: {command}\nBackground: {is_background}");
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)];
        let opts = ChatOptions { json_mode: true, ..ChatOptions::default() };

        let response = self.provider.chat(&messages, &opts).await.map_err(|e| AiReviewError::Provider(e.to_string()))?;
        let json_text = extract_first_json_object(&response.content).unwrap_or(&response.content);
        let value: serde_json::Value = serde_json::from_str(json_text).map_err(|_| AiReviewError::Unparseable)?;
        let safe = value.get("safe").and_then(serde_json::Value::as_bool).ok_or(AiReviewError::Unparseable)?;
        let reason = value.get("reason").and_then(serde_json::Value::as_str).map(str::to_string);
        Ok(AiReviewVerdict { safe, reason })
    }
}

#[cfg(test)]
#[path = "guard_adapter_tests.rs"]
mod tests;
