// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Anthropic Messages API back-end (spec §4.3).

use crate::chat::{ChatMessage, ChatOptions, ChatResponse};
use crate::error::LlmError;
use crate::provider::Provider;
use async_trait::async_trait;
use serde_json::json;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn chat(&self, messages: &[ChatMessage], opts: &ChatOptions) -> Result<ChatResponse, LlmError> {
        // the Messages API carries the system prompt outside the turn array
        let system: String = messages
            .iter()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let turns: Vec<&ChatMessage> = messages.iter().filter(|m| m.role != "system").collect();

        let mut body = json!({
            "model": self.model,
            "system": system,
            "messages": turns,
            "max_tokens": opts.max_tokens.unwrap_or(4096),
        });
        if let Some(temperature) = opts.temperature {
            body["temperature"] = json!(temperature);
        }

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Http { provider: "anthropic".to_string(), source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| LlmError::Http { provider: "anthropic".to_string(), source })?;

        if !status.is_success() {
            return Err(LlmError::ApiError { provider: "anthropic".to_string(), status: status.as_u16(), body: text });
        }

        parse_response(&self.model, &text)
    }
}

fn parse_response(model: &str, text: &str) -> Result<ChatResponse, LlmError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LlmError::Parse { provider: "anthropic".to_string(), reason: e.to_string() })?;

    let content = value["content"][0]["text"]
        .as_str()
        .ok_or_else(|| LlmError::Parse { provider: "anthropic".to_string(), reason: "missing content[0].text".to_string() })?
        .to_string();

    let usage = &value["usage"];
    let prompt_tokens = usage["input_tokens"].as_u64().unwrap_or(0);
    let completion_tokens = usage["output_tokens"].as_u64().unwrap_or(0);
    Ok(ChatResponse {
        content,
        prompt_tokens,
        completion_tokens,
        total_tokens: prompt_tokens + completion_tokens,
        model: value["model"].as_str().unwrap_or(model).to_string(),
        provider: "anthropic".to_string(),
    })
}

#[cfg(test)]
#[path = "anthropic_tests.rs"]
mod tests;
