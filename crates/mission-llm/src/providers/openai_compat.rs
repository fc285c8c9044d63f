// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OpenAI-compatible chat-completions back-end, shared by the `openai` and
//! `groq` providers (spec §4.3: "Groq via OpenAI-compat").

use crate::chat::{ChatMessage, ChatOptions, ChatResponse};
use crate::error::LlmError;
use crate::provider::Provider;
use async_trait::async_trait;
use serde_json::json;

pub struct OpenAiCompatProvider {
    name: &'static str,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn new(name: &'static str, base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key, model)
    }

    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("groq", "https://api.groq.com/openai/v1", api_key, model)
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn chat(&self, messages: &[ChatMessage], opts: &ChatOptions) -> Result<ChatResponse, LlmError> {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = opts.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = opts.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if opts.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Http { provider: self.name.to_string(), source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| LlmError::Http { provider: self.name.to_string(), source })?;

        if !status.is_success() {
            return Err(LlmError::ApiError { provider: self.name.to_string(), status: status.as_u16(), body: text });
        }

        parse_response(self.name, &self.model, &text)
    }
}

fn parse_response(provider: &str, model: &str, text: &str) -> Result<ChatResponse, LlmError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| LlmError::Parse { provider: provider.to_string(), reason: e.to_string() })?;

    let content = value["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| LlmError::Parse { provider: provider.to_string(), reason: "missing choices[0].message.content".to_string() })?
        .to_string();

    let usage = &value["usage"];
    Ok(ChatResponse {
        content,
        prompt_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0),
        completion_tokens: usage["completion_tokens"].as_u64().unwrap_or(0),
        total_tokens: usage["total_tokens"].as_u64().unwrap_or(0),
        model: value["model"].as_str().unwrap_or(model).to_string(),
        provider: provider.to_string(),
    })
}

#[cfg(test)]
#[path = "openai_compat_tests.rs"]
mod tests;
