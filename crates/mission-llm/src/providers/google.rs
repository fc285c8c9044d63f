// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Google Generative Language API back-end (spec §4.3).

use crate::chat::{ChatMessage, ChatOptions, ChatResponse};
use crate::error::LlmError;
use crate::provider::Provider;
use async_trait::async_trait;
use serde_json::json;

pub struct GoogleProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn chat(&self, messages: &[ChatMessage], opts: &ChatOptions) -> Result<ChatResponse, LlmError> {
        let system: Vec<&ChatMessage> = messages.iter().filter(|m| m.role == "system").collect();
        let contents: Vec<_> = messages
            .iter()
            .filter(|m| m.role != "system")
            .map(|m| {
                json!({
                    "role": if m.role == "assistant" { "model" } else { "user" },
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        let mut body = json!({ "contents": contents });
        if let Some(first) = system.first() {
            body["systemInstruction"] = json!({ "parts": [{ "text": first.content }] });
        }
        let mut generation_config = json!({});
        if let Some(temperature) = opts.temperature {
            generation_config["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = opts.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        if opts.json_mode {
            generation_config["responseMimeType"] = json!("application/json");
        }
        body["generationConfig"] = generation_config;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Http { provider: "google".to_string(), source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| LlmError::Http { provider: "google".to_string(), source })?;

        if !status.is_success() {
            return Err(LlmError::ApiError { provider: "google".to_string(), status: status.as_u16(), body: text });
        }

        parse_response(&self.model, &text)
    }
}

fn parse_response(model: &str, text: &str) -> Result<ChatResponse, LlmError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LlmError::Parse { provider: "google".to_string(), reason: e.to_string() })?;

    let content = value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| LlmError::Parse {
            provider: "google".to_string(),
            reason: "missing candidates[0].content.parts[0].text".to_string(),
        })?
        .to_string();

    let usage = &value["usageMetadata"];
    Ok(ChatResponse {
        content,
        prompt_tokens: usage["promptTokenCount"].as_u64().unwrap_or(0),
        completion_tokens: usage["candidatesTokenCount"].as_u64().unwrap_or(0),
        total_tokens: usage["totalTokenCount"].as_u64().unwrap_or(0),
        model: model.to_string(),
        provider: "google".to_string(),
    })
}

#[cfg(test)]
#[path = "google_tests.rs"]
mod tests;
