// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scripted [`Provider`] double for tests, kept behind `test-support` so
//! downstream crates can exercise artefact construction without real HTTP.

use crate::chat::{ChatMessage, ChatOptions, ChatResponse};
use crate::error::LlmError;
use crate::provider::Provider;
use async_trait::async_trait;
use parking_lot::Mutex;

pub struct FakeProvider {
    name: &'static str,
    response: Mutex<Result<String, String>>,
}

impl FakeProvider {
    pub fn responding_with(name: &'static str, content: impl Into<String>) -> Self {
        Self { name, response: Mutex::new(Ok(content.into())) }
    }

    pub fn failing(name: &'static str, reason: impl Into<String>) -> Self {
        Self { name, response: Mutex::new(Err(reason.into())) }
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn chat(&self, _messages: &[ChatMessage], _opts: &ChatOptions) -> Result<ChatResponse, LlmError> {
        match &*self.response.lock() {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
                model: "fake-model".to_string(),
                provider: self.name.to_string(),
            }),
            Err(reason) => Err(LlmError::ApiError { provider: self.name.to_string(), status: 500, body: reason.clone() }),
        }
    }
}
