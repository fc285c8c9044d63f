// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The back-end abstraction every provider implements (spec §4.3).

use crate::chat::{ChatMessage, ChatOptions, ChatResponse};
use crate::error::LlmError;
use async_trait::async_trait;

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn chat(&self, messages: &[ChatMessage], opts: &ChatOptions) -> Result<ChatResponse, LlmError>;
}
