// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} request failed: {source}")]
    Http { provider: String, #[source] source: reqwest::Error },
    #[error("{provider} returned an error response ({status}): {body}")]
    ApiError { provider: String, status: u16, body: String },
    #[error("{provider} response could not be parsed: {reason}")]
    Parse { provider: String, reason: String },
    #[error("no API key configured for provider {0}")]
    MissingApiKey(String),
    #[error("unknown provider {0}")]
    UnknownProvider(String),
}
