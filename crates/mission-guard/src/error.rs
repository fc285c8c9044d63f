// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("invalid regex in {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("ai review provider error (command allowed, per spec §4.2 step 9): {0}")]
    AiReviewProviderError(String),
}
