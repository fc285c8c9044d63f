// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token accounting shared by the LLM Role Gateway and the Mission Controller.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::AddAssign;

/// A single {prompt, completion, total} counter bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBucket {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl TokenBucket {
    pub fn new(prompt: u64, completion: u64) -> Self {
        Self { prompt, completion, total: prompt + completion }
    }
}

impl AddAssign for TokenBucket {
    fn add_assign(&mut self, rhs: Self) {
        self.prompt += rhs.prompt;
        self.completion += rhs.completion;
        self.total += rhs.total;
    }
}

/// Mission-wide token usage: one bucket per LLM role plus a running total.
///
/// Invariant (spec §8): `total` always equals the sum of the per-role buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub by_role: HashMap<String, TokenBucket>,
    #[serde(default)]
    pub total: TokenBucket,
}

impl TokenUsage {
    /// Record usage for a role, keeping `total` in sync.
    pub fn record(&mut self, role: &str, bucket: TokenBucket) {
        *self.by_role.entry(role.to_string()).or_default() += bucket;
        self.total += bucket;
    }

    /// Recompute `total` from `by_role` from scratch (used by tests and after
    /// deserializing data written by another process).
    pub fn reconcile(&mut self) {
        let mut total = TokenBucket::default();
        for bucket in self.by_role.values() {
            total += *bucket;
        }
        self.total = total;
    }

    /// Check the spec §8 invariant: total equals the sum over per-role buckets.
    pub fn is_consistent(&self) -> bool {
        let mut sum = TokenBucket::default();
        for bucket in self.by_role.values() {
            sum += *bucket;
        }
        sum == self.total
    }
}

#[cfg(test)]
#[path = "token_usage_tests.rs"]
mod tests;
