// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Command Guard (spec §4.2): evaluates a proposed command against an
//! ordered list of rules before it reaches the sandbox.

use crate::ai_review::{AiReviewError, AiReviewer};
use crate::preprocess::{strip_quoted_heredocs, strip_quoted_strings};
use crate::rule::{destructive_rules, hanging_rules, network_exfil_rules, privilege_esc_rules, shell_injection_rules, Rule};
use crate::verdict::Verdict;
use crate::{guess, GuardError};
use mission_core::CommandGuardSettings;
use regex::Regex;

/// Evaluates commands against a project's `execution.commandGuard` settings.
pub struct CommandGuard<'a> {
    settings: &'a CommandGuardSettings,
}

impl<'a> CommandGuard<'a> {
    pub fn new(settings: &'a CommandGuardSettings) -> Self {
        Self { settings }
    }

    /// Evaluate a proposed command (spec §4.2 steps 1-8). Does not perform
    /// the optional AI review; call [`Self::evaluate_with_ai_review`] for
    /// that, since it needs network access and can't be a pure function.
    pub fn evaluate(&self, command: &str, is_background: bool) -> Result<Verdict, GuardError> {
        let trimmed = command.trim();

        // 1. enabled=false -> allow outright.
        if !self.settings.enabled {
            return Ok(Verdict::allow(trimmed));
        }

        // 2. allow-list short-circuits everything else.
        for pattern in &self.settings.custom_allow_patterns {
            let re = compile_ci(pattern, "customAllowPatterns")?;
            if re.is_match(trimmed) {
                return Ok(Verdict::allow_with_rule(trimmed, format!("allow:{pattern}")));
            }
        }

        // 3-6. built-in deny rules, in category order; hanging rules are
        // non-fatal and instead promote the step to background.
        if self.settings.block_destructive {
            if let Some(rule) = first_match(destructive_rules(), trimmed) {
                return Ok(Verdict::deny(trimmed, rule.id, rule.reason));
            }
        }
        if self.settings.block_hanging && !is_background {
            let for_hanging = strip_quoted_strings(trimmed);
            if let Some(rule) = first_match(hanging_rules(), &for_hanging) {
                let pattern = guess::guess(trimmed);
                return Ok(Verdict::promote_to_background(trimmed, rule.id, pattern));
            }
        }
        if self.settings.block_network_exfil {
            if let Some(rule) = first_match(network_exfil_rules(), trimmed) {
                return Ok(Verdict::deny(trimmed, rule.id, rule.reason));
            }
        }
        if self.settings.block_privilege_esc {
            if let Some(rule) = first_match(privilege_esc_rules(), trimmed) {
                return Ok(Verdict::deny(trimmed, rule.id, rule.reason));
            }
        }
        if self.settings.block_shell_injection {
            let for_injection = strip_quoted_heredocs(trimmed);
            if let Some(rule) = first_match(shell_injection_rules(), &for_injection) {
                return Ok(Verdict::deny(trimmed, rule.id, rule.reason));
            }
        }

        // 8. custom deny patterns.
        for pattern in &self.settings.custom_deny_patterns {
            let re = compile_ci(pattern, "customDenyPatterns")?;
            if re.is_match(trimmed) {
                return Ok(Verdict::deny(trimmed, format!("deny:{pattern}"), "matched a custom deny pattern"));
            }
        }

        Ok(Verdict::allow(trimmed))
    }

    /// Full evaluation including the optional AI second opinion (spec §4.2
    /// step 9). Only consulted when the rule-based pass above allows and
    /// `aiReview=true`.
    pub async fn evaluate_with_ai_review(
        &self,
        command: &str,
        is_background: bool,
        reviewer: Option<&(dyn AiReviewer)>,
    ) -> Result<Verdict, GuardError> {
        let verdict = self.evaluate(command, is_background)?;
        if !verdict.allowed || !self.settings.ai_review || verdict.promoted_to_background {
            return Ok(verdict);
        }
        let Some(reviewer) = reviewer else {
            return Ok(verdict);
        };
        match reviewer.review(command, is_background).await {
            Ok(review) if review.safe => Ok(verdict),
            Ok(review) => Ok(Verdict::deny(
                command.trim(),
                "ai-review",
                review.reason.unwrap_or_else(|| "guard role flagged this command as unsafe".to_string()),
            )),
            Err(AiReviewError::Unparseable) => Ok(Verdict::deny(
                command.trim(),
                "ai-review",
                "guard role response could not be parsed; denying defensively",
            )),
            Err(AiReviewError::Provider(msg)) => {
                tracing::warn!(error = %msg, "ai review provider error, allowing command per spec");
                Ok(verdict)
            }
        }
    }
}

fn first_match<'r>(rules: &'r [Rule], haystack: &str) -> Option<&'r Rule> {
    rules.iter().find(|rule| rule.is_match(haystack))
}

fn compile_ci(pattern: &str, field: &'static str) -> Result<Regex, GuardError> {
    Regex::new(&format!("(?i){pattern}")).map_err(|source| GuardError::InvalidPattern { field, source })
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
