// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::guard::CommandGuard;
use async_trait::async_trait;
use mission_core::CommandGuardSettings;

struct FixedReviewer(Result<AiReviewVerdict, AiReviewError>);

#[async_trait]
impl AiReviewer for FixedReviewer {
    async fn review(&self, _command: &str, _is_background: bool) -> Result<AiReviewVerdict, AiReviewError> {
        match &self.0 {
            Ok(v) => Ok(v.clone()),
            Err(AiReviewError::Unparseable) => Err(AiReviewError::Unparseable),
            Err(AiReviewError::Provider(m)) => Err(AiReviewError::Provider(m.clone())),
        }
    }
}

#[tokio::test]
async fn unsafe_verdict_denies() {
    let settings = CommandGuardSettings { ai_review: true, ..CommandGuardSettings::default() };
    let reviewer = FixedReviewer(Ok(AiReviewVerdict { safe: false, reason: Some("looks risky".into()) }));
    let verdict = CommandGuard::new(&settings)
        .evaluate_with_ai_review("some-custom-tool --run", false, Some(&reviewer))
        .await
        .unwrap();
    assert!(!verdict.allowed);
    assert_eq!(verdict.rule.as_deref(), Some("ai-review"));
}

#[tokio::test]
async fn unparseable_response_denies_defensively() {
    let settings = CommandGuardSettings { ai_review: true, ..CommandGuardSettings::default() };
    let reviewer = FixedReviewer(Err(AiReviewError::Unparseable));
    let verdict = CommandGuard::new(&settings)
        .evaluate_with_ai_review("some-custom-tool --run", false, Some(&reviewer))
        .await
        .unwrap();
    assert!(!verdict.allowed);
}

#[tokio::test]
async fn provider_error_allows_the_rule_based_verdict() {
    let settings = CommandGuardSettings { ai_review: true, ..CommandGuardSettings::default() };
    let reviewer = FixedReviewer(Err(AiReviewError::Provider("timeout".into())));
    let verdict = CommandGuard::new(&settings)
        .evaluate_with_ai_review("some-custom-tool --run", false, Some(&reviewer))
        .await
        .unwrap();
    assert!(verdict.allowed);
}

#[tokio::test]
async fn ai_review_is_skipped_when_rule_pass_already_denied() {
    let settings = CommandGuardSettings { ai_review: true, ..CommandGuardSettings::default() };
    let reviewer = FixedReviewer(Ok(AiReviewVerdict { safe: true, reason: None }));
    let verdict = CommandGuard::new(&settings)
        .evaluate_with_ai_review("rm -rf /", false, Some(&reviewer))
        .await
        .unwrap();
    assert!(!verdict.allowed);
    assert_eq!(verdict.rule.as_deref(), Some("rm-rf-root"));
}
