// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn known_providers_have_defaults() {
    assert_eq!(default_model_for("openai"), Some("gpt-5.2"));
    assert_eq!(default_model_for("anthropic"), Some("claude-sonnet-4-20250514"));
    assert_eq!(default_model_for("google"), Some("gemini-2.5-flash"));
    assert_eq!(default_model_for("groq"), Some("llama-3.3-70b-versatile"));
}

#[test]
fn unknown_provider_has_no_default() {
    assert_eq!(default_model_for("made-up-provider"), None);
}
