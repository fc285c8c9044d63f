// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_content_and_usage() {
    let body = r#"{
        "model": "gpt-5.2",
        "choices": [{"message": {"content": "{\"reasoning\":\"ok\"}"}}],
        "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
    }"#;
    let response = parse_response("openai", "gpt-5.2", body).unwrap();
    assert_eq!(response.content, "{\"reasoning\":\"ok\"}");
    assert_eq!(response.prompt_tokens, 120);
    assert_eq!(response.completion_tokens, 30);
    assert_eq!(response.total_tokens, 150);
    assert_eq!(response.provider, "openai");
}

#[test]
fn missing_content_is_a_parse_error() {
    let body = r#"{"choices": [{"message": {}}]}"#;
    let err = parse_response("groq", "llama-3.3-70b-versatile", body).unwrap_err();
    assert!(matches!(err, LlmError::Parse { .. }));
}
