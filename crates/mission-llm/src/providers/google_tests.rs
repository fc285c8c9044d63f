// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_content_and_usage() {
    let body = r#"{
        "candidates": [{"content": {"parts": [{"text": "{\"command\":\"npm run build\"}"}]}}],
        "usageMetadata": {"promptTokenCount": 80, "candidatesTokenCount": 15, "totalTokenCount": 95}
    }"#;
    let response = parse_response("gemini-2.5-flash", body).unwrap();
    assert_eq!(response.content, "{\"command\":\"npm run build\"}");
    assert_eq!(response.prompt_tokens, 80);
    assert_eq!(response.completion_tokens, 15);
    assert_eq!(response.total_tokens, 95);
    assert_eq!(response.provider, "google");
}

#[test]
fn missing_candidates_is_a_parse_error() {
    let body = r#"{"candidates": []}"#;
    let err = parse_response("gemini-2.5-flash", body).unwrap_err();
    assert!(matches!(err, LlmError::Parse { .. }));
}
