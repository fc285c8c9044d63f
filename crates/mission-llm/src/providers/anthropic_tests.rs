// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_content_and_sums_token_usage() {
    let body = r#"{
        "model": "claude-sonnet-4-20250514",
        "content": [{"type": "text", "text": "{\"command\":\"npm test\"}"}],
        "usage": {"input_tokens": 200, "output_tokens": 40}
    }"#;
    let response = parse_response("claude-sonnet-4-20250514", body).unwrap();
    assert_eq!(response.content, "{\"command\":\"npm test\"}");
    assert_eq!(response.prompt_tokens, 200);
    assert_eq!(response.completion_tokens, 40);
    assert_eq!(response.total_tokens, 240);
}
