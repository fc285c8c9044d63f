// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn extracts_object_surrounded_by_prose() {
    let text = "Sure, here is the plan:\n{\"reasoning\":\"ok\",\"steps\":[]}\nLet me know if that works.";
    let obj = extract_first_json_object(text).unwrap();
    assert_eq!(obj, "{\"reasoning\":\"ok\",\"steps\":[]}");
}

#[test]
fn handles_nested_braces() {
    let text = r#"{"a": {"b": 1}, "c": 2}"#;
    assert_eq!(extract_first_json_object(text).unwrap(), text);
}

#[test]
fn ignores_braces_inside_string_literals() {
    let text = r#"{"note": "looks like a } but isn't"}"#;
    assert_eq!(extract_first_json_object(text).unwrap(), text);
}

#[test]
fn returns_none_when_no_object_present() {
    assert!(extract_first_json_object("no json here").is_none());
}
