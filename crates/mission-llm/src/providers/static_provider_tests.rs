// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::chat::ChatOptions;

fn planner_system() -> ChatMessage {
    ChatMessage::system("respond with JSON: {\"reasoning\": string, \"steps\": [...]}")
}

fn coder_system() -> ChatMessage {
    ChatMessage::system("respond with JSON: {\"command\": string, \"reasoning\": string, \"background\": bool, \"readyPattern\": string|null}")
}

#[tokio::test]
async fn plan_includes_scripts_found_in_package_json() {
    let user = ChatMessage::user(
        r#"Goal: ship the feature.
        package.json:
        {"name": "demo", "scripts": {"lint": "eslint .", "test": "jest", "build": "tsc"}}"#,
    );
    let provider = StaticProvider::new();
    let response = provider.chat(&[planner_system(), user], &ChatOptions::default()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&response.content).unwrap();
    let steps = value["steps"].as_array().unwrap();
    assert!(steps.len() >= 3 && steps.len() <= 8);
    let descriptions: Vec<_> = steps.iter().map(|s| s["description"].as_str().unwrap()).collect();
    assert!(descriptions.iter().any(|d| d.contains("lint")));
    assert!(descriptions.iter().any(|d| d.contains("test")));
}

#[tokio::test]
async fn plan_without_a_repository_scaffolds_instead() {
    let user = ChatMessage::user("Goal: start a new project.\nThere is no existing repository to work from.");
    let provider = StaticProvider::new();
    let response = provider.chat(&[planner_system(), user], &ChatOptions::default()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&response.content).unwrap();
    let steps = value["steps"].as_array().unwrap();
    assert!(steps.iter().any(|s| s["description"].as_str().unwrap().contains("Scaffold")));
}

#[tokio::test]
async fn step_command_picks_a_matching_script() {
    let user = ChatMessage::user(
        r#"Current step: Run the `test` script and inspect its output.
        package.json:
        {"scripts": {"test": "jest"}}"#,
    );
    let provider = StaticProvider::new();
    let response = provider.chat(&[coder_system(), user], &ChatOptions::default()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&response.content).unwrap();
    assert_eq!(value["command"].as_str().unwrap(), "npm run test");
}

#[tokio::test]
async fn step_command_falls_back_when_nothing_matches() {
    let user = ChatMessage::user("Current step: Do something unrelated.\npackage.json:\n{\"scripts\": {}}");
    let provider = StaticProvider::new();
    let response = provider.chat(&[coder_system(), user], &ChatOptions::default()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&response.content).unwrap();
    assert!(value["command"].as_str().unwrap().starts_with("echo"));
}
