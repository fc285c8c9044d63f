// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn record_keeps_total_in_sync_with_roles() {
    let mut usage = TokenUsage::default();
    usage.record("planner", TokenBucket::new(100, 20));
    usage.record("coder", TokenBucket::new(50, 10));
    assert!(usage.is_consistent());
    assert_eq!(usage.total.prompt, 150);
    assert_eq!(usage.total.completion, 30);
    assert_eq!(usage.total.total, 180);
}

#[test]
fn recording_the_same_role_twice_accumulates() {
    let mut usage = TokenUsage::default();
    usage.record("coder", TokenBucket::new(10, 5));
    usage.record("coder", TokenBucket::new(1, 1));
    assert_eq!(usage.by_role["coder"], TokenBucket::new(11, 6));
    assert!(usage.is_consistent());
}

#[test]
fn reconcile_recomputes_total_from_roles() {
    let mut usage = TokenUsage::default();
    usage.by_role.insert("guard".to_string(), TokenBucket::new(3, 2));
    usage.total = TokenBucket::default();
    assert!(!usage.is_consistent());
    usage.reconcile();
    assert!(usage.is_consistent());
    assert_eq!(usage.total, TokenBucket::new(3, 2));
}
