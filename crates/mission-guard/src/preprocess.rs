// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String pre-processing passes run before the per-category rule match
//! (spec §4.2 step 4).

use regex::Regex;
use std::sync::OnceLock;

fn heredoc_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<<-?['"]([A-Za-z_][A-Za-z0-9_]*)['"]"#).expect("static regex"))
}

/// Drop the body of *quoted* heredocs (`<<'EOF'`, `<<"EOF"`, `<<-'EOF'`) so
/// their literal contents can't trip the shell-injection rules. Unquoted
/// heredocs (`<<EOF`) undergo shell expansion and are left intact, since
/// they remain dangerous (spec §4.2 step 4).
pub fn strip_quoted_heredocs(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    let mut lines = command.lines().peekable();
    while let Some(line) = lines.next() {
        if let Some(caps) = heredoc_header().captures(line) {
            let delim = caps.get(1).expect("group 1 always present").as_str();
            out.push_str(line);
            out.push('\n');
            for body_line in lines.by_ref() {
                if body_line.trim_end() == delim {
                    break;
                }
            }
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn quoted_string() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""[^"]*"|'[^']*'"#).expect("static regex"))
}

/// Collapse the contents of single- and double-quoted strings to empty, so
/// a quoted string mentioning a hanging-looking token (e.g.
/// `"start:'node src/server.js'"`) doesn't trigger a hanging rule that only
/// applies to the command actually being run (spec §4.2 step 4).
pub fn strip_quoted_strings(command: &str) -> String {
    quoted_string()
        .replace_all(command, |caps: &regex::Captures| {
            let m = caps.get(0).expect("whole match");
            m.as_str().chars().next().map(|q| format!("{q}{q}")).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
#[path = "preprocess_tests.rs"]
mod tests;
