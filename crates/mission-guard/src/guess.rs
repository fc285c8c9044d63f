// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ready-pattern guesser for commands auto-promoted to background
//! (spec §4.2 step 6).

const LOOKUP: &[(&str, &str)] = &[
    ("next", r"(?i)ready|started|compiled|local:"),
    ("vite", r"(?i)ready in|local:"),
    ("nuxt", r"(?i)ready|listening"),
    ("ng serve", r"(?i)compiled successfully|listening"),
    ("django", r"(?i)starting development server|quit the server"),
    ("flask", r"(?i)running on|debugger is active"),
    ("rails", r"(?i)listening on|use ctrl-c"),
    ("tail -f", r"(?i)listening on|ready|started|running"),
];

const FALLBACK: &str = r"(?i)listening on|ready|started|running";

/// Guess a case-insensitive ready-pattern regex for a command promoted to
/// background, based on a small lookup of known dev-server invocations.
pub fn guess(command: &str) -> String {
    let lower = command.to_lowercase();
    for (needle, pattern) in LOOKUP {
        if lower.contains(needle) {
            return (*pattern).to_string();
        }
    }
    FALLBACK.to_string()
}

#[cfg(test)]
#[path = "guess_tests.rs"]
mod tests;
