// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in deny rules (spec §4.2 step 5).

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Destructive,
    Hanging,
    NetworkExfil,
    PrivilegeEsc,
    ShellInjection,
}

mission_core::simple_display! {
    Category {
        Destructive => "destructive",
        Hanging => "hanging",
        NetworkExfil => "network-exfil",
        PrivilegeEsc => "privilege-esc",
        ShellInjection => "shell-injection",
    }
}

pub struct Rule {
    pub id: &'static str,
    pub category: Category,
    pub pattern: &'static str,
    pub reason: &'static str,
}

impl Rule {
    fn compiled(&self) -> Regex {
        Regex::new(&format!("(?i){}", self.pattern))
            .unwrap_or_else(|e| panic!("built-in guard pattern {:?} is invalid: {e}", self.id))
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.compiled().is_match(haystack)
    }
}

/// Destructive rules (spec §4.2 step 5): irreversible filesystem/disk damage.
pub fn destructive_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule {
                id: "rm-rf-root",
                category: Category::Destructive,
                pattern: r"\brm\s+(-\w*r\w*f\w*|-\w*f\w*r\w*)\s+(/|~|\.\.|\*)(\s|$)",
                reason: "rm -rf targeting /, ~, .. or * is irreversible",
            },
            Rule {
                id: "mkfs",
                category: Category::Destructive,
                pattern: r"\bmkfs(\.\w+)?\b",
                reason: "mkfs formats a filesystem",
            },
            Rule {
                id: "dd-of-dev",
                category: Category::Destructive,
                pattern: r"\bdd\s+[^\n]*\bof=/dev/",
                reason: "dd writing directly to a block device",
            },
            Rule {
                id: "shred",
                category: Category::Destructive,
                pattern: r"\bshred\b",
                reason: "shred overwrites and deletes files irrecoverably",
            },
            Rule {
                id: "wipefs",
                category: Category::Destructive,
                pattern: r"\bwipefs\b",
                reason: "wipefs erases filesystem signatures",
            },
        ]
    })
}

/// Hanging rules (spec §4.2 step 5): long-running/foreground-blocking commands.
pub fn hanging_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule {
                id: "node-server-file",
                category: Category::Hanging,
                pattern: r"\bnode\s+(?!.*(--eval|-e\b))\S+\.(js|ts|mjs|cjs)\b",
                reason: "node running a script file tends to stay in the foreground",
            },
            Rule {
                id: "npm-start",
                category: Category::Hanging,
                pattern: r"\bnpm\s+start\b",
                reason: "npm start runs a long-lived dev server",
            },
            Rule {
                id: "npm-run-dev-serve-watch",
                category: Category::Hanging,
                pattern: r"\bnpm\s+run\s+(dev|serve|watch)\b",
                reason: "npm run dev/serve/watch runs a long-lived process",
            },
            Rule {
                id: "yarn-start-dev-serve",
                category: Category::Hanging,
                pattern: r"\byarn\s+(start|dev|serve)\b",
                reason: "yarn start/dev/serve runs a long-lived process",
            },
            Rule {
                id: "pnpm-start-dev-serve",
                category: Category::Hanging,
                pattern: r"\bpnpm\s+(start|dev|serve)\b",
                reason: "pnpm start/dev/serve runs a long-lived process",
            },
            Rule {
                id: "python-server",
                category: Category::Hanging,
                pattern: r"\bpython[23]?\b.*\b(server|app|manage\.py\s+runserver)\b",
                reason: "python web server commands stay in the foreground",
            },
            Rule {
                id: "tail-f",
                category: Category::Hanging,
                pattern: r"\btail\s+(-\w*f\w*|--follow)\b",
                reason: "tail -f follows indefinitely",
            },
            Rule {
                id: "sleep-long",
                category: Category::Hanging,
                pattern: r"\bsleep\s+(infinity|[1-9]\d{3,}|\d{4,})\b",
                reason: "sleep for >=1000s or infinity blocks indefinitely",
            },
            Rule { id: "yes", category: Category::Hanging, pattern: r"(^|[;&|]\s*)yes\b", reason: "yes writes forever" },
            Rule {
                id: "lone-cat",
                category: Category::Hanging,
                pattern: r"(^|[;&|]\s*)cat(\s*$|\s*[;&|])",
                reason: "cat with no arguments reads stdin forever",
            },
        ]
    })
}

/// Network-exfil rules (spec §4.2 step 5): upload/listen primitives.
pub fn network_exfil_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule {
                id: "curl-upload",
                category: Category::NetworkExfil,
                pattern: r"\bcurl\b[^\n]*(-F\b|-T\b|--upload-file\b|--data\s+@)",
                reason: "curl flags that upload local file contents",
            },
            Rule {
                id: "netcat-listen",
                category: Category::NetworkExfil,
                pattern: r"\b(nc|ncat|netcat)\b[^\n]*(-l|-e|-c)\b",
                reason: "netcat listening or executing on connect",
            },
            Rule {
                id: "wget-post",
                category: Category::NetworkExfil,
                pattern: r"\bwget\b[^\n]*--post",
                reason: "wget posting data to a remote host",
            },
            Rule {
                id: "scp-rsync-remote",
                category: Category::NetworkExfil,
                pattern: r"\b(scp|rsync)\b[^\n]*@",
                reason: "scp/rsync to a remote host",
            },
        ]
    })
}

/// Privilege-escalation rules (spec §4.2 step 5).
pub fn privilege_esc_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule { id: "sudo", category: Category::PrivilegeEsc, pattern: r"\bsudo\b", reason: "sudo escalates privileges" },
            Rule {
                id: "su-root",
                category: Category::PrivilegeEsc,
                pattern: r"\bsu\s+(root\b|-\s*$|-\s+)",
                reason: "su to root",
            },
            Rule {
                id: "chmod-world-writable",
                category: Category::PrivilegeEsc,
                pattern: r"\bchmod\b[^\n]*(777|a\+w|o\+w|\+s)\b",
                reason: "chmod to world-writable or setuid/setgid",
            },
            Rule {
                id: "chown-root",
                category: Category::PrivilegeEsc,
                pattern: r"\bchown\b[^\n]*\b(root|0)\b",
                reason: "chown to root",
            },
        ]
    })
}

/// Shell-injection rules (spec §4.2 step 5).
pub fn shell_injection_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule { id: "eval", category: Category::ShellInjection, pattern: r"\beval\s", reason: "eval of dynamic content" },
            Rule {
                id: "backticks",
                category: Category::ShellInjection,
                pattern: r"`[^`]*`",
                reason: "back-tick command substitution",
            },
            Rule {
                id: "fork-bomb",
                category: Category::ShellInjection,
                pattern: r":\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:",
                reason: "classic fork bomb",
            },
            Rule {
                id: "base64-pipe-shell",
                category: Category::ShellInjection,
                pattern: r"\bbase64\s+(-d|--decode)\b[^\n]*\|\s*(sh|bash|zsh)\b",
                reason: "base64-decoded content piped to a shell",
            },
            Rule {
                id: "curl-pipe-shell",
                category: Category::ShellInjection,
                pattern: r"\bcurl\b[^\n]*\|\s*(sh|bash|zsh|source)\b",
                reason: "curl output piped directly to a shell",
            },
            Rule {
                id: "wget-pipe-shell",
                category: Category::ShellInjection,
                pattern: r"\bwget\b[^\n]*\|\s*(sh|bash|zsh|source)\b",
                reason: "wget output piped directly to a shell",
            },
        ]
    })
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
