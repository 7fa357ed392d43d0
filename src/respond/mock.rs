//! Deterministic canned responders.
//!
//! No command is ever executed and no model is ever called: the terminal
//! responder matches the input against a small fixed table, and the chat
//! responder rotates through a fixed list of replies. Determinism keeps the
//! demo stable and the tests exact.

use std::sync::{Mutex, MutexGuard};

use chrono::Local;
use regex::Regex;

use crate::respond::{ChatResponder, ResponderError, TerminalResponder};
use crate::session::terminal::EntryStatus;

const LS_OUTPUT: &str = "total 8\n\
drwxr-xr-x 2 user user 4096 Jun 10 10:30 .\n\
drwxr-xr-x 4 user user 4096 Jun 10 10:30 ..\n\
-rw-r--r-- 1 user user  948 Jun 10 10:30 Cargo.toml\n\
-rw-r--r-- 1 user user  214 Jun 10 10:30 README.md\n\
drwxr-xr-x 2 user user 4096 Jun 10 10:30 src";

const GIT_STATUS_OUTPUT: &str = "On branch main\n\
Your branch is up to date with 'origin/main'.\n\
\n\
nothing to commit, working tree clean";

const CARGO_BUILD_OUTPUT: &str = "   Compiling demo v0.1.0 (/home/user/project)\n\
    Finished `dev` profile [unoptimized + debuginfo] target(s) in 0.42s";

const HELP_OUTPUT: &str = "Available commands:\n\
  ls, pwd, whoami, date, echo <text>, cat <file>,\n\
  git status, cargo build, clear, help";

/// Canned terminal responder with a regex-driven command table.
pub struct MockTerminalResponder {
    echo: Regex,
    cat: Regex,
}

impl Default for MockTerminalResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTerminalResponder {
    pub fn new() -> Self {
        Self {
            echo: Regex::new(r"^echo\s+(.*)$").expect("static pattern compiles"),
            cat: Regex::new(r"^cat\s+(\S+)").expect("static pattern compiles"),
        }
    }
}

impl TerminalResponder for MockTerminalResponder {
    fn respond(&self, command: &str) -> (String, EntryStatus) {
        let trimmed = command.trim();

        if let Some(captures) = self.echo.captures(trimmed) {
            return (captures[1].to_string(), EntryStatus::Success);
        }
        if let Some(captures) = self.cat.captures(trimmed) {
            return (
                format!("cat: {}: No such file or directory", &captures[1]),
                EntryStatus::Error,
            );
        }

        match trimmed {
            "ls" | "ls -la" | "ls -l" => (LS_OUTPUT.to_string(), EntryStatus::Success),
            "pwd" => ("/home/user/project".to_string(), EntryStatus::Success),
            "whoami" => ("user".to_string(), EntryStatus::Success),
            "date" => (
                Local::now().format("%a %b %e %T %Y").to_string(),
                EntryStatus::Success,
            ),
            "git status" => (GIT_STATUS_OUTPUT.to_string(), EntryStatus::Success),
            "cargo build" => (CARGO_BUILD_OUTPUT.to_string(), EntryStatus::Success),
            "help" => (HELP_OUTPUT.to_string(), EntryStatus::Info),
            _ => {
                let name = trimmed.split_whitespace().next().unwrap_or(trimmed);
                (
                    format!("command not found: {name}"),
                    EntryStatus::Error,
                )
            }
        }
    }
}

const CHAT_REPLIES: &[&str] = &[
    "I've looked over your code and found a potential simplification in the main loop.",
    "Based on the project structure, I'd split this module into smaller, focused parts.",
    "Consider a map instead of a vector here for O(1) lookups on that hot path.",
    "There's a pattern in this file that can leak state between renders; hoist it out.",
    "The error is on line 45: a closing parenthesis is missing.",
];

/// Canned chat responder. Replies rotate in order so consecutive questions
/// get different answers; a failing variant exists for exercising the
/// error path.
pub struct MockChatResponder {
    replies: Vec<String>,
    next: Mutex<usize>,
    fail: bool,
}

impl Default for MockChatResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChatResponder {
    pub fn new() -> Self {
        Self::with_replies(CHAT_REPLIES.iter().map(|r| (*r).to_string()).collect())
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies,
            next: Mutex::new(0),
            fail: false,
        }
    }

    /// A responder that rejects every prompt. Used by tests for the
    /// failure path.
    pub fn failing() -> Self {
        Self {
            replies: Vec::new(),
            next: Mutex::new(0),
            fail: true,
        }
    }
}

impl ChatResponder for MockChatResponder {
    fn reply(&self, _prompt: &str) -> Result<String, ResponderError> {
        if self.fail {
            return Err(ResponderError::new("mock responder configured to fail"));
        }
        if self.replies.is_empty() {
            return Err(ResponderError::new("mock responder has no replies"));
        }
        let mut next = lock_unpoisoned(&self.next);
        let reply = self.replies[*next % self.replies.len()].clone();
        *next = (*next + 1) % self.replies.len();
        Ok(reply)
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_returns_its_argument() {
        let responder = MockTerminalResponder::new();
        let (output, status) = responder.respond("echo hello world");
        assert_eq!(output, "hello world");
        assert_eq!(status, EntryStatus::Success);
    }

    #[test]
    fn unknown_commands_report_not_found() {
        let responder = MockTerminalResponder::new();
        let (output, status) = responder.respond("frobnicate --all");
        assert_eq!(output, "command not found: frobnicate");
        assert_eq!(status, EntryStatus::Error);
    }

    #[test]
    fn cat_is_an_error_without_a_filesystem() {
        let responder = MockTerminalResponder::new();
        let (output, status) = responder.respond("cat Cargo.toml");
        assert!(output.contains("No such file"));
        assert_eq!(status, EntryStatus::Error);
    }

    #[test]
    fn chat_replies_rotate_in_order() {
        let responder = MockChatResponder::with_replies(vec![
            "first".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(responder.reply("a").expect("reply"), "first");
        assert_eq!(responder.reply("b").expect("reply"), "second");
        assert_eq!(responder.reply("c").expect("reply"), "first");
    }

    #[test]
    fn failing_responder_rejects_every_prompt() {
        let responder = MockChatResponder::failing();
        assert!(responder.reply("anything").is_err());
    }
}
