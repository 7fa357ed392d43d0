//! # Terminal Session
//!
//! A linear log of executed command/output pairs plus an input history with
//! a backward-walking cursor. The session never runs anything itself: a
//! submitted command is answered later by the responder, and the finished
//! entry (command + output, immutable) is appended on resolve.

use chrono::{DateTime, Local};

/// Outcome class of a terminal entry, used for output coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Success,
    Error,
    Info,
}

/// One executed command and its output. Immutable once appended.
#[derive(Debug, Clone)]
pub struct TerminalEntry {
    pub id: u64,
    pub command: String,
    pub output: String,
    pub timestamp: DateTime<Local>,
    pub status: EntryStatus,
}

/// The terminal panel's state.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    entries: Vec<TerminalEntry>,
    history: Vec<String>,
    /// -1 = not browsing; otherwise indexes backward from the most recent
    /// history entry.
    cursor: isize,
    running: bool,
    epoch: u64,
    next_id: u64,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            history: Vec::new(),
            cursor: -1,
            running: false,
            epoch: 0,
            next_id: 0,
        }
    }

    pub fn entries(&self) -> &[TerminalEntry] {
        &self.entries
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Whether a command is waiting on its response. Input is disabled
    /// while this is set, so at most one request is ever in flight.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Generation stamp handed to the responder dispatch; envelopes from an
    /// older generation are discarded on arrival.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Record a submitted command. The entry itself arrives via
    /// [`TerminalSession::resolve`].
    pub fn submit(&mut self, command: &str) {
        self.history.push(command.to_string());
        self.cursor = -1;
        self.running = true;
    }

    /// Append the finished entry for a previously submitted command.
    /// Envelopes from a stale epoch are dropped without any state change.
    pub fn resolve(&mut self, epoch: u64, command: &str, output: &str, status: EntryStatus) {
        if epoch != self.epoch {
            tracing::debug!("terminal response dropped: stale epoch");
            return;
        }
        let entry = TerminalEntry {
            id: self.next_id,
            command: command.to_string(),
            output: output.to_string(),
            timestamp: Local::now(),
            status,
        };
        self.next_id += 1;
        self.entries.push(entry);
        self.running = false;
    }

    /// Seed an entry directly, bypassing the responder. Used for the demo
    /// workspace's pre-existing log and for locally handled commands.
    pub fn append_local(&mut self, command: &str, output: &str, status: EntryStatus) {
        let current_epoch = self.epoch;
        self.resolve(current_epoch, command, output, status);
    }

    /// Drop the log and invalidate any in-flight response. History and the
    /// recall cursor survive.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.running = false;
        self.epoch += 1;
    }

    /// Step backward through history (toward older commands), clamping at
    /// the oldest. Returns the command to place in the input field.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let max = self.history.len() as isize - 1;
        if self.cursor < max {
            self.cursor += 1;
        }
        self.recalled()
    }

    /// Step forward through history (toward newer commands). Walking past
    /// the newest returns to the blank prompt.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor >= 0 {
            self.cursor -= 1;
        }
        self.recalled()
    }

    fn recalled(&self) -> Option<&str> {
        if self.cursor < 0 {
            return None;
        }
        let index = self.history.len() - 1 - self.cursor as usize;
        self.history.get(index).map(String::as_str)
    }
}
