//! # Chat Session
//!
//! The assistant conversation: an ordered user/assistant message log plus a
//! waiting flag. Sending appends the user turn immediately; the assistant
//! turn arrives later from the responder, or never, in which case the
//! failed turn is simply dropped.

use chrono::{DateTime, Local};

use crate::respond::ResponderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn. Immutable once appended.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Local>,
}

/// The assistant panel's state.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    waiting: bool,
    epoch: u64,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is pending. Input is disabled while this is set.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Append the user turn and start waiting for the assistant.
    pub fn send(&mut self, content: &str) {
        self.push(Role::User, content);
        self.waiting = true;
    }

    /// Apply the responder's answer for the pending turn.
    ///
    /// On failure the waiting flag clears and the log is left unchanged;
    /// the dropped turn is recorded in the operator log only. Stale epochs
    /// are discarded entirely.
    pub fn resolve(&mut self, epoch: u64, reply: Result<String, ResponderError>) {
        if epoch != self.epoch {
            tracing::debug!("chat reply dropped: stale epoch");
            return;
        }
        self.waiting = false;
        match reply {
            Ok(content) => self.push(Role::Assistant, &content),
            Err(err) => {
                tracing::warn!(error = %err, "assistant responder failed; turn dropped");
            }
        }
    }

    /// Empty the conversation and invalidate any in-flight reply.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.waiting = false;
        self.epoch += 1;
    }

    fn push(&mut self, role: Role, content: &str) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            content: content.to_string(),
            role,
            timestamp: Local::now(),
        });
        self.next_id += 1;
    }
}
