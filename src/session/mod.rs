//! # Sessions
//!
//! Linear-log state for the two conversational panes: the terminal panel
//! ([`terminal::TerminalSession`]) and the assistant ([`chat::ChatSession`]).
//! Both follow the same shape: submit records the user's side immediately,
//! the responder's side is applied later with an epoch check so a cleared
//! session safely ignores stale replies.

pub mod chat;
pub mod terminal;

pub use chat::{ChatMessage, ChatSession, Role};
pub use terminal::{EntryStatus, TerminalEntry, TerminalSession};
