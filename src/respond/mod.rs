//! # Responders
//!
//! The contract between the sessions and whatever answers them. Sessions
//! only ever see these traits; the shipped implementation
//! ([`mock::MockTerminalResponder`], [`mock::MockChatResponder`]) returns
//! canned strings, and a real command executor or inference client could be
//! dropped in without touching any session logic.
//!
//! Answers are computed off the UI thread: [`Dispatcher::dispatch_command`]
//! and [`Dispatcher::dispatch_chat`] sleep for the artificial delay, invoke
//! the responder, and push one [`Envelope`] through an mpsc channel that the
//! event loop drains every tick. Envelopes carry the session epoch captured
//! at dispatch time, so a session cleared while a request is in flight
//! simply ignores the late answer.

pub mod mock;

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::session::terminal::EntryStatus;

/// Failure reported by a chat responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderError {
    message: String,
}

impl ResponderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ResponderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ResponderError {}

/// Produces terminal output for a submitted command.
pub trait TerminalResponder: Send + Sync {
    fn respond(&self, command: &str) -> (String, EntryStatus);
}

/// Produces an assistant reply for a user message.
pub trait ChatResponder: Send + Sync {
    fn reply(&self, prompt: &str) -> Result<String, ResponderError>;
}

/// One answer delivered back to the event loop.
#[derive(Debug)]
pub enum Envelope {
    Terminal {
        epoch: u64,
        command: String,
        output: String,
        status: EntryStatus,
    },
    Chat {
        epoch: u64,
        reply: Result<String, ResponderError>,
    },
}

/// Hands requests to the responders on background threads and funnels the
/// answers into a single channel.
pub struct Dispatcher {
    terminal: Arc<dyn TerminalResponder>,
    chat: Arc<dyn ChatResponder>,
    delay: Duration,
    tx: Sender<Envelope>,
}

impl Dispatcher {
    pub fn new(
        terminal: Arc<dyn TerminalResponder>,
        chat: Arc<dyn ChatResponder>,
        delay: Duration,
    ) -> (Self, Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                terminal,
                chat,
                delay,
                tx,
            },
            rx,
        )
    }

    /// Ask the terminal responder about `command`; the envelope arrives on
    /// the channel after the delay.
    pub fn dispatch_command(&self, epoch: u64, command: &str) {
        let responder = Arc::clone(&self.terminal);
        let tx = self.tx.clone();
        let delay = self.delay;
        let command = command.to_string();
        thread::spawn(move || {
            thread::sleep(delay);
            let (output, status) = responder.respond(&command);
            // The receiver is gone during shutdown; nothing to deliver to.
            let _ = tx.send(Envelope::Terminal {
                epoch,
                command,
                output,
                status,
            });
        });
    }

    /// Ask the chat responder to reply to `prompt`.
    pub fn dispatch_chat(&self, epoch: u64, prompt: &str) {
        let responder = Arc::clone(&self.chat);
        let tx = self.tx.clone();
        let delay = self.delay;
        let prompt = prompt.to_string();
        thread::spawn(move || {
            thread::sleep(delay);
            let reply = responder.reply(&prompt);
            let _ = tx.send(Envelope::Chat { epoch, reply });
        });
    }
}
