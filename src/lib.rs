//! Vibecode TUI - a mock IDE that runs entirely in your terminal
//!
//! This library provides the core state for the mock IDE shell: the in-memory
//! workspace (file tree and editor tabs), terminal and chat sessions fed by
//! canned responders, and the ratatui user interface.

pub mod logging;
pub mod respond;
pub mod session;
pub mod ui;
pub mod workspace;
