//! # UI Module
//!
//! Terminal user interface for the mock IDE shell.
//!
//! ## Components
//!
//! - [`App`] - application state (focus, selection, modals, input buffers)
//! - [`mod@render`] - rendering functions for drawing the TUI
//! - [`mod@keys`] - key events translated into `App` intents
//! - [`theme::Theme`] / [`config::Config`] - colors and the persisted choice
//! - [`editor::EditorCursor`] - cursor and editing over the current file
//! - [`palette`] - the command palette
//! - [`highlight`] - syntect-backed syntax highlighting
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                       │
//! ├──────────┬──────────────────────────┬───────────┤
//! │          │  Tab strip               │           │
//! │ Explorer ├──────────────────────────┤ Assistant │
//! │ (tree)   │  Editor                  │ (chat)    │
//! │          ├──────────────────────────┤           │
//! │          │  Terminal                │           │
//! ├──────────┴──────────────────────────┴───────────┤
//! │               Status bar · Footer               │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The assistant column and the terminal row are both toggleable; modals
//! (command palette, prompts, key help) draw centered over everything.

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod keys;
pub mod palette;
pub mod render;
pub mod theme;

pub use app::{App, FocusPane, Modal, Prompt, PromptKind};
pub use keys::{handle_key, DispatchRequest};
pub use render::render;
