//! # Application State
//!
//! Glue between the workspace, the sessions, and the rendering layer. The
//! [`App`] owns every piece of UI state (focus, selection, modals, input
//! buffers) and exposes the intents the key handler dispatches. It never
//! talks to the responder threads directly: submits return the dispatch
//! request for the caller to forward, and finished envelopes are applied
//! back through [`App::apply_envelope`].

use rustc_hash::FxHashSet;

use crate::respond::Envelope;
use crate::session::{ChatSession, TerminalSession};
use crate::ui::config::Config;
use crate::ui::editor::EditorCursor;
use crate::ui::palette::{CommandId, Palette};
use crate::ui::theme::Theme;
use crate::workspace::{FileTree, NodeId, TabSession, VisibleRow};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Explorer,
    Editor,
    Terminal,
    Assistant,
}

/// What a text prompt modal is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewFile,
    NewFolder,
    Rename(NodeId),
}

/// A one-line input modal (new file/folder name, rename).
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// Modal layered over the main view; at most one is open.
#[derive(Debug, Clone)]
pub enum Modal {
    Palette(Palette),
    Prompt(Prompt),
    ConfirmDelete(NodeId),
    Keys,
}

pub struct App {
    pub tree: FileTree,
    pub tabs: TabSession,
    pub terminal: TerminalSession,
    pub chat: ChatSession,

    pub focus: FocusPane,
    pub explorer_index: usize,
    pub cursor: EditorCursor,
    dirty: FxHashSet<NodeId>,

    pub terminal_input: String,
    pub chat_input: String,

    pub show_terminal: bool,
    pub show_assistant: bool,
    pub modal: Option<Modal>,

    pub theme: Theme,
    pub should_quit: bool,
    /// Frame counter driving the waiting spinner.
    pub tick: u64,
}

impl App {
    /// Build the app around a seeded tree with `entry` open in the editor.
    pub fn new(tree: FileTree, entry: NodeId, theme: Theme) -> Self {
        let mut tabs = TabSession::new();
        if tree.is_file(entry) {
            tabs.select(entry);
        }

        Self {
            tree,
            tabs,
            terminal: TerminalSession::new(),
            chat: ChatSession::new(),
            focus: FocusPane::Explorer,
            explorer_index: 0,
            cursor: EditorCursor::default(),
            dirty: FxHashSet::default(),
            terminal_input: String::new(),
            chat_input: String::new(),
            show_terminal: true,
            show_assistant: false,
            modal: None,
            theme,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    // -- Explorer ----------------------------------------------------------

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.tree.visible_rows()
    }

    pub fn selected_row(&self) -> Option<VisibleRow> {
        self.visible_rows().get(self.explorer_index).copied()
    }

    fn clamp_explorer_index(&mut self) {
        let count = self.visible_rows().len();
        if count == 0 {
            self.explorer_index = 0;
        } else if self.explorer_index >= count {
            self.explorer_index = count - 1;
        }
    }

    pub fn explorer_next(&mut self) {
        let count = self.visible_rows().len();
        if count > 0 {
            self.explorer_index = (self.explorer_index + 1) % count;
        }
    }

    pub fn explorer_previous(&mut self) {
        let count = self.visible_rows().len();
        if count > 0 {
            self.explorer_index = (self.explorer_index + count - 1) % count;
        }
    }

    /// Left arrow: collapse the selected folder, or jump to the parent.
    pub fn explorer_left(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if self.tree.is_folder(row.id) && self.tree.is_expanded(row.id) {
            self.tree.set_expanded(row.id, false);
            self.clamp_explorer_index();
        } else if let Some(parent) = self.tree.parent(row.id) {
            if let Some(index) = self.visible_rows().iter().position(|r| r.id == parent) {
                self.explorer_index = index;
            }
        }
    }

    /// Right arrow: expand the selected folder.
    pub fn explorer_right(&mut self) {
        if let Some(row) = self.selected_row() {
            if self.tree.is_folder(row.id) {
                self.tree.set_expanded(row.id, true);
            }
        }
    }

    /// Enter on a row: toggle a folder, open a file in the editor.
    pub fn activate_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if self.tree.is_folder(row.id) {
            self.tree.toggle_expanded(row.id);
            self.clamp_explorer_index();
        } else {
            self.open_file(row.id);
            self.focus = FocusPane::Editor;
        }
    }

    // -- Tabs --------------------------------------------------------------

    pub fn current_file(&self) -> Option<NodeId> {
        self.tabs.current()
    }

    pub fn open_file(&mut self, id: NodeId) {
        if !self.tree.is_file(id) {
            return;
        }
        self.tabs.select(id);
        self.sync_cursor();
    }

    pub fn close_current_tab(&mut self) {
        if let Some(current) = self.tabs.current() {
            self.tabs.close(current);
            self.sync_cursor();
        }
    }

    pub fn close_other_tabs(&mut self) {
        if let Some(current) = self.tabs.current() {
            self.tabs.close_others(current);
        }
    }

    pub fn close_tabs_to_the_right(&mut self) {
        if let Some(current) = self.tabs.current() {
            self.tabs.close_right(current);
            self.sync_cursor();
        }
    }

    pub fn next_tab(&mut self) {
        self.tabs.cycle_next();
        self.sync_cursor();
    }

    pub fn previous_tab(&mut self) {
        self.tabs.cycle_previous();
        self.sync_cursor();
    }

    pub fn move_tab_left(&mut self) {
        if let Some(current) = self.tabs.current() {
            self.tabs.move_left(current);
        }
    }

    pub fn move_tab_right(&mut self) {
        if let Some(current) = self.tabs.current() {
            self.tabs.move_right(current);
        }
    }

    /// Keep the editor cursor valid for whatever is now the current file.
    fn sync_cursor(&mut self) {
        match self.current_content() {
            Some(content) => {
                let content = content.to_string();
                self.cursor.clamp_to(&content);
            }
            None => self.cursor.reset(),
        }
    }

    pub fn current_content(&self) -> Option<&str> {
        self.tabs.current().and_then(|id| self.tree.content(id))
    }

    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.dirty.contains(&id)
    }

    pub fn mark_dirty(&mut self, id: NodeId) {
        self.dirty.insert(id);
    }

    // -- Tree mutation -----------------------------------------------------

    /// Folder that new nodes land in: the selected folder, the selected
    /// file's parent, or the tree root when nothing is selected.
    fn insertion_parent(&self) -> Option<NodeId> {
        let row = self.selected_row()?;
        if self.tree.is_folder(row.id) {
            Some(row.id)
        } else {
            self.tree.parent(row.id)
        }
    }

    fn create_file(&mut self, name: &str) {
        let parent = self.insertion_parent();
        if let Some(parent_id) = parent {
            self.tree.set_expanded(parent_id, true);
        }
        if let Some(id) = self.tree.insert_file(parent, name, "") {
            self.open_file(id);
        }
    }

    fn create_folder(&mut self, name: &str) {
        let parent = self.insertion_parent();
        if let Some(parent_id) = parent {
            self.tree.set_expanded(parent_id, true);
        }
        self.tree.insert_folder(parent, name);
    }

    /// Delete a subtree and close any tabs that pointed into it.
    pub fn delete_node(&mut self, id: NodeId) {
        let removed = self.tree.remove(id);
        self.tabs.close_all_in(&removed);
        for node in &removed {
            self.dirty.remove(node);
        }
        self.clamp_explorer_index();
        self.sync_cursor();
    }

    // -- Panels and focus --------------------------------------------------

    /// Cycle focus through the visible panes.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Explorer => FocusPane::Editor,
            FocusPane::Editor if self.show_terminal => FocusPane::Terminal,
            FocusPane::Editor if self.show_assistant => FocusPane::Assistant,
            FocusPane::Editor => FocusPane::Explorer,
            FocusPane::Terminal if self.show_assistant => FocusPane::Assistant,
            FocusPane::Terminal => FocusPane::Explorer,
            FocusPane::Assistant => FocusPane::Explorer,
        };
    }

    pub fn toggle_terminal(&mut self) {
        self.show_terminal = !self.show_terminal;
        if !self.show_terminal && self.focus == FocusPane::Terminal {
            self.focus = FocusPane::Editor;
        }
    }

    pub fn toggle_assistant(&mut self) {
        self.show_assistant = !self.show_assistant;
        if !self.show_assistant && self.focus == FocusPane::Assistant {
            self.focus = FocusPane::Editor;
        }
    }

    // -- Terminal and chat -------------------------------------------------

    /// Take the terminal input and turn it into a dispatch request
    /// `(epoch, command)`, or handle it locally (`clear`). Returns `None`
    /// when there is nothing to dispatch.
    pub fn submit_terminal(&mut self) -> Option<(u64, String)> {
        if self.terminal.is_running() {
            return None;
        }
        let command = self.terminal_input.trim().to_string();
        if command.is_empty() {
            return None;
        }
        self.terminal_input.clear();

        if command == "clear" {
            self.terminal.clear();
            return None;
        }

        self.terminal.submit(&command);
        Some((self.terminal.epoch(), command))
    }

    /// Take the chat input and turn it into a dispatch request.
    pub fn submit_chat(&mut self) -> Option<(u64, String)> {
        if self.chat.is_waiting() {
            return None;
        }
        let content = self.chat_input.trim().to_string();
        if content.is_empty() {
            return None;
        }
        self.chat_input.clear();
        self.chat.send(&content);
        Some((self.chat.epoch(), content))
    }

    /// Apply a finished responder envelope. Stale epochs are dropped
    /// inside the sessions.
    pub fn apply_envelope(&mut self, envelope: Envelope) {
        match envelope {
            Envelope::Terminal {
                epoch,
                command,
                output,
                status,
            } => self.terminal.resolve(epoch, &command, &output, status),
            Envelope::Chat { epoch, reply } => self.chat.resolve(epoch, reply),
        }
    }

    pub fn recall_previous_command(&mut self) {
        if let Some(command) = self.terminal.recall_previous() {
            self.terminal_input = command.to_string();
        }
    }

    pub fn recall_next_command(&mut self) {
        match self.terminal.recall_next() {
            Some(command) => self.terminal_input = command.to_string(),
            None => self.terminal_input.clear(),
        }
    }

    // -- Modals and commands -----------------------------------------------

    pub fn open_palette(&mut self) {
        self.modal = Some(Modal::Palette(Palette::new()));
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Execute a palette command. Commands that need more input open the
    /// matching modal instead of acting immediately.
    pub fn run_command(&mut self, id: CommandId) {
        match id {
            CommandId::NewFile => {
                self.modal = Some(Modal::Prompt(Prompt {
                    kind: PromptKind::NewFile,
                    input: String::new(),
                }));
            }
            CommandId::NewFolder => {
                self.modal = Some(Modal::Prompt(Prompt {
                    kind: PromptKind::NewFolder,
                    input: String::new(),
                }));
            }
            CommandId::RenameNode => {
                if let Some(row) = self.selected_row() {
                    let input = self.tree.name(row.id).unwrap_or_default().to_string();
                    self.modal = Some(Modal::Prompt(Prompt {
                        kind: PromptKind::Rename(row.id),
                        input,
                    }));
                }
            }
            CommandId::DeleteNode => {
                if let Some(row) = self.selected_row() {
                    self.modal = Some(Modal::ConfirmDelete(row.id));
                }
            }
            CommandId::CloseTab => self.close_current_tab(),
            CommandId::CloseOtherTabs => self.close_other_tabs(),
            CommandId::CloseTabsToTheRight => self.close_tabs_to_the_right(),
            CommandId::NextTab => self.next_tab(),
            CommandId::PreviousTab => self.previous_tab(),
            CommandId::ToggleTerminal => self.toggle_terminal(),
            CommandId::ToggleAssistant => self.toggle_assistant(),
            CommandId::ClearTerminal => self.terminal.clear(),
            CommandId::ClearChat => self.chat.clear(),
            CommandId::CycleTheme => self.cycle_theme(),
            CommandId::ShowKeys => self.modal = Some(Modal::Keys),
            CommandId::Quit => self.should_quit = true,
        }
    }

    /// Accept the open prompt/confirm modal.
    pub fn confirm_modal(&mut self) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::Prompt(prompt) => {
                let name = prompt.input.trim();
                if name.is_empty() {
                    return;
                }
                match prompt.kind {
                    PromptKind::NewFile => self.create_file(name),
                    PromptKind::NewFolder => self.create_folder(name),
                    PromptKind::Rename(id) => self.tree.rename(id, name),
                }
            }
            Modal::ConfirmDelete(id) => self.delete_node(id),
            // Palette confirmation lives in the key handler (it reads the
            // selected command before closing); anything else is put back.
            other => self.modal = Some(other),
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = Theme::next_after(self.theme.name).clone();
        let config = Config {
            theme: self.theme.name.to_string(),
        };
        if let Err(err) = config.save() {
            tracing::warn!(error = %err, "failed to persist theme selection");
        }
    }
}
