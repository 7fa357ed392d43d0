//! # Command Palette
//!
//! A modal, filterable list of every command the shell can perform,
//! grouped into sections. Filtering is a case-insensitive substring match
//! over command names; sections with no matching command disappear.

/// Everything the palette can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    NewFile,
    NewFolder,
    RenameNode,
    DeleteNode,
    CloseTab,
    CloseOtherTabs,
    CloseTabsToTheRight,
    NextTab,
    PreviousTab,
    ToggleTerminal,
    ToggleAssistant,
    ClearTerminal,
    ClearChat,
    CycleTheme,
    ShowKeys,
    Quit,
}

/// One palette row: display name, section, optional shortcut label.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub id: CommandId,
    pub name: &'static str,
    pub section: &'static str,
    pub shortcut: Option<&'static str>,
}

/// The full command table, in display order (sections stay grouped).
pub const COMMANDS: &[Command] = &[
    Command {
        id: CommandId::NewFile,
        name: "New File",
        section: "File",
        shortcut: Some("n"),
    },
    Command {
        id: CommandId::NewFolder,
        name: "New Folder",
        section: "File",
        shortcut: Some("N"),
    },
    Command {
        id: CommandId::RenameNode,
        name: "Rename",
        section: "File",
        shortcut: Some("r"),
    },
    Command {
        id: CommandId::DeleteNode,
        name: "Delete",
        section: "File",
        shortcut: Some("d"),
    },
    Command {
        id: CommandId::CloseTab,
        name: "Close Tab",
        section: "Tabs",
        shortcut: Some("Ctrl+W"),
    },
    Command {
        id: CommandId::CloseOtherTabs,
        name: "Close Other Tabs",
        section: "Tabs",
        shortcut: None,
    },
    Command {
        id: CommandId::CloseTabsToTheRight,
        name: "Close Tabs to the Right",
        section: "Tabs",
        shortcut: None,
    },
    Command {
        id: CommandId::NextTab,
        name: "Next Tab",
        section: "Tabs",
        shortcut: Some("Ctrl+→"),
    },
    Command {
        id: CommandId::PreviousTab,
        name: "Previous Tab",
        section: "Tabs",
        shortcut: Some("Ctrl+←"),
    },
    Command {
        id: CommandId::ToggleTerminal,
        name: "Toggle Terminal",
        section: "View",
        shortcut: Some("Ctrl+T"),
    },
    Command {
        id: CommandId::ToggleAssistant,
        name: "Toggle Assistant",
        section: "View",
        shortcut: Some("Ctrl+A"),
    },
    Command {
        id: CommandId::ClearTerminal,
        name: "Clear Terminal",
        section: "View",
        shortcut: None,
    },
    Command {
        id: CommandId::ClearChat,
        name: "Clear Conversation",
        section: "View",
        shortcut: None,
    },
    Command {
        id: CommandId::CycleTheme,
        name: "Switch Theme",
        section: "View",
        shortcut: None,
    },
    Command {
        id: CommandId::ShowKeys,
        name: "Show Key Bindings",
        section: "Help",
        shortcut: Some("i"),
    },
    Command {
        id: CommandId::Quit,
        name: "Quit",
        section: "Application",
        shortcut: Some("Ctrl+Q"),
    },
];

/// Open-palette state: the filter text and the selection over the
/// filtered list.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    query: String,
    selected: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Commands matching the current filter, in table order.
    pub fn filtered(&self) -> Vec<&'static Command> {
        let query = self.query.to_lowercase();
        COMMANDS
            .iter()
            .filter(|command| query.is_empty() || command.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn selected_command(&self) -> Option<&'static Command> {
        self.filtered().get(self.selected).copied()
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.selected = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive() {
        let mut palette = Palette::new();
        for ch in "CLOSE".chars() {
            palette.push_char(ch);
        }
        let names: Vec<&str> = palette.filtered().iter().map(|c| c.name).collect();
        assert!(names.contains(&"Close Tab"));
        assert!(names.contains(&"Close Other Tabs"));
        assert!(!names.contains(&"Quit"));
    }

    #[test]
    fn empty_filter_shows_everything() {
        let palette = Palette::new();
        assert_eq!(palette.filtered().len(), COMMANDS.len());
    }

    #[test]
    fn selection_wraps_over_filtered_list() {
        let mut palette = Palette::new();
        for ch in "quit".chars() {
            palette.push_char(ch);
        }
        assert_eq!(palette.filtered().len(), 1);
        palette.select_next();
        assert_eq!(palette.selected_index(), 0);
        assert_eq!(
            palette.selected_command().map(|c| c.id),
            Some(CommandId::Quit)
        );
    }

    #[test]
    fn no_match_yields_no_selection() {
        let mut palette = Palette::new();
        for ch in "zzzz".chars() {
            palette.push_char(ch);
        }
        assert!(palette.filtered().is_empty());
        assert!(palette.selected_command().is_none());
    }
}
