//! # Editor State
//!
//! Cursor and plain-text editing over the current file's in-memory
//! content. The cursor addresses (line, column) in characters; edits are
//! applied straight to the tree's content string and report whether they
//! changed anything so the caller can maintain the dirty set.

use crate::workspace::{FileTree, NodeId};

/// Cursor position within the focused file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorCursor {
    pub line: usize,
    pub col: usize,
}

impl EditorCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Keep the cursor inside the content after a tab switch or an
    /// external content change.
    pub fn clamp_to(&mut self, content: &str) {
        let line_count = content.split('\n').count();
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let width = line_width(content, self.line);
        if self.col > width {
            self.col = width;
        }
    }

    pub fn move_left(&mut self, content: &str) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.col = line_width(content, self.line);
        }
    }

    pub fn move_right(&mut self, content: &str) {
        if self.col < line_width(content, self.line) {
            self.col += 1;
        } else if self.line + 1 < content.split('\n').count() {
            self.line += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self, content: &str) {
        if self.line > 0 {
            self.line -= 1;
            self.col = self.col.min(line_width(content, self.line));
        }
    }

    pub fn move_down(&mut self, content: &str) {
        if self.line + 1 < content.split('\n').count() {
            self.line += 1;
            self.col = self.col.min(line_width(content, self.line));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self, content: &str) {
        self.col = line_width(content, self.line);
    }

    /// Insert a character at the cursor. Returns whether content changed.
    pub fn insert_char(&mut self, tree: &mut FileTree, id: NodeId, ch: char) -> bool {
        self.insert_text(tree, id, &ch.to_string())
    }

    /// Insert a line break at the cursor.
    pub fn insert_newline(&mut self, tree: &mut FileTree, id: NodeId) -> bool {
        let Some(content) = tree.content(id) else {
            return false;
        };
        let offset = byte_offset(content, self.line, self.col);
        let mut updated = content.to_string();
        updated.insert(offset, '\n');
        tree.set_content(id, updated);
        self.line += 1;
        self.col = 0;
        true
    }

    /// Insert a string (used for Tab → two spaces) at the cursor.
    pub fn insert_text(&mut self, tree: &mut FileTree, id: NodeId, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let Some(content) = tree.content(id) else {
            return false;
        };
        let offset = byte_offset(content, self.line, self.col);
        let mut updated = content.to_string();
        updated.insert_str(offset, text);
        tree.set_content(id, updated);
        self.col += text.chars().count();
        true
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self, tree: &mut FileTree, id: NodeId) -> bool {
        let Some(content) = tree.content(id) else {
            return false;
        };
        if self.line == 0 && self.col == 0 {
            return false;
        }

        let mut updated = content.to_string();
        if self.col > 0 {
            let offset = byte_offset(content, self.line, self.col - 1);
            updated.remove(offset);
            self.col -= 1;
        } else {
            // Join with the previous line by removing its trailing newline.
            let prev_width = line_width(content, self.line - 1);
            let offset = byte_offset(content, self.line - 1, prev_width);
            updated.remove(offset);
            self.line -= 1;
            self.col = prev_width;
        }
        tree.set_content(id, updated);
        true
    }
}

/// Character count of line `line` (0 when out of range).
fn line_width(content: &str, line: usize) -> usize {
    content
        .split('\n')
        .nth(line)
        .map(|l| l.chars().count())
        .unwrap_or(0)
}

/// Byte offset of character column `col` on line `line`, clamped to the
/// end of that line.
fn byte_offset(content: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (index, raw) in content.split('\n').enumerate() {
        if index == line {
            let in_line = raw
                .char_indices()
                .nth(col)
                .map(|(byte, _)| byte)
                .unwrap_or(raw.len());
            return offset + in_line;
        }
        offset += raw.len() + 1;
    }
    content.len()
}
