//! # Key Handling
//!
//! Translates crossterm key events into [`App`] intents. This is the whole
//! keyboard surface; the event loop in `main` only forwards events here and
//! hands any returned [`DispatchRequest`] to the responder dispatcher.
//!
//! Keys are environment-level bindings, not core logic: every branch calls
//! straight into an `App` method.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::app::{App, FocusPane, Modal};
use crate::ui::palette::CommandId;

/// Work for the responder dispatcher produced by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchRequest {
    Command { epoch: u64, command: String },
    Chat { epoch: u64, content: String },
}

/// Apply one key event to the app.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<DispatchRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Quit works from anywhere, modal or not.
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        app.should_quit = true;
        return None;
    }

    if app.modal.is_some() {
        handle_modal_key(app, key);
        return None;
    }

    // Global chords.
    if ctrl {
        match key.code {
            KeyCode::Char('p') => {
                app.open_palette();
                return None;
            }
            KeyCode::Char('t') => {
                app.toggle_terminal();
                return None;
            }
            KeyCode::Char('a') => {
                app.toggle_assistant();
                return None;
            }
            _ => {}
        }
    }

    // Tab cycles pane focus everywhere except the editor, where it indents.
    if key.code == KeyCode::Tab && app.focus != FocusPane::Editor {
        app.toggle_focus();
        return None;
    }

    match app.focus {
        FocusPane::Explorer => handle_explorer_key(app, key),
        FocusPane::Editor => handle_editor_key(app, key, ctrl, alt),
        FocusPane::Terminal => return handle_terminal_key(app, key),
        FocusPane::Assistant => return handle_assistant_key(app, key),
    }
    None
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match &mut app.modal {
        Some(Modal::Palette(palette)) => match key.code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Down => palette.select_next(),
            KeyCode::Up => palette.select_previous(),
            KeyCode::Backspace => palette.pop_char(),
            KeyCode::Enter => {
                let command = palette.selected_command().map(|c| c.id);
                app.close_modal();
                if let Some(id) = command {
                    app.run_command(id);
                }
            }
            KeyCode::Char(ch) if !ctrl => palette.push_char(ch),
            _ => {}
        },
        Some(Modal::Prompt(prompt)) => match key.code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Enter => app.confirm_modal(),
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(ch) if !ctrl => prompt.input.push(ch),
            _ => {}
        },
        Some(Modal::ConfirmDelete(_)) => match key.code {
            KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
            KeyCode::Enter | KeyCode::Char('y') => app.confirm_modal(),
            _ => {}
        },
        Some(Modal::Keys) => match key.code {
            KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('q') => app.close_modal(),
            _ => {}
        },
        None => {}
    }
}

fn handle_explorer_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.explorer_next(),
        KeyCode::Char('k') | KeyCode::Up => app.explorer_previous(),
        KeyCode::Char('h') | KeyCode::Left => app.explorer_left(),
        KeyCode::Char('l') | KeyCode::Right => app.explorer_right(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Char('n') => app.run_command(CommandId::NewFile),
        KeyCode::Char('N') => app.run_command(CommandId::NewFolder),
        KeyCode::Char('r') => app.run_command(CommandId::RenameNode),
        KeyCode::Char('d') => app.run_command(CommandId::DeleteNode),
        KeyCode::Char('i') => app.run_command(CommandId::ShowKeys),
        _ => {}
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent, ctrl: bool, alt: bool) {
    if ctrl {
        match key.code {
            KeyCode::Char('w') => app.close_current_tab(),
            KeyCode::Right => app.next_tab(),
            KeyCode::Left => app.previous_tab(),
            _ => {}
        }
        return;
    }
    if alt {
        match key.code {
            KeyCode::Right => app.move_tab_right(),
            KeyCode::Left => app.move_tab_left(),
            _ => {}
        }
        return;
    }

    let Some(current) = app.current_file() else {
        if key.code == KeyCode::Esc {
            app.focus = FocusPane::Explorer;
        }
        return;
    };
    let content = app.tree.content(current).unwrap_or_default().to_string();

    match key.code {
        KeyCode::Esc => app.focus = FocusPane::Explorer,
        KeyCode::Left => app.cursor.move_left(&content),
        KeyCode::Right => app.cursor.move_right(&content),
        KeyCode::Up => app.cursor.move_up(&content),
        KeyCode::Down => app.cursor.move_down(&content),
        KeyCode::Home => app.cursor.move_home(),
        KeyCode::End => app.cursor.move_end(&content),
        KeyCode::Enter => {
            let mut cursor = app.cursor;
            if cursor.insert_newline(&mut app.tree, current) {
                app.mark_dirty(current);
            }
            app.cursor = cursor;
        }
        KeyCode::Backspace => {
            let mut cursor = app.cursor;
            if cursor.backspace(&mut app.tree, current) {
                app.mark_dirty(current);
            }
            app.cursor = cursor;
        }
        KeyCode::Tab => {
            let mut cursor = app.cursor;
            if cursor.insert_text(&mut app.tree, current, "  ") {
                app.mark_dirty(current);
            }
            app.cursor = cursor;
        }
        KeyCode::Char(ch) => {
            let mut cursor = app.cursor;
            if cursor.insert_char(&mut app.tree, current, ch) {
                app.mark_dirty(current);
            }
            app.cursor = cursor;
        }
        _ => {}
    }
}

fn handle_terminal_key(app: &mut App, key: KeyEvent) -> Option<DispatchRequest> {
    // While a command runs the input is disabled; only focus moves work.
    if app.terminal.is_running() {
        if key.code == KeyCode::Esc {
            app.focus = FocusPane::Explorer;
        }
        return None;
    }

    match key.code {
        KeyCode::Esc => app.focus = FocusPane::Explorer,
        KeyCode::Enter => {
            if let Some((epoch, command)) = app.submit_terminal() {
                return Some(DispatchRequest::Command { epoch, command });
            }
        }
        KeyCode::Up => app.recall_previous_command(),
        KeyCode::Down => app.recall_next_command(),
        KeyCode::Backspace => {
            app.terminal_input.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.terminal_input.push(ch);
        }
        _ => {}
    }
    None
}

fn handle_assistant_key(app: &mut App, key: KeyEvent) -> Option<DispatchRequest> {
    if app.chat.is_waiting() {
        if key.code == KeyCode::Esc {
            app.focus = FocusPane::Explorer;
        }
        return None;
    }

    match key.code {
        KeyCode::Esc => app.focus = FocusPane::Explorer,
        KeyCode::Enter => {
            if let Some((epoch, content)) = app.submit_chat() {
                return Some(DispatchRequest::Chat { epoch, content });
            }
        }
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.chat_input.push(ch);
        }
        _ => {}
    }
    None
}
