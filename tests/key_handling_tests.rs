//! Keyboard event handling tests
//!
//! Key presses go through `ui::handle_key` exactly as the event loop sends
//! them; these tests check the resulting state transitions per focus pane
//! and modal, plus the dispatch requests produced for the responders.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vibecode::session::EntryStatus;
use vibecode::ui::theme::Theme;
use vibecode::ui::{handle_key, App, DispatchRequest, FocusPane, Modal};
use vibecode::workspace::tree::{FileTree, NodeId};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn type_str(app: &mut App, text: &str) {
    for ch in text.chars() {
        handle_key(app, key(KeyCode::Char(ch)));
    }
}

/// App over a root folder with two files; nothing open, explorer focused.
fn create_test_app() -> (App, NodeId, Vec<NodeId>) {
    let mut tree = FileTree::new();
    let root = tree.insert_folder(None, "project").expect("root");
    let a = tree.insert_file(Some(root), "a.rs", "let a = 1;").expect("a");
    let b = tree.insert_file(Some(root), "b.rs", "let b = 2;").expect("b");
    tree.set_expanded(root, true);
    let app = App::new(tree, root, Theme::default_theme().clone());
    (app, root, vec![a, b])
}

#[test]
fn q_quits_from_the_explorer() {
    let (mut app, _root, _files) = create_test_app();
    assert!(!app.should_quit);
    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn q_types_into_the_editor_instead_of_quitting() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.focus = FocusPane::Editor;

    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(!app.should_quit);
    assert_eq!(app.tree.content(files[0]), Some("qlet a = 1;"));
    assert!(app.is_dirty(files[0]));
}

#[test]
fn ctrl_q_quits_from_anywhere() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.focus = FocusPane::Editor;
    handle_key(&mut app, ctrl('q'));
    assert!(app.should_quit);
}

#[test]
fn enter_on_a_file_opens_it_and_focuses_the_editor() {
    let (mut app, _root, files) = create_test_app();
    // Row 0 is the root; row 1 is a.rs.
    handle_key(&mut app, key(KeyCode::Down));
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.current_file(), Some(files[0]));
    assert_eq!(app.focus, FocusPane::Editor);
}

#[test]
fn enter_on_a_folder_toggles_it() {
    let (mut app, root, _files) = create_test_app();
    assert!(app.tree.is_expanded(root));
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(!app.tree.is_expanded(root));
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(app.tree.is_expanded(root));
}

#[test]
fn tab_cycles_focus_outside_the_editor() {
    let (mut app, _root, _files) = create_test_app();
    assert_eq!(app.focus, FocusPane::Explorer);
    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus, FocusPane::Editor);
}

#[test]
fn tab_indents_inside_the_editor() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.focus = FocusPane::Editor;
    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus, FocusPane::Editor);
    assert_eq!(app.tree.content(files[0]), Some("  let a = 1;"));
}

#[test]
fn ctrl_w_closes_the_current_tab() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.open_file(files[1]);
    app.focus = FocusPane::Editor;
    handle_key(&mut app, ctrl('w'));
    assert_eq!(app.tabs.open(), &files[..1]);
}

#[test]
fn ctrl_arrows_switch_tabs() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.open_file(files[1]);
    app.focus = FocusPane::Editor;

    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL),
    );
    assert_eq!(app.current_file(), Some(files[0]));
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL),
    );
    assert_eq!(app.current_file(), Some(files[1]));
}

#[test]
fn alt_arrows_reorder_tabs() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.open_file(files[1]);
    app.open_file(files[0]);
    app.focus = FocusPane::Editor;

    handle_key(&mut app, KeyEvent::new(KeyCode::Right, KeyModifiers::ALT));
    assert_eq!(app.tabs.open(), &[files[1], files[0]]);
}

#[test]
fn terminal_enter_produces_a_dispatch_request() {
    let (mut app, _root, _files) = create_test_app();
    app.focus = FocusPane::Terminal;
    type_str(&mut app, "echo hi");
    assert_eq!(app.terminal_input, "echo hi");

    let request = handle_key(&mut app, key(KeyCode::Enter));
    match request {
        Some(DispatchRequest::Command { command, .. }) => assert_eq!(command, "echo hi"),
        other => panic!("expected a command dispatch, got {other:?}"),
    }
    assert!(app.terminal.is_running());
    assert!(app.terminal_input.is_empty());
}

#[test]
fn terminal_input_is_disabled_while_running() {
    let (mut app, _root, _files) = create_test_app();
    app.focus = FocusPane::Terminal;
    type_str(&mut app, "pwd");
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(app.terminal.is_running());

    // Keystrokes while running change nothing and dispatch nothing.
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('x'))), None);
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
    assert!(app.terminal_input.is_empty());
}

#[test]
fn clear_is_handled_locally_without_dispatch() {
    let (mut app, _root, _files) = create_test_app();
    app.terminal
        .append_local("ls", "listing", EntryStatus::Success);
    app.focus = FocusPane::Terminal;

    type_str(&mut app, "clear");
    let request = handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(request, None);
    assert!(app.terminal.entries().is_empty());
    assert!(!app.terminal.is_running());
}

#[test]
fn arrow_keys_walk_the_terminal_history() {
    let (mut app, _root, _files) = create_test_app();
    app.focus = FocusPane::Terminal;

    type_str(&mut app, "ls");
    handle_key(&mut app, key(KeyCode::Enter));
    let epoch = app.terminal.epoch();
    app.terminal.resolve(epoch, "ls", "", EntryStatus::Success);

    type_str(&mut app, "pwd");
    handle_key(&mut app, key(KeyCode::Enter));
    let epoch = app.terminal.epoch();
    app.terminal.resolve(epoch, "pwd", "", EntryStatus::Success);

    handle_key(&mut app, key(KeyCode::Up));
    assert_eq!(app.terminal_input, "pwd");
    handle_key(&mut app, key(KeyCode::Up));
    assert_eq!(app.terminal_input, "ls");
    handle_key(&mut app, key(KeyCode::Up));
    assert_eq!(app.terminal_input, "ls");
    handle_key(&mut app, key(KeyCode::Down));
    assert_eq!(app.terminal_input, "pwd");
    handle_key(&mut app, key(KeyCode::Down));
    assert!(app.terminal_input.is_empty());
}

#[test]
fn assistant_enter_produces_a_chat_request_and_blocks_input() {
    let (mut app, _root, _files) = create_test_app();
    app.show_assistant = true;
    app.focus = FocusPane::Assistant;

    type_str(&mut app, "help me");
    let request = handle_key(&mut app, key(KeyCode::Enter));
    match request {
        Some(DispatchRequest::Chat { content, .. }) => assert_eq!(content, "help me"),
        other => panic!("expected a chat dispatch, got {other:?}"),
    }
    assert!(app.chat.is_waiting());

    // Input is disabled while waiting.
    handle_key(&mut app, key(KeyCode::Char('x')));
    assert!(app.chat_input.is_empty());
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
}

#[test]
fn ctrl_p_opens_the_palette_and_esc_closes_it() {
    let (mut app, _root, _files) = create_test_app();
    handle_key(&mut app, ctrl('p'));
    assert!(matches!(app.modal, Some(Modal::Palette(_))));
    handle_key(&mut app, key(KeyCode::Esc));
    assert!(app.modal.is_none());
}

#[test]
fn palette_enter_runs_the_selected_command() {
    let (mut app, _root, _files) = create_test_app();
    assert!(app.show_terminal);
    handle_key(&mut app, ctrl('p'));
    type_str(&mut app, "toggle terminal");
    handle_key(&mut app, key(KeyCode::Enter));
    assert!(app.modal.is_none());
    assert!(!app.show_terminal);
}

#[test]
fn new_file_prompt_creates_and_opens_the_file() {
    let (mut app, root, _files) = create_test_app();
    handle_key(&mut app, key(KeyCode::Char('n')));
    assert!(matches!(app.modal, Some(Modal::Prompt(_))));

    type_str(&mut app, "notes.md");
    handle_key(&mut app, key(KeyCode::Enter));

    assert!(app.modal.is_none());
    let current = app.current_file().expect("new file is open");
    assert_eq!(app.tree.name(current), Some("notes.md"));
    assert_eq!(app.tree.parent(current), Some(root));
}

#[test]
fn delete_confirm_removes_the_selected_node() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.focus = FocusPane::Explorer;
    // Select a.rs (row 1).
    handle_key(&mut app, key(KeyCode::Down));
    handle_key(&mut app, key(KeyCode::Char('d')));
    assert!(matches!(app.modal, Some(Modal::ConfirmDelete(_))));

    handle_key(&mut app, key(KeyCode::Enter));
    assert!(!app.tree.contains(files[0]));
    assert!(app.tabs.is_empty());
}

#[test]
fn ctrl_t_toggles_the_terminal_panel() {
    let (mut app, _root, _files) = create_test_app();
    assert!(app.show_terminal);
    handle_key(&mut app, ctrl('t'));
    assert!(!app.show_terminal);
    handle_key(&mut app, ctrl('t'));
    assert!(app.show_terminal);
}
