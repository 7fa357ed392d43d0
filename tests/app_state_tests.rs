//! Application state tests
//!
//! Tab-session invariants and the app-level glue between the tree, the
//! tabs, and the panels: close fallbacks, reorder validation, deletes that
//! close orphaned tabs, and focus cycling over hidden panels.

use vibecode::ui::theme::Theme;
use vibecode::ui::{App, FocusPane};
use vibecode::workspace::tree::{FileTree, NodeId};

/// Build an app over a root folder with three files, none open.
fn create_test_app() -> (App, NodeId, Vec<NodeId>) {
    let mut tree = FileTree::new();
    let root = tree.insert_folder(None, "project").expect("root");
    let a = tree.insert_file(Some(root), "a.rs", "// a").expect("a");
    let b = tree.insert_file(Some(root), "b.rs", "// b").expect("b");
    let c = tree.insert_file(Some(root), "c.rs", "// c").expect("c");
    tree.set_expanded(root, true);

    let app = App::new(tree, root, Theme::default_theme().clone());
    (app, root, vec![a, b, c])
}

#[test]
fn select_opens_implicitly() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    assert_eq!(app.tabs.open(), &files[..1]);
    assert_eq!(app.current_file(), Some(files[0]));
    assert!(app.tabs.invariant_holds());
}

#[test]
fn closing_the_only_tab_clears_current() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.close_current_tab();
    assert!(app.tabs.is_empty());
    assert_eq!(app.current_file(), None);
    assert!(app.tabs.invariant_holds());
}

#[test]
fn closing_current_selects_the_adjacent_tab() {
    let (mut app, _root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.open_file(files[1]);
    app.close_current_tab();
    // The tab that slid into b's index is c.
    assert_eq!(app.current_file(), Some(files[2]));
    assert!(app.tabs.invariant_holds());
}

#[test]
fn close_right_scenario_from_the_last_tab() {
    let (mut app, _root, files) = create_test_app();
    // Open A, B, C in that order; focus C.
    for file in &files {
        app.open_file(*file);
    }
    assert_eq!(app.current_file(), Some(files[2]));

    // Close to the right of A: only A remains and becomes current.
    app.tabs.close_right(files[0]);
    assert_eq!(app.tabs.open(), &files[..1]);
    assert_eq!(app.current_file(), Some(files[0]));
    assert!(app.tabs.invariant_holds());
}

#[test]
fn close_right_keeps_current_when_it_survives() {
    let (mut app, _root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.open_file(files[0]);
    app.tabs.close_right(files[1]);
    assert_eq!(app.tabs.open(), &files[..2]);
    assert_eq!(app.current_file(), Some(files[0]));
}

#[test]
fn close_others_keeps_only_the_given_tab() {
    let (mut app, _root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.tabs.close_others(files[1]);
    assert_eq!(app.tabs.open(), &files[1..2]);
    assert_eq!(app.current_file(), Some(files[1]));
}

#[test]
fn reorder_rejects_foreign_and_missing_ids() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    app.open_file(files[1]);

    // Missing an id.
    assert!(!app.tabs.reorder(&files[..1]));
    // Foreign id in place of an open one.
    assert!(!app.tabs.reorder(&[files[0], files[2]]));
    // Duplicate id.
    assert!(!app.tabs.reorder(&[files[0], files[0]]));

    assert_eq!(app.tabs.open(), &files[..2]);

    // The real permutation is accepted.
    assert!(app.tabs.reorder(&[files[1], files[0]]));
    assert_eq!(app.tabs.open(), &[files[1], files[0]]);
    assert!(app.tabs.invariant_holds());
}

#[test]
fn cycling_a_single_tab_is_idempotent() {
    let (mut app, _root, files) = create_test_app();
    app.open_file(files[0]);
    for _ in 0..5 {
        app.next_tab();
        assert_eq!(app.current_file(), Some(files[0]));
    }
}

#[test]
fn cycling_wraps_circularly() {
    let (mut app, _root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.open_file(files[0]);
    app.next_tab();
    assert_eq!(app.current_file(), Some(files[1]));
    app.next_tab();
    app.next_tab();
    assert_eq!(app.current_file(), Some(files[0]));
    app.previous_tab();
    assert_eq!(app.current_file(), Some(files[2]));
}

#[test]
fn move_tab_right_swaps_neighbors() {
    let (mut app, _root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.open_file(files[0]);
    app.move_tab_right();
    assert_eq!(app.tabs.open(), &[files[1], files[0], files[2]]);
    // Still focused on the moved tab.
    assert_eq!(app.current_file(), Some(files[0]));
}

#[test]
fn deleting_a_folder_closes_tabs_underneath() {
    let (mut app, root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.delete_node(root);
    assert!(app.tabs.is_empty());
    assert_eq!(app.current_file(), None);
    assert_eq!(app.tree.node_count(), 0);
    assert!(app.tabs.invariant_holds());
}

#[test]
fn deleting_one_file_keeps_the_rest_open() {
    let (mut app, _root, files) = create_test_app();
    for file in &files {
        app.open_file(*file);
    }
    app.open_file(files[1]);
    app.delete_node(files[1]);
    assert_eq!(app.tabs.open(), &[files[0], files[2]]);
    assert!(app.tabs.invariant_holds());
}

#[test]
fn focus_cycle_skips_hidden_panels() {
    let (mut app, _root, _files) = create_test_app();
    app.show_terminal = false;
    app.show_assistant = false;

    assert_eq!(app.focus, FocusPane::Explorer);
    app.toggle_focus();
    assert_eq!(app.focus, FocusPane::Editor);
    app.toggle_focus();
    assert_eq!(app.focus, FocusPane::Explorer);

    app.show_terminal = true;
    app.toggle_focus();
    app.toggle_focus();
    assert_eq!(app.focus, FocusPane::Terminal);
    app.toggle_focus();
    assert_eq!(app.focus, FocusPane::Explorer);
}

#[test]
fn hiding_the_focused_panel_moves_focus_to_the_editor() {
    let (mut app, _root, _files) = create_test_app();
    app.focus = FocusPane::Terminal;
    app.toggle_terminal();
    assert!(!app.show_terminal);
    assert_eq!(app.focus, FocusPane::Editor);
}

#[test]
fn explorer_navigation_wraps() {
    let (mut app, _root, _files) = create_test_app();
    // root + 3 files visible.
    assert_eq!(app.visible_rows().len(), 4);
    app.explorer_previous();
    assert_eq!(app.explorer_index, 3);
    app.explorer_next();
    assert_eq!(app.explorer_index, 0);
}
