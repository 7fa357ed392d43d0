//! Seeded demo workspace.
//!
//! The shell has no real file I/O, so every session starts from the same
//! small project: a `project/` root with a `src/` folder, a readme, and a
//! config file. The entry file starts out open in the editor.

use crate::workspace::tree::{FileTree, NodeId};

const MAIN_RS: &str = r#"fn main() {
    println!("Welcome to Vibecode!");
    println!("Start editing to see changes");
}
"#;

const README_MD: &str = r#"# Vibecode Demo

A tiny sample project used to show off the mock IDE shell.

- Edit files in the editor pane
- Run canned commands in the terminal
- Ask the assistant for (canned) advice
"#;

const CARGO_TOML: &str = r#"[package]
name = "demo"
version = "0.1.0"
edition = "2021"
"#;

const UTIL_RS: &str = r#"pub fn greet(name: &str) -> String {
    format!("Hello, {name}!")
}
"#;

/// Build the demo tree. Returns the tree and the id of the file that should
/// start out open and focused.
pub fn seed() -> (FileTree, NodeId) {
    let mut tree = FileTree::new();

    let project = tree
        .insert_folder(None, "project")
        .expect("seeding a root folder cannot fail");
    let src = tree
        .insert_folder(Some(project), "src")
        .expect("seeding under a fresh folder cannot fail");

    let main_rs = tree
        .insert_file(Some(src), "main.rs", MAIN_RS)
        .expect("seeding under a fresh folder cannot fail");
    tree.insert_file(Some(src), "util.rs", UTIL_RS);
    tree.insert_file(Some(project), "README.md", README_MD);
    tree.insert_file(Some(project), "Cargo.toml", CARGO_TOML);

    tree.set_expanded(project, true);
    tree.set_expanded(src, true);

    (tree, main_rs)
}
