//! # File Tree
//!
//! Arena-backed tree of file and folder nodes. Nodes are addressed by stable
//! [`NodeId`] handles; folders own an ordered child list and files own their
//! content, so the two cannot be confused at the type level.
//!
//! Mutation is in place. Every applied mutation bumps a version counter that
//! the rendering layer uses for change detection; operations on ids that are
//! not in the tree leave it untouched and do not bump the version.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};

use crate::workspace::language::Language;

new_key_type! {
    /// Stable handle for a node in the tree arena.
    pub struct NodeId;
}

/// Whether a node is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone)]
enum NodeData {
    File { content: String, language: Language },
    Folder { children: Vec<NodeId> },
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    data: NodeData,
}

/// One row of the explorer view: a node plus its indentation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
}

/// The in-memory workspace tree.
///
/// Cloning produces a fully independent deep copy; the clone shares no node
/// storage with the original.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    expanded: FxHashSet<NodeId>,
    version: u64,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic change counter; bumped once per applied mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.arena.get(id).map(|n| match n.data {
            NodeData::File { .. } => NodeKind::File,
            NodeData::Folder { .. } => NodeKind::Folder,
        })
    }

    pub fn is_folder(&self, id: NodeId) -> bool {
        self.kind(id) == Some(NodeKind::Folder)
    }

    pub fn is_file(&self, id: NodeId) -> bool {
        self.kind(id) == Some(NodeKind::File)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.arena.get(id).map(|n| &n.data) {
            Some(NodeData::Folder { children }) => children.as_slice(),
            _ => &[],
        }
    }

    pub fn content(&self, id: NodeId) -> Option<&str> {
        match self.arena.get(id).map(|n| &n.data) {
            Some(NodeData::File { content, .. }) => Some(content.as_str()),
            _ => None,
        }
    }

    pub fn language(&self, id: NodeId) -> Option<Language> {
        match self.arena.get(id).map(|n| &n.data) {
            Some(NodeData::File { language, .. }) => Some(*language),
            _ => None,
        }
    }

    /// Insert a file under `parent` (or as a root when `parent` is `None`).
    ///
    /// Returns `None` without touching the tree when the parent is missing
    /// or is not a folder.
    pub fn insert_file(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        content: &str,
    ) -> Option<NodeId> {
        self.insert_node(
            parent,
            Node {
                name: name.to_string(),
                parent,
                data: NodeData::File {
                    content: content.to_string(),
                    language: Language::from_name(name),
                },
            },
        )
    }

    /// Insert an empty folder under `parent` (or as a root).
    pub fn insert_folder(&mut self, parent: Option<NodeId>, name: &str) -> Option<NodeId> {
        self.insert_node(
            parent,
            Node {
                name: name.to_string(),
                parent,
                data: NodeData::Folder {
                    children: Vec::new(),
                },
            },
        )
    }

    fn insert_node(&mut self, parent: Option<NodeId>, node: Node) -> Option<NodeId> {
        if let Some(parent_id) = parent {
            if !matches!(
                self.arena.get(parent_id).map(|n| &n.data),
                Some(NodeData::Folder { .. })
            ) {
                tracing::debug!("insert ignored: parent is missing or not a folder");
                return None;
            }
        }

        let id = self.arena.insert(node);
        match parent {
            Some(parent_id) => {
                if let Some(NodeData::Folder { children }) =
                    self.arena.get_mut(parent_id).map(|n| &mut n.data)
                {
                    children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        self.version += 1;
        Some(id)
    }

    /// Rename a node. Files re-derive their language from the new name.
    /// Unknown ids are ignored.
    pub fn rename(&mut self, id: NodeId, new_name: &str) {
        let Some(node) = self.arena.get_mut(id) else {
            tracing::debug!("rename ignored: unknown node id");
            return;
        };
        node.name = new_name.to_string();
        if let NodeData::File { language, .. } = &mut node.data {
            *language = Language::from_name(new_name);
        }
        self.version += 1;
    }

    /// Replace a file's content. Folders and unknown ids are ignored.
    pub fn set_content(&mut self, id: NodeId, content: String) {
        match self.arena.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::File { content: slot, .. }) => {
                *slot = content;
                self.version += 1;
            }
            _ => tracing::debug!("set_content ignored: not a file"),
        }
    }

    /// Remove a node and its whole subtree.
    ///
    /// Returns every removed id (pre-order) so the caller can drop any state
    /// keyed on them, e.g. open editor tabs. An unknown id removes nothing.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.arena.contains_key(id) {
            tracing::debug!("remove ignored: unknown node id");
            return Vec::new();
        }

        let removed = self.collect_subtree(id);

        match self.parent(id) {
            Some(parent_id) => {
                if let Some(NodeData::Folder { children }) =
                    self.arena.get_mut(parent_id).map(|n| &mut n.data)
                {
                    children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        for node_id in &removed {
            self.arena.remove(*node_id);
            self.expanded.remove(node_id);
        }
        self.version += 1;
        removed
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Expand or collapse a folder. Files and unknown ids are ignored.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if !self.is_folder(id) {
            tracing::debug!("set_expanded ignored: not a folder");
            return;
        }
        let changed = if expanded {
            self.expanded.insert(id)
        } else {
            self.expanded.remove(&id)
        };
        if changed {
            self.version += 1;
        }
    }

    pub fn toggle_expanded(&mut self, id: NodeId) {
        let expanded = self.is_expanded(id);
        self.set_expanded(id, !expanded);
    }

    /// Pre-order traversal of every node, folders and files alike.
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.arena.len());
        for root in &self.roots {
            self.push_subtree(*root, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.push_subtree(id, &mut out);
        out
    }

    fn push_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in self.children(id) {
            self.push_subtree(*child, out);
        }
    }

    /// Pre-order traversal that descends only into expanded folders.
    /// This is exactly what the explorer pane displays.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for root in &self.roots {
            self.push_visible(*root, 0, &mut rows);
        }
        rows
    }

    fn push_visible(&self, id: NodeId, depth: usize, rows: &mut Vec<VisibleRow>) {
        rows.push(VisibleRow { id, depth });
        if self.is_folder(id) && self.is_expanded(id) {
            for child in self.children(id) {
                self.push_visible(*child, depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (FileTree, NodeId, NodeId) {
        let mut tree = FileTree::new();
        let root = tree.insert_folder(None, "project").expect("root folder");
        let file = tree.insert_file(Some(root), "main.rs", "fn main() {}").expect("file");
        (tree, root, file)
    }

    #[test]
    fn insert_under_file_is_ignored() {
        let (mut tree, _root, file) = sample();
        let version = tree.version();
        assert!(tree.insert_file(Some(file), "nested.rs", "").is_none());
        assert_eq!(tree.version(), version);
    }

    #[test]
    fn remove_returns_whole_subtree() {
        let (mut tree, root, file) = sample();
        let sub = tree.insert_folder(Some(root), "src").expect("folder");
        let inner = tree.insert_file(Some(sub), "lib.rs", "").expect("file");

        let removed = tree.remove(root);
        assert_eq!(removed, vec![root, file, sub, inner]);
        assert_eq!(tree.node_count(), 0);
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn rename_rederives_language() {
        let (mut tree, _root, file) = sample();
        assert_eq!(tree.language(file), Some(Language::Rust));
        tree.rename(file, "main.py");
        assert_eq!(tree.language(file), Some(Language::Python));
    }

    #[test]
    fn expansion_only_applies_to_folders() {
        let (mut tree, root, file) = sample();
        tree.set_expanded(file, true);
        assert!(!tree.is_expanded(file));
        tree.set_expanded(root, true);
        assert!(tree.is_expanded(root));
    }

    #[test]
    fn visible_rows_respect_expansion() {
        let (mut tree, root, _file) = sample();
        assert_eq!(tree.visible_rows().len(), 1);
        tree.set_expanded(root, true);
        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].depth, 1);
    }
}
