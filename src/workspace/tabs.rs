//! # Tab Session
//!
//! The open-file list behind the editor's tab strip. Tab order is owned
//! here, independent of the tree's child order, so dragging a tab around
//! never rearranges the explorer.
//!
//! Invariant: `current`, when set, is always a member of `open`. Every
//! mutator re-establishes this before returning.

use crate::workspace::tree::NodeId;

/// Ordered open-tab list plus the focused tab.
#[derive(Debug, Clone, Default)]
pub struct TabSession {
    open: Vec<NodeId>,
    current: Option<NodeId>,
}

impl TabSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tabs in strip order.
    pub fn open(&self) -> &[NodeId] {
        &self.open
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.open.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.open.iter().position(|tab| *tab == id)
    }

    /// Focus a tab, opening it at the end of the strip if necessary.
    pub fn select(&mut self, id: NodeId) {
        if !self.is_open(id) {
            self.open.push(id);
        }
        self.current = Some(id);
    }

    /// Close a tab. Closing the current tab focuses the tab that slides
    /// into its place, falling back to the new last tab, then to none.
    pub fn close(&mut self, id: NodeId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.open.remove(index);

        if self.current == Some(id) {
            self.current = self
                .open
                .get(index)
                .or_else(|| self.open.last())
                .copied();
        }
    }

    /// Close every tab except `id` and focus it. Unknown ids are ignored.
    pub fn close_others(&mut self, id: NodeId) {
        if !self.is_open(id) {
            return;
        }
        self.open.retain(|tab| *tab == id);
        self.current = Some(id);
    }

    /// Close every tab after `id` in strip order. If the current tab was
    /// among them, fall back per the `close` policy.
    pub fn close_right(&mut self, id: NodeId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let closed_current = self
            .current
            .and_then(|current| self.index_of(current))
            .is_some_and(|current_index| current_index > index);

        self.open.truncate(index + 1);
        if closed_current {
            self.current = self.open.last().copied();
        }
    }

    /// Adopt a new tab order. The permutation must contain exactly the ids
    /// currently open; anything else is rejected and the order is kept.
    ///
    /// Returns whether the order was applied.
    pub fn reorder(&mut self, new_order: &[NodeId]) -> bool {
        if new_order.len() != self.open.len() {
            tracing::debug!("reorder rejected: length mismatch");
            return false;
        }
        let mut sorted_new = new_order.to_vec();
        let mut sorted_open = self.open.clone();
        sorted_new.sort();
        sorted_open.sort();
        if sorted_new != sorted_open {
            tracing::debug!("reorder rejected: id set mismatch");
            return false;
        }
        self.open = new_order.to_vec();
        true
    }

    /// Swap a tab with its left neighbor.
    pub fn move_left(&mut self, id: NodeId) {
        if let Some(index) = self.index_of(id) {
            if index > 0 {
                self.open.swap(index, index - 1);
            }
        }
    }

    /// Swap a tab with its right neighbor.
    pub fn move_right(&mut self, id: NodeId) {
        if let Some(index) = self.index_of(id) {
            if index + 1 < self.open.len() {
                self.open.swap(index, index + 1);
            }
        }
    }

    /// Focus the next tab in strip order, wrapping around. A no-op with
    /// zero or one tab open.
    pub fn cycle_next(&mut self) {
        if self.open.len() < 2 {
            return;
        }
        let index = self
            .current
            .and_then(|current| self.index_of(current))
            .unwrap_or(0);
        self.current = Some(self.open[(index + 1) % self.open.len()]);
    }

    /// Focus the previous tab in strip order, wrapping around.
    pub fn cycle_previous(&mut self) {
        if self.open.len() < 2 {
            return;
        }
        let index = self
            .current
            .and_then(|current| self.index_of(current))
            .unwrap_or(0);
        self.current = Some(self.open[(index + self.open.len() - 1) % self.open.len()]);
    }

    /// Drop every tab whose id is in `ids` (used when tree nodes are
    /// deleted). Current falls back per the `close` policy.
    pub fn close_all_in(&mut self, ids: &[NodeId]) {
        for id in ids {
            self.close(*id);
        }
    }

    /// The membership invariant, checked by tests after every scenario.
    pub fn invariant_holds(&self) -> bool {
        match self.current {
            Some(current) => self.open.contains(&current),
            None => true,
        }
    }
}
