//! Tree walking
//!
//! Pre-order depth-first traversal over a bounded subtree, read-only over the
//! arena. A `None` cursor means "before the first element". Exhaustion is a
//! `None` result; errors are reserved for precondition violations (leaf used
//! as a root, cursor outside the subtree).

use crate::error::{PlaylistError, Result};
use crate::tree::Playlist;
use crate::types::{LeafFilter, NodeId};
use tracing::{debug, trace};

impl Playlist {
    /// Next item in pre-order within the subtree rooted at `root`
    ///
    /// A non-empty container descends into its first child; otherwise the
    /// next sibling is taken, climbing to ancestor siblings ("uncles") when a
    /// level is exhausted. `None` cursor starts before `root`'s first child.
    /// Returns `Ok(None)` once the subtree is exhausted.
    pub fn next_item(&self, root: NodeId, current: Option<NodeId>) -> Result<Option<NodeId>> {
        self.check_traversal(root, current)?;
        let Some(current) = current else {
            return Ok(self.first_child(root));
        };
        if let Some(&first) = self
            .nodes
            .get(&current)
            .and_then(|n| n.children.as_ref())
            .and_then(|c| c.first())
        {
            return Ok(Some(first));
        }
        if current == root {
            // empty root, nothing to walk
            return Ok(None);
        }
        let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent) else {
            return Ok(None);
        };
        let siblings = self.children_of(parent);
        match siblings.iter().position(|&c| c == current) {
            Some(pos) if pos + 1 < siblings.len() => Ok(Some(siblings[pos + 1])),
            _ => {
                if parent == root {
                    trace!("node {current} is the last item under root {root}");
                    return Ok(None);
                }
                trace!("node {current} is the last of its level, looking for an uncle");
                Ok(self.next_uncle(current, root))
            }
        }
    }

    /// Previous item, the mirror of [`next_item`](Self::next_item)
    ///
    /// A non-empty container descends into its *last* child; a `None` cursor
    /// starts after `root`'s last child.
    pub fn prev_item(&self, root: NodeId, current: Option<NodeId>) -> Result<Option<NodeId>> {
        self.check_traversal(root, current)?;
        let Some(current) = current else {
            return Ok(self.last_child(root));
        };
        if let Some(&last) = self
            .nodes
            .get(&current)
            .and_then(|n| n.children.as_ref())
            .and_then(|c| c.last())
        {
            return Ok(Some(last));
        }
        if current == root {
            return Ok(None);
        }
        let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent) else {
            return Ok(None);
        };
        let siblings = self.children_of(parent);
        match siblings.iter().position(|&c| c == current) {
            Some(pos) if pos > 0 => Ok(Some(siblings[pos - 1])),
            _ => {
                if parent == root {
                    trace!("node {current} is the first item under root {root}");
                    return Ok(None);
                }
                trace!("node {current} is the first of its level, looking for an uncle");
                Ok(self.prev_uncle(current, root))
            }
        }
    }

    /// Next leaf satisfying the filters, stepping with [`next_item`](Self::next_item)
    ///
    /// Containers encountered mid-walk pass through and are never returned.
    pub fn next_leaf(
        &self,
        root: NodeId,
        current: Option<NodeId>,
        filter: LeafFilter,
    ) -> Result<Option<NodeId>> {
        debug!("finding next leaf after {current:?} within {root}");
        let mut cursor = current;
        loop {
            match self.next_item(root, cursor)? {
                None => {
                    debug!("at end of node {root}");
                    return Ok(None);
                }
                Some(next) => {
                    if self.leaf_passes(next, filter) {
                        return Ok(Some(next));
                    }
                    cursor = Some(next);
                }
            }
        }
    }

    /// Previous leaf satisfying the filters
    pub fn prev_leaf(
        &self,
        root: NodeId,
        current: Option<NodeId>,
        filter: LeafFilter,
    ) -> Result<Option<NodeId>> {
        debug!("finding previous leaf before {current:?} within {root}");
        let mut cursor = current;
        loop {
            match self.prev_item(root, cursor)? {
                None => {
                    debug!("at beginning of node {root}");
                    return Ok(None);
                }
                Some(prev) => {
                    if self.leaf_passes(prev, filter) {
                        return Ok(Some(prev));
                    }
                    cursor = Some(prev);
                }
            }
        }
    }

    /// Last leaf in document order under `root`
    ///
    /// Children are scanned last to first, recursing into the last non-empty
    /// container. `None` when `root` has no descendant leaves.
    pub fn last_leaf(&self, root: NodeId) -> Result<Option<NodeId>> {
        self.require_container(root)?;
        Ok(self.last_leaf_under(root))
    }

    /// All enabled leaves under `root`, in document order
    pub fn all_enabled_children(&self, root: NodeId) -> Result<Vec<NodeId>> {
        let mut leaves = Vec::new();
        let mut cursor = None;
        while let Some(next) = self.next_leaf(root, cursor, LeafFilter::ENABLED)? {
            leaves.push(next);
            cursor = Some(next);
        }
        Ok(leaves)
    }

    // ===== Internals =====

    fn check_traversal(&self, root: NodeId, current: Option<NodeId>) -> Result<()> {
        self.require_container(root)?;
        if let Some(current) = current {
            if !self.nodes.contains_key(&current) {
                return Err(PlaylistError::NodeNotFound(current));
            }
            if !self.in_subtree(current, root) {
                return Err(PlaylistError::OutsideSubtree {
                    node: current,
                    root,
                });
            }
        }
        Ok(())
    }

    fn in_subtree(&self, node: NodeId, root: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == root {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Walk up from an exhausted level to the next ancestor sibling
    ///
    /// At each ancestor the parent's position among *its* siblings is
    /// located; the following sibling, if any, is the uncle. Terminates with
    /// `None` once the climb reaches `root`.
    fn next_uncle(&self, node: NodeId, root: NodeId) -> Option<NodeId> {
        let mut parent = self.nodes.get(&node)?.parent?;
        loop {
            let grandparent = self.nodes.get(&parent)?.parent?;
            let siblings = self.children_of(grandparent);
            if let Some(pos) = siblings.iter().position(|&c| c == parent) {
                if pos + 1 < siblings.len() {
                    trace!("parent {parent} found as child {pos} of grandparent {grandparent}");
                    return Some(siblings[pos + 1]);
                }
            }
            if grandparent == root {
                return None;
            }
            parent = grandparent;
        }
    }

    fn prev_uncle(&self, node: NodeId, root: NodeId) -> Option<NodeId> {
        let mut parent = self.nodes.get(&node)?.parent?;
        loop {
            let grandparent = self.nodes.get(&parent)?.parent?;
            let siblings = self.children_of(grandparent);
            if let Some(pos) = siblings.iter().position(|&c| c == parent) {
                if pos > 0 {
                    trace!("parent {parent} found as child {pos} of grandparent {grandparent}");
                    return Some(siblings[pos - 1]);
                }
            }
            if grandparent == root {
                return None;
            }
            parent = grandparent;
        }
    }

    fn last_leaf_under(&self, root: NodeId) -> Option<NodeId> {
        let children = self.nodes.get(&root)?.children.as_deref()?;
        for &child in children.iter().rev() {
            match self.nodes.get(&child) {
                Some(n) if n.is_leaf() => return Some(child),
                Some(n) if n.child_count() > 0 => {
                    if let Some(leaf) = self.last_leaf_under(child) {
                        return Some(leaf);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn leaf_passes(&self, node: NodeId, filter: LeafFilter) -> bool {
        let Some(n) = self.nodes.get(&node) else {
            return false;
        };
        if n.is_container() {
            return false;
        }
        if filter.enabled_only && n.flags().disabled {
            return false;
        }
        if filter.unplayed_only && self.node_item(node).map_or(0, |item| item.play_count) != 0 {
            return false;
        }
        true
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.children.as_ref()?.first().copied()
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.children.as_ref()?.last().copied()
    }

    fn children_of(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .and_then(|n| n.children.as_deref())
            .unwrap_or(&[])
    }
}
