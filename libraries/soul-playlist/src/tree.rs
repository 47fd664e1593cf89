//! Playlist tree - mutation, query, and pairing engines
//!
//! Two parallel trees (category and onelevel) live over one set of playable
//! items. The playlist owns the node arena and the item table; external
//! collaborators (registry, notifier) are kept in sync through their traits.
//!
//! Single-writer model: no internal locking, the caller serializes access for
//! the duration of any call.

use crate::error::{PlaylistError, Result};
use crate::node::Node;
use crate::notify::{ChangeNotifier, NullNotifier};
use crate::registry::{ItemRegistry, MemoryRegistry};
use crate::types::{
    DeleteMode, GroupingConfig, ItemId, ItemKind, MediaItem, NodeFlags, NodeId, Position,
};
use std::collections::HashMap;
use tracing::debug;

/// Item-table slot
///
/// An item stays alive as long as any node holds it; paired nodes in the two
/// trees hold the same item.
#[derive(Debug, Clone)]
struct ItemSlot {
    item: MediaItem,
    holders: usize,
}

/// Hierarchical playlist over two parallel trees
///
/// Nodes live in an arena keyed by [`NodeId`]; parent links are non-owning
/// handles back into it. All structural mutation goes through this type so
/// the children sequences and parent back-references stay mutually
/// consistent.
pub struct Playlist {
    pub(crate) nodes: HashMap<NodeId, Node>,
    items: HashMap<ItemId, ItemSlot>,
    next_node_id: u64,
    next_item_id: u64,
    root_category: NodeId,
    root_onelevel: NodeId,
    registry: Box<dyn ItemRegistry>,
    notifier: Box<dyn ChangeNotifier>,
}

impl Playlist {
    /// Create a playlist with the given collaborators
    ///
    /// Both tree roots are created and registered immediately.
    pub fn new(registry: Box<dyn ItemRegistry>, notifier: Box<dyn ChangeNotifier>) -> Self {
        let mut playlist = Self {
            nodes: HashMap::new(),
            items: HashMap::new(),
            next_node_id: 0,
            next_item_id: 0,
            root_category: NodeId::new(0),
            root_onelevel: NodeId::new(0),
            registry,
            notifier,
        };
        playlist.root_category = playlist.create_root("Playlist");
        playlist.root_onelevel = playlist.create_root("Playlist");
        playlist
    }

    /// Root of the category tree
    pub fn root_category(&self) -> NodeId {
        self.root_category
    }

    /// Root of the onelevel tree
    pub fn root_onelevel(&self) -> NodeId {
        self.root_onelevel
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up an item descriptor
    pub fn item(&self, id: ItemId) -> Option<&MediaItem> {
        self.items.get(&id).map(|slot| &slot.item)
    }

    /// Item descriptor wrapped by a node
    pub fn node_item(&self, node: NodeId) -> Option<&MediaItem> {
        self.item(self.nodes.get(&node)?.item)
    }

    /// Flag set of a node
    pub fn flags(&self, node: NodeId) -> Option<NodeFlags> {
        self.nodes.get(&node).map(|n| n.flags)
    }

    /// Mutable flag set of a node
    pub fn flags_mut(&mut self, node: NodeId) -> Option<&mut NodeFlags> {
        self.nodes.get_mut(&node).map(|n| &mut n.flags)
    }

    /// Set the grouped-view preference on an item descriptor
    pub fn set_prefers_grouped(&mut self, item: ItemId, prefers: bool) {
        if let Some(slot) = self.items.get_mut(&item) {
            slot.item.prefers_grouped = prefers;
        }
    }

    /// Bump the play count of the item behind a node
    ///
    /// Consumed by the unplayed-only traversal filter.
    pub fn mark_played(&mut self, node: NodeId) {
        if let Some(item) = self.nodes.get(&node).map(|n| n.item) {
            if let Some(slot) = self.items.get_mut(&item) {
                slot.item.play_count += 1;
            }
        }
    }

    /// The registry collaborator
    pub fn registry(&self) -> &dyn ItemRegistry {
        self.registry.as_ref()
    }

    /// Number of live nodes, roots included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ===== Mutation engine =====

    /// Create a container node
    ///
    /// When `item` is `None` a container descriptor is synthesized from
    /// `name`; otherwise the existing descriptor is shared (this is how
    /// paired nodes are built). The node is registered, appended as the last
    /// child of `parent` when one is given, and announced through the
    /// notifier with the `rebuild` hint.
    pub fn create_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        item: Option<ItemId>,
        rebuild: bool,
    ) -> Result<NodeId> {
        if let Some(parent) = parent {
            self.require_container(parent)?;
        }
        let item_id = match item {
            Some(id) => {
                self.retain_item(id)?;
                id
            }
            None => self.create_item(name, ItemKind::Container),
        };
        let id = self.alloc_node_id();
        self.nodes.insert(
            id,
            Node {
                id,
                item: item_id,
                parent: None,
                children: Some(Vec::new()),
                flags: NodeFlags::default(),
            },
        );
        self.registry.register(id);
        if let Some(parent) = parent {
            self.append(id, parent)?;
        }
        self.notifier.notify_added(id, parent, rebuild);
        Ok(id)
    }

    /// Create a leaf node wrapping a fresh track descriptor
    ///
    /// Appended as the last child of `parent`.
    pub fn create_leaf(&mut self, name: &str, parent: NodeId) -> Result<NodeId> {
        self.require_container(parent)?;
        let item_id = self.create_item(name, ItemKind::Track);
        let id = self.alloc_node_id();
        self.nodes.insert(
            id,
            Node {
                id,
                item: item_id,
                parent: None,
                children: None,
                flags: NodeFlags::default(),
            },
        );
        self.registry.register(id);
        self.append(id, parent)?;
        self.notifier.notify_added(id, Some(parent), true);
        Ok(id)
    }

    /// Insert a node into a container's children at the given position
    ///
    /// Sets the back-reference. A node still attached elsewhere is detached
    /// from its old parent first, so both sides of the relation stay
    /// consistent. `Position::At` beyond the child count appends.
    pub fn insert(&mut self, node: NodeId, parent: NodeId, position: Position) -> Result<()> {
        if !self.nodes.contains_key(&node) {
            return Err(PlaylistError::NodeNotFound(node));
        }
        self.require_container(parent)?;
        // Attaching a node above itself would corrupt the arena.
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == node {
                return Err(PlaylistError::WouldCycle { node, parent });
            }
            ancestor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        if let Some(old) = self.nodes.get(&node).and_then(|n| n.parent) {
            self.remove_from_parent(node, old);
        }
        let Some(children) = self.nodes.get_mut(&parent).and_then(|n| n.children.as_mut()) else {
            return Err(PlaylistError::NotAContainer(parent));
        };
        let index = match position {
            Position::End => children.len(),
            Position::At(i) => i.min(children.len()),
        };
        children.insert(index, node);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = Some(parent);
        }
        Ok(())
    }

    /// Append a node as the last child of a container
    pub fn append(&mut self, node: NodeId, parent: NodeId) -> Result<()> {
        self.insert(node, parent, Position::End)
    }

    /// Detach the first occurrence of a node from a container's children
    ///
    /// Clears the back-reference. Silent no-op when the node is not among the
    /// children (or `parent` is unknown or a leaf); the node itself is never
    /// altered beyond its parent link.
    pub fn remove_from_parent(&mut self, node: NodeId, parent: NodeId) {
        let Some(children) = self.nodes.get_mut(&parent).and_then(|n| n.children.as_mut()) else {
            return;
        };
        if let Some(pos) = children.iter().position(|&c| c == node) {
            children.remove(pos);
            if let Some(n) = self.nodes.get_mut(&node) {
                if n.parent == Some(parent) {
                    n.parent = None;
                }
            }
        }
    }

    /// Remove all children of a container
    ///
    /// Children are processed last to first: subcontainers are deleted
    /// recursively, leaves are destroyed through the registry only when the
    /// mode deletes items. The read-only override never applies below an
    /// `empty` call; read-only subcontainers survive regardless of `mode`.
    pub fn empty(&mut self, root: NodeId, mode: DeleteMode) -> Result<()> {
        self.require_container(root)?;
        self.delete_children(root, mode.without_force())
    }

    /// Recursively delete a container and its descendants
    ///
    /// Same descent as [`empty`](Self::empty), then `root` itself is
    /// deregistered, announced as deleted, detached from its parent, and
    /// freed - unless it is read-only and `mode` does not force, in which
    /// case the node is left in place (descendants already processed stay
    /// deleted). Children that survive the cascade are orphaned when the
    /// container goes away.
    pub fn delete(&mut self, root: NodeId, mode: DeleteMode) -> Result<()> {
        self.require_container(root)?;
        self.delete_children(root, mode)?;

        let Some(node) = self.nodes.get(&root) else {
            return Ok(());
        };
        if node.flags.read_only && !mode.forces() {
            debug!("node {root} is read-only, leaving it in place");
            return Ok(());
        }
        let parent = node.parent;

        // Collaborators hear about the deletion before memory is released.
        self.registry.deregister(root);
        self.notifier.notify_deleted(root);
        if let Some(parent) = parent {
            self.remove_from_parent(root, parent);
        }
        if let Some(node) = self.nodes.remove(&root) {
            if let Some(children) = &node.children {
                for &child in children {
                    if let Some(c) = self.nodes.get_mut(&child) {
                        c.parent = None;
                    }
                }
            }
            self.release_item(node.item);
        }
        Ok(())
    }

    fn delete_children(&mut self, root: NodeId, mode: DeleteMode) -> Result<()> {
        let Some(children) = self.nodes.get(&root).and_then(|n| n.children.clone()) else {
            return Err(PlaylistError::NotAContainer(root));
        };
        for &child in children.iter().rev() {
            let is_container = self.nodes.get(&child).map(Node::is_container);
            match is_container {
                Some(true) => self.delete(child, mode)?,
                Some(false) if mode.deletes_items() => self.delete_leaf(child),
                _ => {}
            }
        }
        Ok(())
    }

    /// Destroy a leaf through the registry's delete-item path
    fn delete_leaf(&mut self, leaf: NodeId) {
        debug!("deleting leaf {leaf}");
        let parent = self.nodes.get(&leaf).and_then(|n| n.parent);
        self.registry.delete_item(leaf);
        self.notifier.notify_deleted(leaf);
        if let Some(parent) = parent {
            self.remove_from_parent(leaf, parent);
        }
        if let Some(node) = self.nodes.remove(&leaf) {
            self.release_item(node.item);
        }
    }

    // ===== Query engine =====

    /// Search the immediate children of a node for an exact item-name match
    ///
    /// Returns the first match. `None` when `node` is a leaf or unknown.
    pub fn child_search_by_name(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let children = self.nodes.get(&node)?.children.as_deref()?;
        children
            .iter()
            .copied()
            .find(|&child| self.node_item(child).is_some_and(|item| item.name == name))
    }

    /// Count the entries under a node
    ///
    /// Immediate children plus the recursive count of container children.
    /// The sibling scan stops at the first leaf, so anything after a leaf
    /// sibling is counted shallowly; callers relying on this count must
    /// expect it for mixed leaf/container orders.
    pub fn children_count(&self, node: NodeId) -> usize {
        let Some(children) = self.nodes.get(&node).and_then(|n| n.children.as_deref()) else {
            return 0;
        };
        let mut count = children.len();
        for &child in children {
            if self.nodes.get(&child).map_or(true, Node::is_leaf) {
                break;
            }
            count += self.children_count(child);
        }
        count
    }

    // ===== Pairing engine =====

    /// Create a pair of nodes in the category and onelevel trees
    ///
    /// Both wrap the same item descriptor: the category node's item is
    /// reused, not duplicated, for the onelevel node. Service-discovery
    /// pairs are made read-only and skipped by playback traversals.
    pub fn pair_create(
        &mut self,
        name: &str,
        for_service_discovery: bool,
    ) -> Result<(NodeId, NodeId)> {
        let category = self.create_node(name, Some(self.root_category), None, true)?;
        let item = self
            .nodes
            .get(&category)
            .map(|n| n.item)
            .ok_or(PlaylistError::NodeNotFound(category))?;
        let onelevel = self.create_node(name, Some(self.root_onelevel), Some(item), true)?;
        if for_service_discovery {
            for id in [category, onelevel] {
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.flags.read_only = true;
                    node.flags.skip = true;
                }
            }
        }
        Ok((category, onelevel))
    }

    /// Resolve the preferred counterpart of a node directly under either root
    ///
    /// A category-tree child is preferred as-is when grouping is always on or
    /// its item prefers the grouped view; otherwise its onelevel sibling
    /// (same item id) is returned. Symmetric for onelevel-tree children.
    /// `None` when `node` is not a direct child of either root, or the
    /// counterpart does not exist.
    pub fn preferred_node(&self, node: NodeId, grouping: GroupingConfig) -> Option<NodeId> {
        let n = self.nodes.get(&node)?;
        let parent = n.parent?;
        if parent == self.root_category {
            if grouping.always_group || self.prefers_grouped(n.item) {
                return Some(node);
            }
            self.child_with_item(self.root_onelevel, n.item)
        } else if parent == self.root_onelevel {
            if grouping.never_group || !self.prefers_grouped(n.item) {
                return Some(node);
            }
            self.child_with_item(self.root_category, n.item)
        } else {
            None
        }
    }

    // ===== Internals =====

    fn create_root(&mut self, name: &str) -> NodeId {
        let item = self.create_item(name, ItemKind::Container);
        let id = self.alloc_node_id();
        self.nodes.insert(
            id,
            Node {
                id,
                item,
                parent: None,
                children: Some(Vec::new()),
                flags: NodeFlags::default(),
            },
        );
        self.registry.register(id);
        self.notifier.notify_added(id, None, true);
        id
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn create_item(&mut self, name: &str, kind: ItemKind) -> ItemId {
        let id = ItemId::new(self.next_item_id);
        self.next_item_id += 1;
        self.items.insert(
            id,
            ItemSlot {
                item: MediaItem {
                    id,
                    name: name.to_string(),
                    kind,
                    play_count: 0,
                    prefers_grouped: false,
                },
                holders: 1,
            },
        );
        id
    }

    fn retain_item(&mut self, id: ItemId) -> Result<()> {
        let slot = self
            .items
            .get_mut(&id)
            .ok_or(PlaylistError::ItemNotFound(id))?;
        slot.holders += 1;
        Ok(())
    }

    fn release_item(&mut self, id: ItemId) {
        if let Some(slot) = self.items.get_mut(&id) {
            slot.holders = slot.holders.saturating_sub(1);
            if slot.holders == 0 {
                self.items.remove(&id);
            }
        }
    }

    fn prefers_grouped(&self, item: ItemId) -> bool {
        self.items.get(&item).is_some_and(|s| s.item.prefers_grouped)
    }

    fn child_with_item(&self, root: NodeId, item: ItemId) -> Option<NodeId> {
        let children = self.nodes.get(&root)?.children.as_deref()?;
        children
            .iter()
            .copied()
            .find(|&c| self.nodes.get(&c).is_some_and(|n| n.item == item))
    }

    pub(crate) fn require_container(&self, node: NodeId) -> Result<()> {
        let n = self
            .nodes
            .get(&node)
            .ok_or(PlaylistError::NodeNotFound(node))?;
        if n.is_leaf() {
            return Err(PlaylistError::NotAContainer(node));
        }
        Ok(())
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(Box::new(MemoryRegistry::new()), Box::new(NullNotifier))
    }
}
