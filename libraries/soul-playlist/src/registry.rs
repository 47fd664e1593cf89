//! Item registry contract
//!
//! The playlist keeps an external registry informed about every node it
//! creates and destroys, so concurrent readers of the registry never observe
//! a dangling id. The registry is a collaborator, not part of the tree: the
//! engine only calls through this trait.

use crate::types::NodeId;
use std::collections::HashSet;

/// External index of all live playlist nodes
///
/// `deregister` and `delete_item` must be idempotent no-ops when the id is
/// already absent.
pub trait ItemRegistry: Send {
    /// Record a newly created node
    fn register(&mut self, node: NodeId);

    /// Drop a node from the index (the node itself is being detached/freed)
    fn deregister(&mut self, node: NodeId);

    /// Destroy the playable item backing a leaf node
    ///
    /// Implies deregistration of the node.
    fn delete_item(&mut self, node: NodeId);

    /// Whether the node is currently registered
    fn contains(&self, node: NodeId) -> bool;
}

/// In-memory registry
///
/// Default implementation backed by a hash set. Suitable for tests and for
/// consumers without an external index of their own.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    nodes: HashSet<NodeId>,
}

impl MemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no nodes are registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ItemRegistry for MemoryRegistry {
    fn register(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    fn deregister(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    fn delete_item(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}
