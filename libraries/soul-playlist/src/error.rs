//! Error types for playlist tree management
//!
//! Only precondition violations are errors. Search misses, traversal
//! exhaustion, and removal of an absent child are expected outcomes and are
//! reported as `None`, never through this type.

use crate::types::{ItemId, NodeId};
use thiserror::Error;

/// Playlist tree errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    /// A leaf was passed where a container is required
    #[error("node {0} is not a container")]
    NotAContainer(NodeId),

    /// Unknown node id
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    /// Unknown item id
    #[error("item {0} does not exist")]
    ItemNotFound(ItemId),

    /// Traversal cursor outside the subtree rooted at the given node
    #[error("node {node} is outside the subtree rooted at {root}")]
    OutsideSubtree {
        /// The supplied cursor
        node: NodeId,
        /// The traversal root
        root: NodeId,
    },

    /// Insertion that would make a node its own ancestor
    #[error("inserting node {node} under {parent} would create a cycle")]
    WouldCycle {
        /// The node being inserted
        node: NodeId,
        /// The target container
        parent: NodeId,
    },
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
