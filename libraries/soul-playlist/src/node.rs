//! Tree vertex type
//!
//! A node is either a container (ordered children, possibly empty) or a leaf
//! wrapping a single playable item. The two are distinguished by the children
//! slot itself: `None` means leaf, `Some(vec![])` means empty container. Only
//! true containers accept children.

use crate::types::{ItemId, NodeFlags, NodeId};

/// Playlist tree vertex
///
/// Lives in the playlist's node arena. The parent link is a non-owning handle
/// back into the arena and always names the container whose children sequence
/// currently includes this node; the mutation engine keeps both sides in sync.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) item: ItemId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<Vec<NodeId>>,
    pub(crate) flags: NodeFlags,
}

impl Node {
    /// Node identifier
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Id of the playable-item descriptor this node wraps
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Owning container, or `None` for a root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children, or `None` for a leaf
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    /// Flag set
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether this node is a leaf (no children slot)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether this node is a container (children slot present, possibly empty)
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Number of immediate children (0 for leaves)
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(children: Vec<NodeId>) -> Node {
        Node {
            id: NodeId::new(1),
            item: ItemId::new(1),
            parent: None,
            children: Some(children),
            flags: NodeFlags::default(),
        }
    }

    #[test]
    fn empty_container_is_not_a_leaf() {
        let node = container(vec![]);
        assert!(node.is_container());
        assert!(!node.is_leaf());
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.children(), Some(&[][..]));
    }

    #[test]
    fn leaf_has_no_children_slot() {
        let node = Node {
            id: NodeId::new(2),
            item: ItemId::new(2),
            parent: Some(NodeId::new(1)),
            children: None,
            flags: NodeFlags::default(),
        };
        assert!(node.is_leaf());
        assert!(!node.is_container());
        assert_eq!(node.children(), None);
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn child_count_reflects_children() {
        let node = container(vec![NodeId::new(2), NodeId::new(3)]);
        assert_eq!(node.child_count(), 2);
    }
}
