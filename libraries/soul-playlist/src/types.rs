//! Core types for playlist tree management

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier
///
/// Unique within the owning playlist. Doubles as the arena key and the id
/// external collaborators use for lookup and removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a node ID from its raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Media item identifier
///
/// Identifies the playable-item descriptor a node wraps. Paired nodes in the
/// category and onelevel trees share one item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Create an item ID from its raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of playable-item descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Synthesized descriptor backing a container node
    Container,

    /// A single playable track
    Track,
}

/// Playable-item descriptor
///
/// Owned by the playlist's item table; nodes reference it by [`ItemId`].
/// A descriptor outlives every node holding it and is released with the last
/// holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Descriptor identifier
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Container or track
    pub kind: ItemKind,

    /// Number of times this item has been played
    pub play_count: u32,

    /// Whether this item prefers the grouped (category) view
    pub prefers_grouped: bool,
}

/// Per-node flag set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Deletion is refused unless forced
    pub read_only: bool,

    /// Excluded from some traversals
    pub skip: bool,

    /// Duplicate/disabled, excluded when the enabled-only filter is active
    pub disabled: bool,
}

/// Grouping preferences for preferred-node resolution
///
/// Passed explicitly into [`Playlist::preferred_node`](crate::Playlist::preferred_node)
/// rather than read from ambient state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Always resolve to the category tree
    pub always_group: bool,

    /// Always resolve to the onelevel tree
    pub never_group: bool,
}

/// Recursive deletion policy
///
/// Makes the delete-items and force combinations explicit instead of passing
/// a pair of booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteMode {
    /// Remove subcontainers, keep leaf items; read-only nodes survive
    Cascade,

    /// Remove subcontainers and delete leaf items; read-only nodes survive
    CascadeItems,

    /// Remove subcontainers, keep leaf items; read-only is overridden
    CascadeForced,

    /// Remove subcontainers and delete leaf items; read-only is overridden
    CascadeItemsForced,
}

impl DeleteMode {
    /// Whether leaf items are destroyed through the registry
    pub fn deletes_items(self) -> bool {
        matches!(self, Self::CascadeItems | Self::CascadeItemsForced)
    }

    /// Whether the read-only flag is overridden
    pub fn forces(self) -> bool {
        matches!(self, Self::CascadeForced | Self::CascadeItemsForced)
    }

    /// Same item disposition with the read-only override stripped
    pub fn without_force(self) -> Self {
        match self {
            Self::Cascade | Self::CascadeForced => Self::Cascade,
            Self::CascadeItems | Self::CascadeItemsForced => Self::CascadeItems,
        }
    }
}

/// Leaf-selection filters for next/previous traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafFilter {
    /// Exclude leaves flagged disabled
    pub enabled_only: bool,

    /// Exclude leaves whose item has a nonzero play count
    pub unplayed_only: bool,
}

impl LeafFilter {
    /// Accept every leaf
    pub const ANY: Self = Self {
        enabled_only: false,
        unplayed_only: false,
    };

    /// Accept enabled leaves only
    pub const ENABLED: Self = Self {
        enabled_only: true,
        unplayed_only: false,
    };

    /// Accept unplayed leaves only
    pub const UNPLAYED: Self = Self {
        enabled_only: false,
        unplayed_only: true,
    };

    /// Accept enabled, unplayed leaves only
    pub const ENABLED_UNPLAYED: Self = Self {
        enabled_only: true,
        unplayed_only: true,
    };
}

/// Insertion position within a container's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Insert at the given index (clamped to the child count)
    At(usize),

    /// Append after the last child
    End,
}
