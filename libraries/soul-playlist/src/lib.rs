//! Soul Player - Playlist Tree
//!
//! Hierarchical playlist management and traversal for Soul Player.
//!
//! This crate provides:
//! - Node arena with container/leaf distinction (no children slot = leaf)
//! - Mutation engine (create, insert, append, detach, recursive delete)
//! - Query engine (child search, children count, node pairing)
//! - Traversal engine (next/previous item and leaf, skip/unplayed filters)
//! - Dual category/onelevel trees over one set of playable items
//!
//! # Architecture
//!
//! `soul-playlist` is completely platform-agnostic:
//! - No dependency on audio output or decoding
//! - No dependency on soul-storage (database)
//! - External collaborators (item registry, change notifications) are
//!   provided via traits
//!
//! Single-writer model: the engine performs no internal locking and expects
//! the caller to serialize mutation and traversal calls.
//!
//! # Example: Building and walking a tree
//!
//! ```rust
//! use soul_playlist::{LeafFilter, Playlist};
//!
//! let mut playlist = Playlist::default();
//! let root = playlist.root_category();
//!
//! let album = playlist.create_node("Morning Mix", Some(root), None, true).unwrap();
//! let first = playlist.create_leaf("First Light", album).unwrap();
//! let second = playlist.create_leaf("Second Wind", album).unwrap();
//!
//! // next/previous track semantics
//! assert_eq!(playlist.next_leaf(root, None, LeafFilter::ANY).unwrap(), Some(first));
//! assert_eq!(playlist.next_leaf(root, Some(first), LeafFilter::ANY).unwrap(), Some(second));
//! assert_eq!(playlist.prev_leaf(root, Some(second), LeafFilter::ANY).unwrap(), Some(first));
//! ```
//!
//! # Example: Filters and deletion
//!
//! ```rust
//! use soul_playlist::{DeleteMode, LeafFilter, Playlist};
//!
//! let mut playlist = Playlist::default();
//! let root = playlist.root_category();
//! let album = playlist.create_node("Album", Some(root), None, true).unwrap();
//! let track = playlist.create_leaf("Track", album).unwrap();
//!
//! // played tracks are skipped by the unplayed-only filter
//! playlist.mark_played(track);
//! assert_eq!(playlist.next_leaf(root, None, LeafFilter::UNPLAYED).unwrap(), None);
//!
//! // recursive deletion cleans up the registry
//! playlist.delete(album, DeleteMode::CascadeItemsForced).unwrap();
//! assert!(!playlist.registry().contains(track));
//! ```

mod error;
mod node;
mod notify;
mod registry;
mod traversal;
mod tree;
pub mod types;

// Public exports
pub use error::{PlaylistError, Result};
pub use node::Node;
pub use notify::{ChangeNotifier, NullNotifier};
pub use registry::{ItemRegistry, MemoryRegistry};
pub use tree::Playlist;
pub use types::{
    DeleteMode, GroupingConfig, ItemId, ItemKind, LeafFilter, MediaItem, NodeFlags, NodeId,
    Position,
};
