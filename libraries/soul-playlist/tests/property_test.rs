//! Property-based tests for the playlist tree
//!
//! Uses proptest to verify traversal and deletion invariants across
//! arbitrary tree shapes: empty containers, single-child chains, mixed
//! depths.

use proptest::prelude::*;
use soul_playlist::{DeleteMode, LeafFilter, NodeId, Playlist};

// ===== Helpers =====

#[derive(Debug, Clone)]
enum TreeShape {
    Leaf { disabled: bool, played: bool },
    Node(Vec<TreeShape>),
}

#[derive(Debug, Clone, Copy)]
struct LeafInfo {
    id: NodeId,
    disabled: bool,
    played: bool,
}

fn arbitrary_shape() -> impl Strategy<Value = TreeShape> {
    let leaf = (any::<bool>(), any::<bool>())
        .prop_map(|(disabled, played)| TreeShape::Leaf { disabled, played });
    leaf.prop_recursive(4, 24, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(TreeShape::Node)
    })
}

fn arbitrary_forest() -> impl Strategy<Value = Vec<TreeShape>> {
    prop::collection::vec(arbitrary_shape(), 0..5)
}

/// Build a shape under `parent`, recording every node and each leaf in
/// document order.
fn build(
    playlist: &mut Playlist,
    parent: NodeId,
    shape: &TreeShape,
    leaves: &mut Vec<LeafInfo>,
    all: &mut Vec<NodeId>,
) {
    match shape {
        TreeShape::Leaf { disabled, played } => {
            let id = playlist.create_leaf("track", parent).unwrap();
            if *disabled {
                playlist.flags_mut(id).unwrap().disabled = true;
            }
            if *played {
                playlist.mark_played(id);
            }
            leaves.push(LeafInfo {
                id,
                disabled: *disabled,
                played: *played,
            });
            all.push(id);
        }
        TreeShape::Node(children) => {
            let id = playlist.create_node("node", Some(parent), None, true).unwrap();
            all.push(id);
            for child in children {
                build(playlist, id, child, leaves, all);
            }
        }
    }
}

fn build_forest(
    playlist: &mut Playlist,
    root: NodeId,
    forest: &[TreeShape],
) -> (Vec<LeafInfo>, Vec<NodeId>) {
    let mut leaves = Vec::new();
    let mut all = Vec::new();
    for shape in forest {
        build(playlist, root, shape, &mut leaves, &mut all);
    }
    (leaves, all)
}

fn walk_forward(playlist: &Playlist, root: NodeId, filter: LeafFilter) -> Vec<NodeId> {
    let mut walked = Vec::new();
    let mut cursor = None;
    while let Some(next) = playlist.next_leaf(root, cursor, filter).unwrap() {
        walked.push(next);
        cursor = Some(next);
    }
    walked
}

fn walk_backward(playlist: &Playlist, root: NodeId, filter: LeafFilter) -> Vec<NodeId> {
    let mut walked = Vec::new();
    let mut cursor = None;
    while let Some(prev) = playlist.prev_leaf(root, cursor, filter).unwrap() {
        walked.push(prev);
        cursor = Some(prev);
    }
    walked
}

// ===== Property Tests =====

proptest! {
    /// Property: appended leaves keep insertion order, each with the parent
    /// back-reference set and exactly one occurrence in the children
    #[test]
    fn append_preserves_order_and_backrefs(count in 1usize..30) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();

        let mut appended = Vec::new();
        for i in 0..count {
            appended.push(playlist.create_leaf(&format!("t{i}"), root).unwrap());
        }

        let children: Vec<NodeId> = playlist.node(root).unwrap().children().unwrap().to_vec();
        prop_assert_eq!(&children, &appended);
        for &id in &appended {
            prop_assert_eq!(playlist.node(id).unwrap().parent(), Some(root));
            prop_assert_eq!(children.iter().filter(|&&c| c == id).count(), 1);
        }
    }

    /// Property: the forward walk visits every leaf exactly once in document
    /// order, and the backward walk is its exact reverse
    #[test]
    fn traversal_visits_each_leaf_once(forest in arbitrary_forest()) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();
        let (leaves, _) = build_forest(&mut playlist, root, &forest);

        let expected: Vec<NodeId> = leaves.iter().map(|l| l.id).collect();
        let forward = walk_forward(&playlist, root, LeafFilter::ANY);
        prop_assert_eq!(&forward, &expected, "forward walk out of order");

        let mut backward = walk_backward(&playlist, root, LeafFilter::ANY);
        backward.reverse();
        prop_assert_eq!(&backward, &expected, "backward walk is not the reverse");
    }

    /// Property: stepping back from any next_leaf result returns the leaf we
    /// started from (boundaries excluded)
    #[test]
    fn next_then_prev_roundtrips(forest in arbitrary_forest()) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();
        build_forest(&mut playlist, root, &forest);

        let forward = walk_forward(&playlist, root, LeafFilter::ANY);
        for window in forward.windows(2) {
            let (from, to) = (window[0], window[1]);
            prop_assert_eq!(
                playlist.prev_leaf(root, Some(to), LeafFilter::ANY).unwrap(),
                Some(from)
            );
        }
    }

    /// Property: all_enabled_children equals the pre-order leaf listing with
    /// disabled leaves dropped, regardless of nesting depth
    #[test]
    fn enabled_children_match_preorder_filter(forest in arbitrary_forest()) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();
        let (leaves, _) = build_forest(&mut playlist, root, &forest);

        let expected: Vec<NodeId> = leaves
            .iter()
            .filter(|l| !l.disabled)
            .map(|l| l.id)
            .collect();
        prop_assert_eq!(playlist.all_enabled_children(root).unwrap(), expected);
    }

    /// Property: the unplayed-only filter yields exactly the leaves with a
    /// zero play count
    #[test]
    fn unplayed_filter_is_sound(forest in arbitrary_forest()) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();
        let (leaves, _) = build_forest(&mut playlist, root, &forest);

        let expected: Vec<NodeId> = leaves
            .iter()
            .filter(|l| !l.played)
            .map(|l| l.id)
            .collect();
        prop_assert_eq!(walk_forward(&playlist, root, LeafFilter::UNPLAYED), expected);
    }

    /// Property: forced recursive deletion leaves no subtree id in the
    /// registry or the arena
    #[test]
    fn forced_delete_clears_registry(forest in arbitrary_forest()) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();
        let stage = playlist.create_node("stage", Some(root), None, true).unwrap();
        let (_, all) = build_forest(&mut playlist, stage, &forest);

        playlist.delete(stage, DeleteMode::CascadeItemsForced).unwrap();

        prop_assert!(!playlist.registry().contains(stage));
        prop_assert!(playlist.node(stage).is_none());
        for id in all {
            prop_assert!(!playlist.registry().contains(id), "{} still registered", id);
            prop_assert!(playlist.node(id).is_none(), "{} still in the arena", id);
        }
        prop_assert_eq!(playlist.node(root).unwrap().child_count(), 0);
    }

    /// Property: last_leaf agrees with the tail of the forward walk
    #[test]
    fn last_leaf_matches_walk_tail(forest in arbitrary_forest()) {
        let mut playlist = Playlist::default();
        let root = playlist.root_category();
        build_forest(&mut playlist, root, &forest);

        let forward = walk_forward(&playlist, root, LeafFilter::ANY);
        prop_assert_eq!(playlist.last_leaf(root).unwrap(), forward.last().copied());
    }
}
