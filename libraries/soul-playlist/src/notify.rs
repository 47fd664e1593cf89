//! Structural-change notification contract
//!
//! Consumers (derived views, UIs) refresh from these callbacks. Deletion is
//! always announced before node memory is released.

use crate::types::NodeId;

/// Receiver of structural-change notifications
pub trait ChangeNotifier: Send {
    /// A node was created
    ///
    /// `rebuild` hints whether derived views should rebuild immediately.
    fn notify_added(&mut self, node: NodeId, parent: Option<NodeId>, rebuild: bool);

    /// A node is being destroyed
    fn notify_deleted(&mut self, node: NodeId);
}

/// Notifier that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn notify_added(&mut self, _node: NodeId, _parent: Option<NodeId>, _rebuild: bool) {}

    fn notify_deleted(&mut self, _node: NodeId) {}
}
