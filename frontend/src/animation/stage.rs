use super::props::VisualState;

/// Opaque handle to a node known to a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// The rendering surface animations write to.
pub trait Stage {
    /// Nodes matching `selector`, in document order. An unknown selector
    /// yields an empty list.
    fn select(&self, selector: &str) -> Vec<NodeId>;

    /// Write `state` as the node's inline presentation.
    fn apply(&self, node: NodeId, state: &VisualState);

    /// Remove whatever `apply` wrote.
    fn reset(&self, node: NodeId);
}
