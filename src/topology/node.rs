use crate::geometry::Pixel;

slotmap::new_key_type! {
    /// Unique identifier for a node in a skeleton graph.
    pub struct NodeId;
}

/// Structural role of a node, derived from local skeleton connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Three or more skeleton neighbours.
    Junction,
    /// Exactly one skeleton neighbour, or a synthesized anchor on a loop.
    Endpoint,
}

/// Data associated with a graph node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The pixel this node sits on.
    pub position: Pixel,
    /// Junction or endpoint.
    pub kind: NodeKind,
}

impl NodeData {
    /// Creates a new node.
    #[must_use]
    pub fn new(position: Pixel, kind: NodeKind) -> Self {
        Self { position, kind }
    }
}
