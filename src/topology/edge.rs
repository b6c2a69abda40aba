use crate::geometry::Pixel;

use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in a skeleton graph.
    ///
    /// Parallel edges between the same node pair have distinct ids.
    pub struct EdgeId;
}

/// Origin of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Traced from the skeleton.
    Original,
    /// Clone added by the double-wall transform.
    Duplicate,
}

/// Data associated with a graph edge.
///
/// An edge joins two nodes and carries the skeleton pixels between them,
/// both endpoints included.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// First endpoint.
    pub a: NodeId,
    /// Second endpoint. Equal to `a` for a self-loop.
    pub b: NodeId,
    /// Ordered pixel polyline from `a` to `b`.
    pub chain: Vec<Pixel>,
    /// Whether this edge was traced or duplicated.
    pub kind: EdgeKind,
}

impl EdgeData {
    /// Pixel-chain length.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if both ends are the same node.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }

    /// Returns the endpoint opposite `node`, or `None` if `node` is not an
    /// endpoint of this edge.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}
