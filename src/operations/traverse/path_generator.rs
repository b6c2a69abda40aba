use crate::error::{Result, TraversalError};
use crate::geometry::Pixel;
use crate::operations::eulerian::Traversability;
use crate::topology::SkeletonGraph;

use super::angular_walker::AngularWalker;

/// Produces the single-stroke pixel path of a traversable graph.
pub struct PathGenerator<'g> {
    graph: &'g SkeletonGraph,
}

impl<'g> PathGenerator<'g> {
    /// Creates a new `PathGenerator`.
    #[must_use]
    pub fn new(graph: &'g SkeletonGraph) -> Self {
        Self { graph }
    }

    /// Executes the generator.
    ///
    /// # Errors
    ///
    /// Returns `TraversalError::NotTraversable` if the graph has an odd-node
    /// count other than 0 or 2 (apply `EulerianTransform` first), and
    /// `TraversalError::DisconnectedGraph` if its edges span more than one
    /// component.
    pub fn execute(&self) -> Result<Vec<Pixel>> {
        let odd_nodes = self.graph.odd_nodes().len();
        if !Traversability::from_odd_count(odd_nodes).is_traversable() {
            return Err(TraversalError::NotTraversable { odd_nodes }.into());
        }
        AngularWalker::new(self.graph).find_path()
    }
}
