mod skeleton_to_path;

pub use skeleton_to_path::SkeletonToPath;

use crate::error::{OperationError, Result};
use crate::geometry::Pixel;

use super::eulerian::Traversability;

/// Parameters controlling graph refinement and the Eulerian transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParams {
    /// Nodes joined by an edge shorter than this (Euclidean pixels) are fused.
    pub merge_distance_threshold: f64,
    /// Dangling branches with fewer pixels than this are removed.
    pub min_spur_length: usize,
    /// Duplicate every edge even when the graph is already traversable.
    pub force_double_wall: bool,
    /// Run the close-node merge.
    pub merge: bool,
    /// Run the spur prune.
    pub prune: bool,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            merge_distance_threshold: 5.0,
            min_spur_length: 10,
            force_double_wall: false,
            merge: true,
            prune: true,
        }
    }
}

impl PathParams {
    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the merge distance is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.merge_distance_threshold.is_finite() || self.merge_distance_threshold < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "merge distance must be a finite non-negative number, got {}",
                self.merge_distance_threshold
            ))
            .into());
        }
        Ok(())
    }
}

/// Outcome of a full mask-to-path run.
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    /// Nodes after refinement, before the Eulerian transform.
    pub raw_nodes: usize,
    /// Edges after refinement, before the Eulerian transform.
    pub raw_edges: usize,
    /// Traversability of the refined graph.
    pub status: Traversability,
    /// Odd-degree node count of the refined graph.
    pub odd_nodes: usize,
    /// Edges of the graph that was walked.
    pub final_edges: usize,
    /// The single-stroke pixel path.
    pub path: Vec<Pixel>,
}
