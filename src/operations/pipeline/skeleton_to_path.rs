use crate::error::Result;
use crate::geometry::SkeletonMask;
use crate::operations::build::{BuildGraph, MergeCloseNodes, PruneSpurs};
use crate::operations::eulerian::EulerianTransform;
use crate::operations::traverse::PathGenerator;

use super::{PathParams, PathReport};

/// Runs the whole chain: build the graph, refine it, make it traversable
/// and walk it.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonToPath {
    params: PathParams,
}

impl SkeletonToPath {
    /// Creates a new pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation.
    pub fn new(params: PathParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters in use.
    #[must_use]
    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Executes the pipeline on `mask`.
    ///
    /// # Errors
    ///
    /// Returns `TraversalError::DisconnectedGraph` if the skeleton has more
    /// than one connected component after refinement.
    pub fn execute(&self, mask: &SkeletonMask) -> Result<PathReport> {
        let mut graph = BuildGraph::new(mask).execute()?;
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph from skeleton"
        );

        if self.params.merge {
            MergeCloseNodes::new(self.params.merge_distance_threshold)?.execute(&mut graph)?;
        }
        if self.params.prune {
            PruneSpurs::new(self.params.min_spur_length).execute(&mut graph)?;
        }
        let raw_nodes = graph.node_count();
        let raw_edges = graph.edge_count();

        let transform = EulerianTransform::new(&graph);
        let status = transform.analyze();
        let (odd_nodes, _) = transform.count_odd_nodes();
        tracing::info!(
            raw_nodes,
            raw_edges,
            %status,
            odd_nodes,
            "analyzed topology"
        );

        let traversable = transform.make_eulerian(self.params.force_double_wall)?;
        let final_edges = traversable.edge_count();
        let path = PathGenerator::new(&traversable).execute()?;
        tracing::info!(final_edges, pixels = path.len(), "generated continuous path");

        Ok(PathReport {
            raw_nodes,
            raw_edges,
            status,
            odd_nodes,
            final_edges,
            path,
        })
    }
}
