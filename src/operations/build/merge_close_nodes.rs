use std::collections::VecDeque;

use crate::error::{OperationError, Result};
use crate::topology::{EdgeId, SkeletonGraph};

/// Collapses clusters of nodes that thinning left around a single
/// intersection.
///
/// Whenever an edge joins two nodes closer than `threshold` (Euclidean,
/// strict), the second endpoint is fused into the first. Edges are examined
/// in arena order; after each fusion the surviving node's edges are queued
/// again because their far ends may now be in range. The result has no
/// non-loop edge shorter than the threshold.
#[derive(Debug, Clone, Copy)]
pub struct MergeCloseNodes {
    threshold: f64,
}

impl MergeCloseNodes {
    /// Creates a new `MergeCloseNodes` operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `threshold` is negative or
    /// not finite.
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "merge distance must be a finite non-negative number, got {threshold}"
            ))
            .into());
        }
        Ok(Self { threshold })
    }

    /// Returns the merge distance.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Executes the merge in place and returns the number of fusions.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph's incidence data is inconsistent.
    pub fn execute(&self, graph: &mut SkeletonGraph) -> Result<usize> {
        let mut queue: VecDeque<EdgeId> = graph.edges().map(|(id, _)| id).collect();
        let mut fusions = 0;

        while let Some(id) = queue.pop_front() {
            let Ok(edge) = graph.edge(id) else {
                continue;
            };
            if edge.is_loop() {
                continue;
            }
            let (keep, absorb) = (edge.a, edge.b);
            let distance = graph
                .node(keep)?
                .position
                .distance(graph.node(absorb)?.position);
            if distance >= self.threshold {
                continue;
            }

            let dropped = graph.fuse_nodes(keep, absorb)?;
            fusions += 1;
            tracing::trace!(distance, dropped, "fused close nodes");
            queue.extend(graph.incident_edges(keep).iter().copied());
        }

        tracing::debug!(
            fusions,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            threshold = self.threshold,
            "merged close nodes"
        );
        Ok(fusions)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Pixel, SkeletonMask};
    use crate::operations::build::BuildGraph;
    use crate::topology::{EdgeKind, NodeKind};

    fn px(row: i32, col: i32) -> Pixel {
        Pixel::new(row, col)
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(MergeCloseNodes::new(-1.0).is_err());
        assert!(MergeCloseNodes::new(f64::NAN).is_err());
        assert!(MergeCloseNodes::new(f64::INFINITY).is_err());
        assert!(MergeCloseNodes::new(0.0).is_ok());
    }

    #[test]
    fn merges_adjacent_pair() {
        let mut g = SkeletonGraph::new();
        let n1 = g.add_node(px(5, 5), NodeKind::Junction).unwrap();
        let n2 = g.add_node(px(5, 6), NodeKind::Junction).unwrap();
        let n3 = g.add_node(px(8, 8), NodeKind::Endpoint).unwrap();
        g.add_edge(n1, n2, vec![px(5, 5), px(5, 6)], EdgeKind::Original)
            .unwrap();
        g.add_edge(n2, n3, vec![px(5, 6), px(6, 7), px(7, 8), px(8, 8)], EdgeKind::Original)
            .unwrap();
        assert_eq!(g.node_count(), 3);

        let fusions = MergeCloseNodes::new(2.0).unwrap().execute(&mut g).unwrap();
        assert_eq!(fusions, 1);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(n1), 1);
        assert_eq!(g.degree(n3), 1);
    }

    #[test]
    fn distance_equal_to_threshold_is_kept() {
        let mut g = SkeletonGraph::new();
        let a = g.add_node(px(0, 0), NodeKind::Endpoint).unwrap();
        let b = g.add_node(px(0, 2), NodeKind::Endpoint).unwrap();
        g.add_edge(a, b, vec![px(0, 0), px(0, 1), px(0, 2)], EdgeKind::Original)
            .unwrap();

        let fusions = MergeCloseNodes::new(2.0).unwrap().execute(&mut g).unwrap();
        assert_eq!(fusions, 0);
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn collapses_cross_cluster() {
        let mut picture = String::new();
        for r in 0..13 {
            let line: String = (0..13)
                .map(|c| if r == 6 || c == 6 { '#' } else { '.' })
                .collect();
            picture.push_str(&line);
            picture.push('\n');
        }
        let mask = SkeletonMask::from_ascii(&picture).unwrap();
        let mut g = BuildGraph::new(&mask).execute().unwrap();
        let edges_before = g.edge_count();

        // The kept node stays put, so the far side of the cluster is two
        // pixels away once the diagonal neighbours are gone.
        let fusions = MergeCloseNodes::new(3.0).unwrap().execute(&mut g).unwrap();
        assert_eq!(fusions, 4);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 4);
        assert!(g.edge_count() <= edges_before);

        let hub = g
            .nodes()
            .find(|(_, n)| n.kind == NodeKind::Junction)
            .map(|(id, _)| id)
            .unwrap();
        assert_eq!(g.degree(hub), 4);
        assert!(g.edges().all(|(_, e)| e.weight() == 6));
    }

    #[test]
    fn cluster_edge_at_threshold_survives() {
        let mut picture = String::new();
        for r in 0..13 {
            let line: String = (0..13)
                .map(|c| if r == 6 || c == 6 { '#' } else { '.' })
                .collect();
            picture.push_str(&line);
            picture.push('\n');
        }
        let mask = SkeletonMask::from_ascii(&picture).unwrap();
        let mut g = BuildGraph::new(&mask).execute().unwrap();

        let fusions = MergeCloseNodes::new(2.0).unwrap().execute(&mut g).unwrap();
        assert_eq!(fusions, 3);
        assert_eq!(g.node_count(), 6);
        assert_eq!(g.edge_count(), 7);
        let hub = g.node_at(px(5, 6)).unwrap();
        let below = g.node_at(px(7, 6)).unwrap();
        let links = g
            .incident_edges(below)
            .iter()
            .filter(|&&e| g.edge(e).unwrap().opposite(below) == Some(hub))
            .count();
        assert_eq!(links, 3);
    }

    #[test]
    fn no_close_edge_remains() {
        let mut g = SkeletonGraph::new();
        let ids: Vec<_> = (0..6)
            .map(|c| g.add_node(px(0, c), NodeKind::Junction).unwrap())
            .collect();
        for (c, pair) in (0..).zip(ids.windows(2)) {
            g.add_edge(pair[0], pair[1], vec![px(0, c), px(0, c + 1)], EdgeKind::Original)
                .unwrap();
        }

        // Fused nodes keep the first endpoint's position, so every other
        // link survives at distance 2.
        let fusions = MergeCloseNodes::new(1.5).unwrap().execute(&mut g).unwrap();
        assert_eq!(fusions, 3);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        for (_, e) in g.edges() {
            let d = g
                .node(e.a)
                .unwrap()
                .position
                .distance(g.node(e.b).unwrap().position);
            assert!(e.is_loop() || d >= 1.5);
        }
    }
}
