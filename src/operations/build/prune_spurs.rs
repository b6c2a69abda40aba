use crate::error::Result;
use crate::topology::{NodeId, SkeletonGraph};

/// Removes short dangling branches left behind by thinning noise.
///
/// A node of degree 1 whose only edge is shorter than `min_length` pixels
/// is deleted together with that edge. Removing a spur can turn its
/// neighbour into a new short spur, so neighbours are re-examined until no
/// such node remains.
#[derive(Debug, Clone, Copy)]
pub struct PruneSpurs {
    min_length: usize,
}

impl PruneSpurs {
    /// Creates a new `PruneSpurs` operation.
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Executes the prune in place and returns the number of removed spurs.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph's incidence data is inconsistent.
    pub fn execute(&self, graph: &mut SkeletonGraph) -> Result<usize> {
        let mut stack: Vec<NodeId> = graph
            .nodes()
            .filter(|&(id, _)| graph.degree(id) == 1)
            .map(|(id, _)| id)
            .collect();
        stack.reverse();
        let mut removed = 0;

        while let Some(node) = stack.pop() {
            if graph.node(node).is_err() || graph.degree(node) != 1 {
                continue;
            }
            let edge_id = graph.incident_edges(node)[0];
            let edge = graph.edge(edge_id)?;
            if edge.weight() >= self.min_length {
                continue;
            }
            let neighbor = edge.opposite(node);

            graph.remove_node(node)?;
            removed += 1;
            if let Some(n) = neighbor.filter(|&n| graph.degree(n) == 1) {
                stack.push(n);
            }
        }

        tracing::debug!(
            removed,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            min_length = self.min_length,
            "pruned spurs"
        );
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Pixel;
    use crate::topology::{EdgeKind, NodeKind};

    fn px(row: i32, col: i32) -> Pixel {
        Pixel::new(row, col)
    }

    fn line(from: Pixel, to: Pixel) -> Vec<Pixel> {
        let mut chain = vec![from];
        let mut cur = from;
        while cur != to {
            cur = Pixel::new(
                cur.row + (to.row - cur.row).signum(),
                cur.col + (to.col - cur.col).signum(),
            );
            chain.push(cur);
        }
        chain
    }

    /// A 20-pixel trunk with a junction at (0, 10) and a spur of `spur`
    /// pixels hanging below it.
    fn trunk_with_spur(spur: i32) -> (SkeletonGraph, NodeId) {
        let mut g = SkeletonGraph::new();
        let left = g.add_node(px(0, 0), NodeKind::Endpoint).unwrap();
        let mid = g.add_node(px(0, 10), NodeKind::Junction).unwrap();
        let right = g.add_node(px(0, 20), NodeKind::Endpoint).unwrap();
        let tip = g.add_node(px(spur - 1, 10), NodeKind::Endpoint).unwrap();
        g.add_edge(left, mid, line(px(0, 0), px(0, 10)), EdgeKind::Original)
            .unwrap();
        g.add_edge(mid, right, line(px(0, 10), px(0, 20)), EdgeKind::Original)
            .unwrap();
        g.add_edge(mid, tip, line(px(0, 10), px(spur - 1, 10)), EdgeKind::Original)
            .unwrap();
        (g, tip)
    }

    #[test]
    fn removes_short_spur() {
        let (mut g, tip) = trunk_with_spur(4);
        let removed = PruneSpurs::new(10).execute(&mut g).unwrap();
        assert_eq!(removed, 1);
        assert!(g.node(tip).is_err());
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn keeps_long_spur() {
        let (mut g, tip) = trunk_with_spur(10);
        let removed = PruneSpurs::new(10).execute(&mut g).unwrap();
        assert_eq!(removed, 0);
        assert!(g.node(tip).is_ok());
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn cascades_to_exposed_spurs() {
        // tip -(3)- a -(3)- b ===(long)=== c
        let mut g = SkeletonGraph::new();
        let tip = g.add_node(px(0, 0), NodeKind::Endpoint).unwrap();
        let a = g.add_node(px(0, 2), NodeKind::Junction).unwrap();
        let b = g.add_node(px(0, 4), NodeKind::Junction).unwrap();
        let c = g.add_node(px(0, 30), NodeKind::Endpoint).unwrap();
        g.add_edge(tip, a, line(px(0, 0), px(0, 2)), EdgeKind::Original)
            .unwrap();
        g.add_edge(a, b, line(px(0, 2), px(0, 4)), EdgeKind::Original)
            .unwrap();
        g.add_edge(b, c, line(px(0, 4), px(0, 30)), EdgeKind::Original)
            .unwrap();

        let removed = PruneSpurs::new(5).execute(&mut g).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.node(b).is_ok());
        assert!(g.node(c).is_ok());
    }

    #[test]
    fn fixpoint_has_no_short_degree_one_node() {
        let (mut g, _) = trunk_with_spur(3);
        PruneSpurs::new(12).execute(&mut g).unwrap();
        for (id, _) in g.nodes() {
            if g.degree(id) == 1 {
                let e = g.incident_edges(id)[0];
                assert!(g.edge(e).unwrap().weight() >= 12);
            }
        }
    }
}
