use std::collections::HashSet;

use crate::error::Result;
use crate::geometry::{Pixel, SkeletonMask};
use crate::topology::{EdgeKind, NodeKind, SkeletonGraph};

/// Converts a skeleton mask into a multigraph of junctions, endpoints and
/// the pixel chains between them.
///
/// Pixels with one foreground neighbour become endpoints, pixels with three
/// or more become junctions; everything else is chain interior. Every
/// connected component without such a pixel is a closed loop and gets one
/// synthesized endpoint at its first pixel so that it can be traversed.
/// Nodes are detected and traced in row-major pixel order.
pub struct BuildGraph<'a> {
    mask: &'a SkeletonMask,
}

impl<'a> BuildGraph<'a> {
    /// Creates a new `BuildGraph` operation.
    #[must_use]
    pub fn new(mask: &'a SkeletonMask) -> Self {
        Self { mask }
    }

    /// Executes the operation. An empty mask yields an empty graph.
    ///
    /// # Errors
    ///
    /// Returns an error only if graph construction is internally
    /// inconsistent, which a well-formed mask never triggers.
    pub fn execute(&self) -> Result<SkeletonGraph> {
        let mut graph = SkeletonGraph::new();
        let pixels = self.mask.foreground_pixels();
        if pixels.is_empty() {
            return Ok(graph);
        }

        // Step 1: Detect nodes from local connectivity.
        let mut nodes: Vec<(Pixel, NodeKind)> = pixels
            .iter()
            .filter_map(|&p| match self.mask.neighbors(p).len() {
                1 => Some((p, NodeKind::Endpoint)),
                n if n > 2 => Some((p, NodeKind::Junction)),
                _ => None,
            })
            .collect();
        let mut node_set: HashSet<Pixel> = nodes.iter().map(|&(p, _)| p).collect();
        let anchors = self.loop_anchors(&pixels, &node_set);
        if !anchors.is_empty() {
            tracing::debug!(loops = anchors.len(), "anchored closed loops");
        }
        for anchor in anchors {
            nodes.push((anchor, NodeKind::Endpoint));
            node_set.insert(anchor);
        }
        let mut node_ids = Vec::with_capacity(nodes.len());
        for &(p, kind) in &nodes {
            node_ids.push((p, graph.add_node(p, kind)?));
        }

        // Step 2: Trace a chain out of every node through each unconsumed
        // neighbour.
        let mut consumed: HashSet<Pixel> = HashSet::new();
        let mut direct_links: HashSet<(Pixel, Pixel)> = HashSet::new();
        let mut dead_ends = 0_usize;

        for &(start, from) in &node_ids {
            for first_step in self.mask.neighbors(start) {
                if consumed.contains(&first_step) {
                    continue;
                }
                if node_set.contains(&first_step)
                    && !direct_links.insert(ordered(start, first_step))
                {
                    continue;
                }

                let chain = self.trace(start, first_step, &node_set, &mut consumed);
                let Some(end) = chain.last().and_then(|&p| graph.node_at(p)) else {
                    dead_ends += 1;
                    continue;
                };
                graph.add_edge(from, end, chain, EdgeKind::Original)?;
            }
        }

        if dead_ends > 0 {
            tracing::debug!(dead_ends, "dropped chains that did not reach a node");
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built skeleton graph"
        );
        Ok(graph)
    }

    /// First pixel, in row-major order, of every 8-connected component that
    /// contains none of `nodes`.
    fn loop_anchors(&self, pixels: &[Pixel], nodes: &HashSet<Pixel>) -> Vec<Pixel> {
        let mut seen: HashSet<Pixel> = HashSet::new();
        let mut anchors = Vec::new();

        for &seed in pixels {
            if !seen.insert(seed) {
                continue;
            }
            let mut has_node = false;
            let mut stack = vec![seed];
            while let Some(p) = stack.pop() {
                has_node |= nodes.contains(&p);
                for n in self.mask.neighbors(p) {
                    if seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
            if !has_node {
                anchors.push(seed);
            }
        }
        anchors
    }

    /// Walks from `start` through `first_step` along degree-2 pixels until a
    /// node is reached or no unconsumed pixel continues the chain.
    fn trace(
        &self,
        start: Pixel,
        first_step: Pixel,
        node_set: &HashSet<Pixel>,
        consumed: &mut HashSet<Pixel>,
    ) -> Vec<Pixel> {
        let mut chain = vec![start, first_step];
        let mut prev = start;
        let mut current = first_step;

        while !node_set.contains(&current) {
            consumed.insert(current);
            let next = self
                .mask
                .neighbors(current)
                .into_iter()
                .find(|&n| n != prev && (node_set.contains(&n) || !consumed.contains(&n)));
            let Some(next) = next else {
                break;
            };
            prev = current;
            current = next;
            chain.push(current);
        }
        chain
    }
}

fn ordered(a: Pixel, b: Pixel) -> (Pixel, Pixel) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
