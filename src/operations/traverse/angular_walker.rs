use std::collections::HashSet;

use crate::error::{Result, TraversalError};
use crate::geometry::Pixel;
use crate::math::tangent::exit_tangent;
use crate::math::{angle_score, tangent, Vector2, TANGENT_LOOKAHEAD};
use crate::topology::{EdgeId, NodeId, SkeletonGraph};

/// One edge of a tour, oriented in the direction it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSegment {
    /// Node the segment leaves.
    pub from: NodeId,
    /// Node the segment arrives at.
    pub to: NodeId,
    /// The traversed edge.
    pub edge: EdgeId,
    /// Edge pixels, starting at `from`.
    pub pixels: Vec<Pixel>,
}

/// Orders the edges of a traversable multigraph into one continuous stroke
/// while avoiding sharp turns.
///
/// This is Hierholzer's construction with a greedy edge choice: at every
/// node the walk continues along the unvisited edge whose initial direction
/// best matches the direction of arrival. Walks that close early are
/// extended by splicing further sub-tours in at the first tour node that
/// still has unvisited edges.
///
/// Ties go to the candidate listed first in the node's incident edges,
/// i.e. the edge attached earliest.
#[derive(Debug)]
pub struct AngularWalker<'g> {
    graph: &'g SkeletonGraph,
    visited: HashSet<EdgeId>,
}

impl<'g> AngularWalker<'g> {
    /// Creates a walker over `graph`.
    #[must_use]
    pub fn new(graph: &'g SkeletonGraph) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
        }
    }

    /// Computes the tour and flattens it into pixels. Where one segment
    /// starts on the pixel the previous one ended on, that pixel is emitted
    /// once.
    ///
    /// # Errors
    ///
    /// Returns `TraversalError::DisconnectedGraph` if some edges cannot be
    /// reached from the start node.
    pub fn find_path(&mut self) -> Result<Vec<Pixel>> {
        let tour = self.tour()?;
        Ok(assemble(&tour))
    }

    /// Computes the ordered list of tour segments covering every edge once.
    ///
    /// An edgeless graph yields an empty tour.
    ///
    /// # Errors
    ///
    /// Returns `TraversalError::DisconnectedGraph` if some edges cannot be
    /// reached from the start node.
    pub fn tour(&mut self) -> Result<Vec<TourSegment>> {
        self.visited.clear();
        let total = self.graph.edge_count();
        let Some(start) = self.start_node() else {
            return Ok(Vec::new());
        };

        let mut tour = self.greedy_walk(start, None);
        while self.visited.len() < total {
            let anchor = tour
                .iter()
                .map(|s| s.from)
                .chain(tour.last().map(|s| s.to))
                .enumerate()
                .find(|&(_, node)| self.has_unvisited(node));
            let Some((index, node)) = anchor else {
                break;
            };

            let sub_tour = self.greedy_walk(node, None);
            if sub_tour.is_empty() {
                break;
            }
            tracing::trace!(index, segments = sub_tour.len(), "spliced sub-tour");
            let tail = tour.split_off(index);
            tour.extend(sub_tour);
            tour.extend(tail);
        }

        if self.visited.len() < total {
            return Err(TraversalError::DisconnectedGraph {
                visited: self.visited.len(),
                total,
            }
            .into());
        }
        Ok(tour)
    }

    /// Walks from `start` until the current node has no unvisited edge,
    /// marking every traversed edge visited.
    ///
    /// `incoming` is the unit direction of travel on arrival at `start`;
    /// without it the first step has no preference.
    pub fn greedy_walk(&mut self, start: NodeId, incoming: Option<Vector2>) -> Vec<TourSegment> {
        let mut walk = Vec::new();
        let mut current = start;
        let mut heading = incoming;

        while let Some((edge, to, pixels)) = self.best_step(current, heading) {
            self.visited.insert(edge);
            heading = Some(exit_tangent(&pixels));
            walk.push(TourSegment {
                from: current,
                to,
                edge,
                pixels,
            });
            current = to;
        }
        walk
    }

    /// Picks the unvisited edge at `node` that continues `heading` most
    /// straightly and returns it with its far node and oriented pixels.
    fn best_step(
        &self,
        node: NodeId,
        heading: Option<Vector2>,
    ) -> Option<(EdgeId, NodeId, Vec<Pixel>)> {
        let here = self.graph.node(node).ok()?.position;
        let mut best: Option<(EdgeId, NodeId, bool)> = None;
        let mut best_score = f64::NEG_INFINITY;

        for &id in self.graph.incident_edges(node) {
            if self.visited.contains(&id) {
                continue;
            }
            let Ok(edge) = self.graph.edge(id) else {
                continue;
            };
            let Some(far) = edge.opposite(node) else {
                continue;
            };
            let reversed = is_reversed(&edge.chain, here);
            let score = heading.map_or(0.0, |h| {
                let lead: Vec<Pixel> = if reversed {
                    edge.chain.iter().rev().take(TANGENT_LOOKAHEAD + 1).copied().collect()
                } else {
                    edge.chain.iter().take(TANGENT_LOOKAHEAD + 1).copied().collect()
                };
                angle_score(&h, &tangent(&lead))
            });
            if score > best_score {
                best_score = score;
                best = Some((id, far, reversed));
            }
        }

        let (id, far, reversed) = best?;
        let mut pixels = self.graph.edge(id).ok()?.chain.clone();
        if reversed {
            pixels.reverse();
        }
        Some((id, far, pixels))
    }

    /// An odd-degree node when one exists (the tour must start at one of
    /// the two), otherwise any node with an edge. Among candidates the
    /// smallest position wins.
    fn start_node(&self) -> Option<NodeId> {
        let candidates = || {
            self.graph
                .nodes()
                .filter(|&(id, _)| self.graph.degree(id) > 0)
        };
        let lowest = |odd_only: bool| {
            candidates()
                .filter(|&(id, _)| !odd_only || self.graph.degree(id) % 2 == 1)
                .min_by_key(|(_, n)| n.position)
                .map(|(id, _)| id)
        };
        lowest(true).or_else(|| lowest(false))
    }

    fn has_unvisited(&self, node: NodeId) -> bool {
        self.graph
            .incident_edges(node)
            .iter()
            .any(|e| !self.visited.contains(e))
    }
}

/// Whether a chain stored as-is ends nearer to `here` than it starts.
fn is_reversed(chain: &[Pixel], here: Pixel) -> bool {
    match (chain.first(), chain.last()) {
        (Some(&first), Some(&last)) => last.distance_squared(here) < first.distance_squared(here),
        _ => false,
    }
}

fn assemble(tour: &[TourSegment]) -> Vec<Pixel> {
    let mut pixels: Vec<Pixel> = Vec::new();
    for segment in tour {
        let skip = usize::from(!pixels.is_empty() && pixels.last() == segment.pixels.first());
        pixels.extend_from_slice(&segment.pixels[skip.min(segment.pixels.len())..]);
    }
    pixels
}
