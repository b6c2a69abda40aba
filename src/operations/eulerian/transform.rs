use std::fmt;

use crate::error::Result;
use crate::geometry::Pixel;
use crate::topology::{EdgeKind, SkeletonGraph};

/// Whether a multigraph can be drawn in one stroke, judged by degree parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversability {
    /// No odd-degree node: a closed tour exists.
    Circuit,
    /// Exactly two odd-degree nodes: an open tour between them exists.
    Path,
    /// Any other odd-node count.
    NonEulerian,
}

impl Traversability {
    /// Classifies `graph` by its odd-degree node count.
    #[must_use]
    pub fn of(graph: &SkeletonGraph) -> Self {
        Self::from_odd_count(graph.odd_nodes().len())
    }

    /// Classifies an odd-degree node count.
    #[must_use]
    pub fn from_odd_count(odd: usize) -> Self {
        match odd {
            0 => Self::Circuit,
            2 => Self::Path,
            _ => Self::NonEulerian,
        }
    }

    /// Returns `true` for circuits and paths.
    #[must_use]
    pub fn is_traversable(self) -> bool {
        !matches!(self, Self::NonEulerian)
    }
}

impl fmt::Display for Traversability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Circuit => "circuit",
            Self::Path => "path",
            Self::NonEulerian => "non-eulerian",
        })
    }
}

/// Makes a skeleton graph drawable in a single stroke.
///
/// The transform owns a private copy of the graph it was created from, so
/// the caller's graph is never modified.
#[derive(Debug, Clone)]
pub struct EulerianTransform {
    graph: SkeletonGraph,
}

impl EulerianTransform {
    /// Creates a transform over a deep copy of `graph`.
    #[must_use]
    pub fn new(graph: &SkeletonGraph) -> Self {
        Self {
            graph: graph.clone(),
        }
    }

    /// The working copy.
    #[must_use]
    pub fn graph(&self) -> &SkeletonGraph {
        &self.graph
    }

    /// Returns the number of odd-degree nodes and their positions.
    #[must_use]
    pub fn count_odd_nodes(&self) -> (usize, Vec<Pixel>) {
        let positions: Vec<Pixel> = self
            .graph
            .odd_nodes()
            .into_iter()
            .filter_map(|id| self.graph.node(id).ok().map(|n| n.position))
            .collect();
        (positions.len(), positions)
    }

    /// Classifies the working copy.
    #[must_use]
    pub fn analyze(&self) -> Traversability {
        Traversability::of(&self.graph)
    }

    /// Returns `true` if the working copy admits a closed tour: every degree
    /// is even and all edges lie in one component.
    #[must_use]
    pub fn is_eulerian(&self) -> bool {
        self.analyze() == Traversability::Circuit && self.graph.is_connected()
    }

    /// Returns `true` if the working copy admits an open tour but no closed
    /// one.
    #[must_use]
    pub fn is_semi_eulerian(&self) -> bool {
        self.analyze() == Traversability::Path && self.graph.is_connected()
    }

    /// Returns a traversable graph.
    ///
    /// If the copy is non-Eulerian, or `force_double_wall` is set, every edge
    /// is duplicated with an identical chain tagged
    /// [`EdgeKind::Duplicate`]. That doubles each degree, so the result
    /// always admits a closed tour. Otherwise the copy is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy's edge arena is inconsistent.
    pub fn make_eulerian(mut self, force_double_wall: bool) -> Result<SkeletonGraph> {
        let status = self.analyze();
        if status.is_traversable() && !force_double_wall {
            tracing::debug!(%status, "graph already traversable");
            return Ok(self.graph);
        }

        let originals: Vec<_> = self.graph.edges().map(|(id, _)| id).collect();
        for id in originals {
            self.graph.duplicate_edge(id, EdgeKind::Duplicate)?;
        }

        tracing::debug!(
            %status,
            forced = force_double_wall,
            edges = self.graph.edge_count(),
            "applied double wall"
        );
        Ok(self.graph)
    }
}
