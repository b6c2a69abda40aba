pub mod edge;
pub mod node;

pub use edge::{EdgeData, EdgeId, EdgeKind};
pub use node::{NodeData, NodeId, NodeKind};

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::TopologyError;
use crate::geometry::Pixel;

/// Undirected multigraph of skeleton nodes and the pixel chains joining them.
///
/// Nodes and edges live in arenas keyed by typed ids (generational indices),
/// so parallel edges and self-loops are ordinary entries. Each node keeps the
/// ids of its incident edges; a self-loop is listed twice and therefore
/// counts two towards the degree.
///
/// `Clone` produces an independent deep copy with identical ids.
#[derive(Debug, Default, Clone)]
pub struct SkeletonGraph {
    nodes: SlotMap<NodeId, NodeData>,
    edges: SlotMap<EdgeId, EdgeData>,
    incidence: SecondaryMap<NodeId, Vec<EdgeId>>,
    positions: HashMap<Pixel, NodeId>,
}

impl SkeletonGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    /// Inserts a node and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DuplicateNode` if a node already occupies
    /// `position`.
    pub fn add_node(&mut self, position: Pixel, kind: NodeKind) -> Result<NodeId, TopologyError> {
        if self.positions.contains_key(&position) {
            return Err(TopologyError::DuplicateNode {
                row: position.row,
                col: position.col,
            });
        }
        let id = self.nodes.insert(NodeData::new(position, kind));
        self.incidence.insert(id, Vec::new());
        self.positions.insert(position, id);
        Ok(id)
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, TopologyError> {
        self.nodes
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))
    }

    /// Returns the node sitting on `position`, if any.
    #[must_use]
    pub fn node_at(&self, position: Pixel) -> Option<NodeId> {
        self.positions.get(&position).copied()
    }

    /// Iterates over all nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes a node together with every incident edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found.
    pub fn remove_node(&mut self, id: NodeId) -> Result<NodeData, TopologyError> {
        let incident = self.incidence.get(id).cloned().unwrap_or_default();
        for edge in incident {
            // Self-loops are listed twice; the second removal is a no-op.
            if self.edges.contains_key(edge) {
                self.remove_edge(edge)?;
            }
        }
        self.incidence.remove(id);
        let data = self
            .nodes
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))?;
        self.positions.remove(&data.position);
        Ok(data)
    }

    // --- Edge operations ---

    /// Inserts an edge between `a` and `b` carrying `chain`, and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if either node is missing, or
    /// `TopologyError::InvalidChain` if the chain is empty or its ends do not
    /// sit on the two node positions.
    pub fn add_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        chain: Vec<Pixel>,
        kind: EdgeKind,
    ) -> Result<EdgeId, TopologyError> {
        let pa = self.node(a)?.position;
        let pb = self.node(b)?.position;
        let (Some(&first), Some(&last)) = (chain.first(), chain.last()) else {
            return Err(TopologyError::InvalidChain("chain is empty".into()));
        };
        if !((first == pa && last == pb) || (first == pb && last == pa)) {
            return Err(TopologyError::InvalidChain(format!(
                "chain runs {first} -> {last} but the edge joins {pa} and {pb}"
            )));
        }

        let id = self.edges.insert(EdgeData { a, b, chain, kind });
        self.attach(a, id);
        self.attach(b, id);
        Ok(id)
    }

    /// Inserts a parallel copy of edge `id` tagged `kind`, and returns the
    /// new ID.
    ///
    /// The copy joins the same nodes with the same chain. Chain ends are not
    /// checked against node positions, since a merge may have moved the
    /// nodes away from them.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the edge is missing.
    pub fn duplicate_edge(&mut self, id: EdgeId, kind: EdgeKind) -> Result<EdgeId, TopologyError> {
        let source = self.edge(id)?;
        let copy = EdgeData {
            a: source.a,
            b: source.b,
            chain: source.chain.clone(),
            kind,
        };
        let (a, b) = (copy.a, copy.b);
        let new_id = self.edges.insert(copy);
        self.attach(a, new_id);
        self.attach(b, new_id);
        Ok(new_id)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Iterates over all edges in arena order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeData, TopologyError> {
        let data = self
            .edges
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))?;
        for end in [data.a, data.b] {
            if let Some(list) = self.incidence.get_mut(end) {
                list.retain(|&e| e != id);
            }
        }
        Ok(data)
    }

    // --- Queries ---

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Incident edge ids of `node`, in attachment order. Self-loops appear
    /// twice. Unknown nodes have no incident edges.
    #[must_use]
    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        self.incidence.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edge ends at `node`.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.incident_edges(node).len()
    }

    /// Nodes of odd degree, in arena order.
    #[must_use]
    pub fn odd_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|&id| self.degree(id) % 2 == 1)
            .collect()
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> usize {
        self.edges.values().map(EdgeData::weight).sum()
    }

    /// Returns `true` if every node with at least one edge can reach every
    /// other such node. Isolated nodes are ignored; an edgeless graph is
    /// connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(seed) = self.nodes.keys().find(|&id| self.degree(id) > 0) else {
            return true;
        };

        let mut seen: SecondaryMap<NodeId, ()> = SecondaryMap::new();
        let mut stack = vec![seed];
        seen.insert(seed, ());
        while let Some(node) = stack.pop() {
            for &e in self.incident_edges(node) {
                let Some(next) = self.edges.get(e).and_then(|d| d.opposite(node)) else {
                    continue;
                };
                if seen.insert(next, ()).is_none() {
                    stack.push(next);
                }
            }
        }

        self.nodes
            .keys()
            .all(|id| self.degree(id) == 0 || seen.contains_key(id))
    }

    // --- Structural edits ---

    /// Fuses `absorb` into `keep` and returns the number of edges dropped.
    ///
    /// Edges joining the two nodes would collapse into zero-length
    /// self-loops and are deleted. Every other edge of `absorb` is
    /// re-attached to `keep`, with its pixel chain left untouched. The fused
    /// node is a junction if either input was.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is missing or both ids are the same.
    pub fn fuse_nodes(&mut self, keep: NodeId, absorb: NodeId) -> Result<usize, TopologyError> {
        self.node(keep)?;
        self.node(absorb)?;
        if keep == absorb {
            return Err(TopologyError::EntityNotFound(
                "a second node to fuse with".into(),
            ));
        }

        let joining: Vec<EdgeId> = self
            .incident_edges(absorb)
            .iter()
            .copied()
            .filter(|&e| self.edges.get(e).and_then(|d| d.opposite(absorb)) == Some(keep))
            .collect();
        let mut dropped = 0;
        for e in joining {
            if self.edges.contains_key(e) {
                self.remove_edge(e)?;
                dropped += 1;
            }
        }

        let moved = self.incidence.remove(absorb).unwrap_or_default();
        for &e in &moved {
            if let Some(edge) = self.edges.get_mut(e) {
                if edge.a == absorb {
                    edge.a = keep;
                }
                if edge.b == absorb {
                    edge.b = keep;
                }
            }
        }
        if let Some(list) = self.incidence.get_mut(keep) {
            list.extend(moved);
        }

        let absorbed = self
            .nodes
            .remove(absorb)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))?;
        self.positions.remove(&absorbed.position);
        if absorbed.kind == NodeKind::Junction {
            if let Some(node) = self.nodes.get_mut(keep) {
                node.kind = NodeKind::Junction;
            }
        }
        Ok(dropped)
    }

    fn attach(&mut self, node: NodeId, edge: EdgeId) {
        if let Some(list) = self.incidence.get_mut(node) {
            list.push(edge);
        }
    }
}
