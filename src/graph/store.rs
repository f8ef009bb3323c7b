//! Graph facade
//!
//! Composes the label bimap and the adjacency backend behind a [`GraphKind`]
//! and is the only mutation surface the rest of the crate uses. Absence is a
//! normal outcome: queries answer with `0`, `""` or `None` and mutations with
//! `false` or a zero count rather than an error.

use super::adjacency::{AdjacencyStore, AdjacentArcs};
use super::labels::LabelMap;
use super::types::{Directedness, Edge, GraphKind, NodeId, Weighting};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Graph kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: GraphKind, found: GraphKind },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Anything that can address a node: its id or its label
pub trait NodeRef {
    /// The id of the addressed node, if it exists in `graph`
    fn resolve(&self, graph: &Graph) -> Option<NodeId>;
}

impl NodeRef for NodeId {
    fn resolve(&self, graph: &Graph) -> Option<NodeId> {
        (self.index() < graph.num_nodes()).then_some(*self)
    }
}

impl NodeRef for str {
    fn resolve(&self, graph: &Graph) -> Option<NodeId> {
        graph.labels.id_of(self)
    }
}

impl NodeRef for String {
    fn resolve(&self, graph: &Graph) -> Option<NodeId> {
        graph.labels.id_of(self)
    }
}

impl<T: NodeRef + ?Sized> NodeRef for &T {
    fn resolve(&self, graph: &Graph) -> Option<NodeId> {
        (**self).resolve(graph)
    }
}

/// Summary of a graph's aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub name: String,
    pub kind: GraphKind,
    pub node_count: usize,
    pub edge_count: usize,
    pub self_edge_count: usize,
    pub total_weight: f64,
    pub density: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

/// In-memory dense-id graph.
///
/// Node ids always form `0..num_nodes()`. [`Graph::remove_node`] keeps them
/// dense by moving the node with the highest id into the freed slot, so ids
/// cached across a removal may now point at a different node.
///
/// Undirected non-self edges are stored as two arcs updated together; a
/// self-loop is a single arc in every mode.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    kind: GraphKind,
    name: String,
    labels: LabelMap,
    adjacency: AdjacencyStore,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(kind: GraphKind) -> Self {
        Graph {
            kind,
            name: String::new(),
            labels: LabelMap::new(),
            adjacency: AdjacencyStore::new(),
        }
    }

    pub fn with_name(kind: GraphKind, name: impl Into<String>) -> Self {
        let mut graph = Self::new(kind);
        graph.name = name.into();
        graph
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    pub fn is_weighted(&self) -> bool {
        self.kind.is_weighted()
    }

    fn directedness(&self) -> Directedness {
        self.kind.directedness()
    }

    fn weighting(&self) -> Weighting {
        self.kind.weighting()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ---- aggregate queries ----

    pub fn num_nodes(&self) -> usize {
        self.adjacency.num_nodes()
    }

    /// Logical edge count; an undirected self-loop counts as one edge
    pub fn num_edges(&self) -> usize {
        self.directedness()
            .fold_count(self.adjacency.num_arcs(), self.adjacency.num_self_arcs())
    }

    pub fn num_self_edges(&self) -> usize {
        self.adjacency.num_self_arcs()
    }

    pub fn total_weight(&self) -> f64 {
        self.directedness()
            .fold_weight(self.adjacency.total_weight(), self.adjacency.self_arcs_weight())
    }

    pub fn self_edges_weight(&self) -> f64 {
        self.adjacency.self_arcs_weight()
    }

    /// Edge count over the maximum possible edge count.
    ///
    /// The diagonal counts towards the maximum only when the graph actually
    /// holds a self-loop. Graphs too small to hold any edge report `0`.
    pub fn density(&self) -> f64 {
        let n = self.num_nodes() as f64;
        let diagonal = if self.num_self_edges() > 0 { 0.0 } else { -1.0 };
        let denominator = n * (n + diagonal);
        if denominator <= 0.0 {
            return 0.0;
        }
        self.directedness().density_factor() * self.num_edges() as f64 / denominator
    }

    pub fn minimum_weight(&self) -> f64 {
        self.extreme_weight(false)
    }

    pub fn maximum_weight(&self) -> f64 {
        self.extreme_weight(true)
    }

    fn extreme_weight(&self, max: bool) -> f64 {
        if !self.is_weighted() {
            return 1.0;
        }
        let weights = (0..self.num_nodes())
            .flat_map(|i| self.adjacency.out_arcs(NodeId(i)))
            .map(|(_, w)| w);
        if max {
            weights.fold(f64::NEG_INFINITY, f64::max)
        } else {
            weights.fold(f64::INFINITY, f64::min)
        }
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            name: self.name.clone(),
            kind: self.kind,
            node_count: self.num_nodes(),
            edge_count: self.num_edges(),
            self_edge_count: self.num_self_edges(),
            total_weight: self.total_weight(),
            density: self.density(),
            min_weight: self.minimum_weight(),
            max_weight: self.maximum_weight(),
        }
    }

    // ---- node queries ----

    /// Resolve a label (or validate an id)
    pub fn node_id(&self, node: impl NodeRef) -> Option<NodeId> {
        node.resolve(self)
    }

    /// Label of a node, or `""` if the id is out of range
    pub fn node_label(&self, id: NodeId) -> &str {
        self.labels.label_of(id).unwrap_or("")
    }

    pub fn contains_node(&self, node: impl NodeRef) -> bool {
        node.resolve(self).is_some()
    }

    /// All labels in id order
    pub fn node_labels(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.labels.iter()
    }

    pub fn in_degree(&self, node: impl NodeRef) -> usize {
        node.resolve(self).map_or(0, |id| self.adjacency.in_degree(id))
    }

    pub fn out_degree(&self, node: impl NodeRef) -> usize {
        node.resolve(self).map_or(0, |id| self.adjacency.out_degree(id))
    }

    pub fn in_weight(&self, node: impl NodeRef) -> f64 {
        node.resolve(self).map_or(0.0, |id| self.adjacency.in_weight(id))
    }

    pub fn out_weight(&self, node: impl NodeRef) -> f64 {
        node.resolve(self).map_or(0.0, |id| self.adjacency.out_weight(id))
    }

    /// Outgoing `(neighbor, weight)` pairs ordered by neighbor id
    pub fn out_edges(&self, node: impl NodeRef) -> AdjacentArcs<'_> {
        node.resolve(self)
            .map(|id| self.adjacency.out_arcs(id))
            .unwrap_or_default()
    }

    /// Incoming `(neighbor, weight)` pairs ordered by neighbor id
    pub fn in_edges(&self, node: impl NodeRef) -> AdjacentArcs<'_> {
        node.resolve(self)
            .map(|id| self.adjacency.in_arcs(id))
            .unwrap_or_default()
    }

    // ---- edge queries ----

    /// Weight of arc `from -> to`, `0` if absent
    pub fn edge_weight(&self, from: impl NodeRef, to: impl NodeRef) -> f64 {
        self.arc(from, to).unwrap_or(0.0)
    }

    pub fn has_edge(&self, from: impl NodeRef, to: impl NodeRef) -> bool {
        self.arc(from, to).is_some()
    }

    fn arc(&self, from: impl NodeRef, to: impl NodeRef) -> Option<f64> {
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        self.adjacency.arc_weight(from, to)
    }

    /// Every stored arc, ordered by source then target.
    ///
    /// Undirected non-self edges appear once per direction.
    pub fn all_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.adjacency.num_arcs());
        for i in 0..self.num_nodes() {
            let from = NodeId(i);
            edges.extend(
                self.adjacency
                    .out_arcs(from)
                    .map(|(to, weight)| Edge::new(from, to, weight)),
            );
        }
        edges
    }

    // ---- node mutation ----

    /// Add a node, or return the id of the node already carrying `label`
    pub fn add_node(&mut self, label: &str) -> NodeId {
        let (id, inserted) = self.labels.insert(label);
        if inserted {
            let backend_id = self.adjacency.insert_node();
            debug_assert_eq!(id, backend_id);
        }
        id
    }

    /// Add a node labelled with the current node count.
    ///
    /// If that label was already chosen manually, the existing node is
    /// returned instead.
    pub fn add_unlabeled_node(&mut self) -> NodeId {
        let label = self.num_nodes().to_string();
        self.add_node(&label)
    }

    /// Remove a node and every edge touching it.
    ///
    /// The node with the highest id is renumbered to the removed node's id;
    /// all other ids are unchanged.
    pub fn remove_node(&mut self, node: impl NodeRef) -> bool {
        let Some(id) = node.resolve(self) else {
            return false;
        };
        let last = NodeId(self.num_nodes() - 1);
        if !self.labels.swap(id, last) {
            return false;
        }
        self.adjacency.delete_node(id);
        self.labels.erase(last);

        if id != last {
            debug!(removed = id.index(), relocated_from = last.index(), "node relocated");
        }
        true
    }

    /// Remove several nodes, returning how many were removed.
    ///
    /// Nodes are resolved to labels up front so renumbering between removals
    /// cannot redirect a later removal.
    pub fn remove_nodes<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator,
        I::Item: NodeRef,
    {
        let labels: BTreeSet<String> = nodes
            .into_iter()
            .filter_map(|node| node.resolve(self))
            .map(|id| self.node_label(id).to_owned())
            .collect();
        labels
            .iter()
            .filter(|label| self.remove_node(label.as_str()))
            .count()
    }

    /// Remove every node without in- or out-edges
    pub fn remove_isolates(&mut self) -> usize {
        let isolates: Vec<NodeId> = (0..self.num_nodes())
            .map(NodeId)
            .filter(|&id| self.adjacency.in_degree(id) == 0 && self.adjacency.out_degree(id) == 0)
            .collect();
        self.remove_nodes(isolates)
    }

    /// Remove all edges touching a node, keeping the node and its id
    pub fn isolate_node(&mut self, node: impl NodeRef) -> bool {
        let Some(id) = node.resolve(self) else {
            return false;
        };
        self.remove_adjacent_edges(id);
        true
    }

    pub fn isolate_nodes<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator,
        I::Item: NodeRef,
    {
        nodes
            .into_iter()
            .filter(|node| self.isolate_node(node))
            .count()
    }

    // ---- edge mutation ----

    /// Add or reweight an edge.
    ///
    /// Returns `true` when the `from -> to` arc already existed (the call
    /// reweighted it) and `false` when it is new. Unweighted graphs store `1`
    /// for any nonzero weight and treat a zero weight as "no edge", leaving
    /// the graph untouched.
    pub fn add_edge(&mut self, from: impl NodeRef, to: impl NodeRef, weight: f64) -> bool {
        let (Some(from), Some(to)) = (from.resolve(self), to.resolve(self)) else {
            warn!("add_edge: endpoint not found");
            return false;
        };
        let Some(weight) = self.weighting().on_insert(weight) else {
            return self.adjacency.arc_weight(from, to).is_some();
        };
        if let Some((mirror_from, mirror_to)) = self.directedness().mirror(from, to) {
            self.adjacency.insert_arc(mirror_from, mirror_to, weight);
        }
        self.adjacency.insert_arc(from, to, weight).is_some()
    }

    /// Overwrite the weight of an existing edge; unweighted graphs keep `1`
    pub fn set_edge_weight(&mut self, from: impl NodeRef, to: impl NodeRef, weight: f64) -> bool {
        let (Some(from), Some(to)) = (from.resolve(self), to.resolve(self)) else {
            return false;
        };
        if self.adjacency.arc_weight(from, to).is_none() {
            return false;
        }
        let weight = self.weighting().on_reweight(weight);
        if let Some((mirror_from, mirror_to)) = self.directedness().mirror(from, to) {
            self.adjacency.set_arc_weight(mirror_from, mirror_to, weight);
        }
        self.adjacency.set_arc_weight(from, to, weight).is_some()
    }

    /// Remove an edge; undirected edges succeed only if both arcs were removed
    pub fn remove_edge(&mut self, from: impl NodeRef, to: impl NodeRef) -> bool {
        let (Some(from), Some(to)) = (from.resolve(self), to.resolve(self)) else {
            return false;
        };
        if self.adjacency.delete_arc(from, to).is_none() {
            return false;
        }
        match self.directedness().mirror(from, to) {
            Some((mirror_from, mirror_to)) => self.adjacency.delete_arc(mirror_from, mirror_to).is_some(),
            None => true,
        }
    }

    /// Remove a batch of edges, returning how many were removed
    pub fn remove_edges<I, A, B>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = (A, B)>,
        A: NodeRef,
        B: NodeRef,
    {
        edges
            .into_iter()
            .filter(|(from, to)| self.remove_edge(from, to))
            .count()
    }

    /// Remove every edge touching a node.
    ///
    /// Directed graphs report in- plus out-edges; undirected graphs report
    /// each edge once.
    pub fn remove_adjacent_edges(&mut self, node: impl NodeRef) -> usize {
        let Some(id) = node.resolve(self) else {
            return 0;
        };
        let out_neighbors: Vec<NodeId> = self.adjacency.out_arcs(id).map(|(n, _)| n).collect();
        let in_neighbors: Vec<NodeId> = self.adjacency.in_arcs(id).map(|(n, _)| n).collect();

        for &neighbor in &out_neighbors {
            self.remove_edge(id, neighbor);
        }
        for &neighbor in &in_neighbors {
            self.remove_edge(neighbor, id);
        }

        match self.directedness() {
            Directedness::Directed => in_neighbors.len() + out_neighbors.len(),
            Directedness::Undirected => out_neighbors.len(),
        }
    }

    /// Drop every edge, keeping all nodes
    pub fn remove_all_edges(&mut self) {
        self.adjacency.delete_all_arcs();
    }

    /// Give every node a self-loop; a zero weight does nothing
    pub fn add_self_edges(&mut self, weight: f64) {
        if weight == 0.0 {
            return;
        }
        for i in 0..self.num_nodes() {
            self.add_edge(NodeId(i), NodeId(i), weight);
        }
    }

    pub fn remove_self_edges(&mut self) {
        for i in 0..self.num_nodes() {
            self.remove_edge(NodeId(i), NodeId(i));
        }
    }

    /// Reset to the empty graph, keeping the kind but not the name
    pub fn clear(&mut self) {
        self.name.clear();
        self.labels.clear();
        self.adjacency.clear();
    }

    // ---- mode conversion ----

    /// Rewrite every weight to `1` if above `threshold`, else `0`.
    ///
    /// Zero-weight arcs are kept in storage: they count towards degrees and
    /// edge totals even though an unweighted graph treats them as absent.
    /// Fails on an already unweighted graph.
    pub fn convert_to_unweighted(&mut self, threshold: f64) -> bool {
        if !self.is_weighted() {
            return false;
        }
        for edge in self.all_edges() {
            let weight = if edge.weight > threshold { 1.0 } else { 0.0 };
            self.adjacency.set_arc_weight(edge.from, edge.to, weight);
        }
        self.kind = self.kind.with_weighting(Weighting::Unweighted);
        debug!(threshold, kind = %self.kind, "converted to unweighted");
        true
    }

    /// Add the reverse of every arc, then mark the graph undirected.
    ///
    /// Where both directions already exist the reverse arc takes the weight
    /// of whichever direction is visited first. Fails if already undirected.
    pub fn convert_to_undirected(&mut self) -> bool {
        if !self.is_directed() {
            return false;
        }
        for i in 0..self.num_nodes() {
            let from = NodeId(i);
            let arcs: Vec<(NodeId, f64)> = self.adjacency.out_arcs(from).collect();
            for (to, weight) in arcs {
                self.adjacency.insert_arc(to, from, weight);
            }
        }
        self.kind = self.kind.with_directedness(Directedness::Undirected);
        debug!(kind = %self.kind, "converted to undirected");
        true
    }

    /// Mark the graph directed; no arcs change
    pub fn convert_to_directed(&mut self) -> bool {
        if self.is_directed() {
            return false;
        }
        self.kind = self.kind.with_directedness(Directedness::Directed);
        true
    }

    /// Mark the graph weighted; no arcs change
    pub fn convert_to_weighted(&mut self) -> bool {
        if self.is_weighted() {
            return false;
        }
        self.kind = self.kind.with_weighting(Weighting::Weighted);
        true
    }
}
