//! Graph algorithms module
//!
//! Derived operations built on the `Graph` contract, plus the adapter that
//! exposes a `Graph` to the `densegraph-algorithms` crate.

pub mod neighbors;
pub mod subgraph;
pub mod thinning;

use crate::graph::{AdjacentArcs, Graph, NodeId};
use densegraph_algorithms::{CsrGraph, GraphView, NodeIndex};

// Re-export algorithms
pub use densegraph_algorithms::{
    bounded_bfs, multiply_vector_transform, reach_within, run_random_walks, MultiplySide,
    PropagationConfig, PropagationError, PropagationResult, StandardTransform, WeightTransform,
};
pub use neighbors::{degree_sequence, neighbors, Direction};
pub use subgraph::{copy_graph, extract_subgraph, sample_graph};
pub use thinning::remove_edges_randomly;

fn to_index((id, weight): (NodeId, f64)) -> (NodeIndex, f64) {
    (id.index(), weight)
}

type IndexedArcs<'a> = std::iter::Map<AdjacentArcs<'a>, fn((NodeId, f64)) -> (NodeIndex, f64)>;

impl GraphView for Graph {
    type Arcs<'a> = IndexedArcs<'a>;

    fn node_count(&self) -> usize {
        self.num_nodes()
    }

    fn out_arcs(&self, idx: NodeIndex) -> IndexedArcs<'_> {
        self.out_edges(NodeId(idx))
            .map(to_index as fn((NodeId, f64)) -> (NodeIndex, f64))
    }

    fn in_arcs(&self, idx: NodeIndex) -> IndexedArcs<'_> {
        self.in_edges(NodeId(idx))
            .map(to_index as fn((NodeId, f64)) -> (NodeIndex, f64))
    }

    fn out_degree(&self, idx: NodeIndex) -> usize {
        Graph::out_degree(self, NodeId(idx))
    }

    fn in_degree(&self, idx: NodeIndex) -> usize {
        Graph::in_degree(self, NodeId(idx))
    }

    fn out_weight(&self, idx: NodeIndex) -> f64 {
        Graph::out_weight(self, NodeId(idx))
    }

    fn in_weight(&self, idx: NodeIndex) -> f64 {
        Graph::in_weight(self, NodeId(idx))
    }
}

/// Freeze the graph into a CSR view for repeated read-only passes
pub fn build_view(graph: &Graph) -> CsrGraph {
    CsrGraph::from_view(graph)
}
