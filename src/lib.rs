//! densegraph
//!
//! An in-memory graph engine over dense node identifiers. Node ids always
//! occupy `[0, n)`, so per-node data can live in plain vectors and whole-graph
//! passes need no id translation.
//!
//! # Architecture
//!
//! - [`graph`]: label bimap, ordered adjacency backend and the [`Graph`] facade
//!   that keeps them consistent across swap-and-truncate node removal
//! - [`algo`]: copying, induced subgraphs, neighbourhood sampling, random
//!   thinning and the adapter onto the `densegraph-algorithms` crate, which
//!   supplies matrix-free propagation and bounded breadth-first search
//! - [`config`]: JSON engine configuration
//!
//! Directed/undirected and weighted/unweighted behave identically at the
//! API; an undirected edge is stored as two mirrored arcs and folded back
//! into one logical edge by the counters.
//!
//! ## Example Usage
//!
//! ```rust
//! use densegraph::graph::{Graph, GraphKind, NodeId};
//!
//! let mut graph = Graph::new(GraphKind::UndirectedWeighted);
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! graph.add_node("c");
//!
//! graph.add_edge(a, b, 2.5);
//! graph.add_edge("b", "c", 1.0);
//! assert_eq!(graph.num_edges(), 2);
//! assert_eq!(graph.edge_weight("b", "a"), 2.5);
//!
//! // Removing `a` moves the highest id into its slot
//! graph.remove_node(a);
//! assert_eq!(graph.node_id("c"), Some(NodeId(0)));
//! assert_eq!(graph.num_edges(), 1);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Directedness, Edge, Graph, GraphError, GraphKind, GraphResult, GraphStatistics, NodeId,
    NodeRef, Weighting,
};

pub use algo::{
    copy_graph, extract_subgraph, multiply_vector_transform, remove_edges_randomly,
    run_random_walks, sample_graph, MultiplySide, PropagationConfig, PropagationError,
    StandardTransform, WeightTransform,
};

pub use config::{ConfigError, EngineConfig, SamplingConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
