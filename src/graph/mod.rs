//! Core graph store
//!
//! This module implements the dense-id graph model with:
//! - A label ⇄ id bimap over the dense id range
//! - An ordered in/out adjacency backend with running aggregates
//! - The `Graph` facade, the only mutation surface, keeping both in step

mod adjacency;
mod labels;
pub mod store;
pub mod types;

// Re-export main types
pub use adjacency::AdjacentArcs;
pub use store::{Graph, GraphError, GraphResult, GraphStatistics, NodeRef};
pub use types::{Directedness, Edge, GraphKind, NodeId, Weighting};
