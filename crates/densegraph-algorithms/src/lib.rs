pub mod common;
pub mod propagation;
pub mod transform;
pub mod traversal;

pub use common::{CsrGraph, GraphView, NodeIndex};
pub use propagation::{
    multiply_vector_transform, run_random_walks, MultiplySide, PropagationConfig, PropagationError,
    PropagationResult,
};
pub use transform::{StandardTransform, WeightTransform};
pub use traversal::{bounded_bfs, reach_within};
