//! Neighbor and degree collection helpers

use crate::graph::{Graph, NodeId, NodeRef};

/// Which adjacency of a node to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Neighbor ids of a node in ascending order; empty if the node is unknown
pub fn neighbors<C>(graph: &Graph, node: impl NodeRef, direction: Direction) -> C
where
    C: FromIterator<NodeId>,
{
    match direction {
        Direction::Outgoing => graph.out_edges(node).map(|(id, _)| id).collect(),
        Direction::Incoming => graph.in_edges(node).map(|(id, _)| id).collect(),
    }
}

/// `(id, degree)` for every node, as arc counts or weight sums
pub fn degree_sequence<C>(graph: &Graph, direction: Direction, weighted: bool) -> C
where
    C: FromIterator<(NodeId, f64)>,
{
    (0..graph.num_nodes())
        .map(NodeId)
        .map(|id| {
            let degree = match (direction, weighted) {
                (Direction::Outgoing, true) => graph.out_weight(id),
                (Direction::Outgoing, false) => graph.out_degree(id) as f64,
                (Direction::Incoming, true) => graph.in_weight(id),
                (Direction::Incoming, false) => graph.in_degree(id) as f64,
            };
            (id, degree)
        })
        .collect()
}
