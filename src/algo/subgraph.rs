//! Subgraph extraction, copying and neighbourhood sampling

use crate::graph::{Graph, GraphError, GraphResult, NodeId};
use densegraph_algorithms::reach_within;
use std::collections::BTreeSet;
use tracing::debug;

/// Duplicate every node (with its label) and edge of `src` into `dst`.
///
/// `dst` is cleared first, takes `src`'s name and keeps its own kind, so the
/// copy is exact when both kinds match. Returns the copied edge count.
pub fn copy_graph(src: &Graph, dst: &mut Graph) -> usize {
    dst.clear();
    dst.set_name(src.name());
    for (_, label) in src.node_labels() {
        dst.add_node(label);
    }
    for edge in src.all_edges() {
        dst.add_edge(edge.from, edge.to, edge.weight);
    }
    dst.num_edges()
}

/// Build the subgraph of `graph` induced by `nodes` into `sg`.
///
/// Every requested node is kept, isolated or not, together with every arc
/// whose endpoints are both requested. Labels carry over; ids are reissued
/// densely in `sg`. The result is named `{source}_sg_{label}` after the
/// lowest-id member.
///
/// Fails, leaving `sg` untouched, if the kinds differ or a node is unknown.
/// Returns the subgraph's edge count.
pub fn extract_subgraph<I>(graph: &Graph, nodes: I, sg: &mut Graph) -> GraphResult<usize>
where
    I: IntoIterator<Item = NodeId>,
{
    if sg.kind() != graph.kind() {
        return Err(GraphError::KindMismatch {
            expected: graph.kind(),
            found: sg.kind(),
        });
    }
    let members: BTreeSet<NodeId> = nodes.into_iter().collect();
    if let Some(&missing) = members.iter().find(|id| id.index() >= graph.num_nodes()) {
        return Err(GraphError::NodeNotFound(missing));
    }

    sg.clear();
    for &node in &members {
        sg.add_node(graph.node_label(node));
    }
    for &node in &members {
        let from = graph.node_label(node);
        for (neighbor, weight) in graph.out_edges(node) {
            if members.contains(&neighbor) {
                sg.add_edge(from, graph.node_label(neighbor), weight);
            }
        }
    }

    let representative = members.first().map_or("", |&id| graph.node_label(id));
    sg.set_name(format!("{}_sg_{}", graph.name(), representative));

    debug!(
        nodes = sg.num_nodes(),
        edges = sg.num_edges(),
        name = sg.name(),
        "extracted subgraph"
    );
    Ok(sg.num_edges())
}

/// Sample the neighbourhood of `seeds` into `sample`.
///
/// Each seed runs its own breadth-first search out to `hop_dist` hops along
/// outgoing arcs; the union of reached nodes is extracted as an induced
/// subgraph. Unknown seeds are skipped.
pub fn sample_graph<I>(graph: &Graph, seeds: I, hop_dist: usize, sample: &mut Graph) -> GraphResult<usize>
where
    I: IntoIterator<Item = NodeId>,
{
    let reached = reach_within(graph, seeds.into_iter().map(|id| id.index()), hop_dist);
    debug!(reached = reached.len(), hop_dist, "sampled neighbourhood");
    extract_subgraph(graph, reached.into_iter().map(NodeId), sample)
}
