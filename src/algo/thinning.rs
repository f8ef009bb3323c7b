//! Random edge thinning

use crate::graph::Graph;
use rand::Rng;
use tracing::debug;

/// Remove each edge independently with probability `fraction`.
///
/// Every logical edge is considered exactly once: undirected graphs visit
/// the `from <= to` arc of each pair, self-loops included. A fraction of `0`
/// leaves the graph untouched and `1` removes every edge.
///
/// Returns the fraction of edges retained (`1.0` for an edgeless graph).
pub fn remove_edges_randomly<R: Rng>(graph: &mut Graph, fraction: f64, rng: &mut R) -> f64 {
    let before = graph.num_edges();
    if before == 0 {
        return 1.0;
    }

    let directed = graph.is_directed();
    let doomed: Vec<_> = graph
        .all_edges()
        .into_iter()
        .filter(|edge| directed || edge.from <= edge.to)
        .filter(|_| rng.gen::<f64>() < fraction)
        .collect();

    for edge in &doomed {
        graph.remove_edge(edge.from, edge.to);
    }

    let after = graph.num_edges();
    debug!(before, after, fraction, "thinned edges");
    after as f64 / before as f64
}
