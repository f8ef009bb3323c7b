//! Hop-bounded traversal
//!
//! Breadth-first search measured in hop count only; arc weights are ignored.

use super::common::{GraphView, NodeIndex};
use std::collections::{BTreeSet, VecDeque};
use tracing::warn;

/// Breadth-first search from `source`, stopping `max_hops` hops out.
///
/// Returns every reached node with its hop distance, in discovery order.
/// The source itself is always first at distance 0. An out-of-range source
/// yields an empty result.
pub fn bounded_bfs<G: GraphView + ?Sized>(
    view: &G,
    source: NodeIndex,
    max_hops: usize,
) -> Vec<(NodeIndex, usize)> {
    let n = view.node_count();
    if source >= n {
        warn!(source, node_count = n, "bfs source out of range");
        return Vec::new();
    }

    let mut distance: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();
    let mut reached = Vec::new();

    distance[source] = Some(0);
    queue.push_back(source);
    reached.push((source, 0));

    while let Some(current) = queue.pop_front() {
        let hops = distance[current].unwrap_or(0);
        if hops >= max_hops {
            continue;
        }
        for (next, _) in view.out_arcs(current) {
            if distance[next].is_none() {
                distance[next] = Some(hops + 1);
                reached.push((next, hops + 1));
                queue.push_back(next);
            }
        }
    }

    reached
}

/// Union of the nodes within `max_hops` of any seed.
///
/// Each seed runs its own search so a node close to one seed is never
/// pruned because another seed visited it first at a larger distance.
pub fn reach_within<G, I>(view: &G, seeds: I, max_hops: usize) -> BTreeSet<NodeIndex>
where
    G: GraphView + ?Sized,
    I: IntoIterator<Item = NodeIndex>,
{
    let mut reached = BTreeSet::new();
    for seed in seeds {
        reached.extend(bounded_bfs(view, seed, max_hops).into_iter().map(|(idx, _)| idx));
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CsrGraph;

    fn path(n: usize) -> CsrGraph {
        // 0->1->2->...->n-1
        let outgoing = (0..n)
            .map(|i| if i + 1 < n { vec![(i + 1, 1.0)] } else { vec![] })
            .collect();
        CsrGraph::from_adjacency_list(outgoing)
    }

    #[test]
    fn test_bounded_bfs_distances() {
        let view = path(5);
        let reached = bounded_bfs(&view, 1, 2);
        assert_eq!(reached, vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_bounded_bfs_zero_hops() {
        let view = path(3);
        assert_eq!(bounded_bfs(&view, 0, 0), vec![(0, 0)]);
    }

    #[test]
    fn test_bounded_bfs_invalid_source() {
        let view = path(3);
        assert!(bounded_bfs(&view, 7, 2).is_empty());
    }

    #[test]
    fn test_reach_within_unions_seeds() {
        let view = path(6);
        let reached = reach_within(&view, [0, 4], 1);
        assert_eq!(reached.into_iter().collect::<Vec<_>>(), vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_bfs_follows_out_arcs_only() {
        // 1->0, so 0 cannot reach 1
        let view = CsrGraph::from_adjacency_list(vec![vec![], vec![(0, 1.0)]]);
        assert_eq!(bounded_bfs(&view, 0, 3), vec![(0, 0)]);
        assert_eq!(bounded_bfs(&view, 1, 3), vec![(1, 0), (0, 1)]);
    }
}
