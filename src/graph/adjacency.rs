//! Adjacency backend
//!
//! Per-node in/out adjacency of directed weighted arcs, ordered by neighbor
//! id, plus the running aggregates the graph facade folds into edge counts
//! and weight totals. At most one arc exists per ordered pair.

use super::types::NodeId;
use std::collections::btree_map::{self, BTreeMap};

#[derive(Debug, Clone, Default)]
struct AdjacencyEntry {
    out: BTreeMap<NodeId, f64>,
    inc: BTreeMap<NodeId, f64>,
    out_weight: f64,
    in_weight: f64,
}

/// Ordered `(neighbor, weight)` pairs adjacent to one node
#[derive(Debug, Clone, Default)]
pub struct AdjacentArcs<'a> {
    inner: Option<btree_map::Iter<'a, NodeId, f64>>,
}

impl<'a> Iterator for AdjacentArcs<'a> {
    type Item = (NodeId, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(|(&id, &w)| (id, w))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for AdjacentArcs<'_> {}

#[derive(Debug, Clone, Default)]
pub(crate) struct AdjacencyStore {
    nodes: Vec<AdjacencyEntry>,
    arc_count: usize,
    self_arc_count: usize,
    total_weight: f64,
    self_weight: f64,
}

impl AdjacencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arc_count
    }

    pub fn num_self_arcs(&self) -> usize {
        self.self_arc_count
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn self_arcs_weight(&self) -> f64 {
        self.self_weight
    }

    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Append a node; its id is the prior node count
    pub fn insert_node(&mut self) -> NodeId {
        self.nodes.push(AdjacencyEntry::default());
        NodeId(self.nodes.len() - 1)
    }

    /// Upsert arc `from -> to`, returning the weight it replaced
    pub fn insert_arc(&mut self, from: NodeId, to: NodeId, weight: f64) -> Option<f64> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        let previous = self.nodes[from.index()].out.insert(to, weight);
        self.nodes[to.index()].inc.insert(from, weight);

        let delta = weight - previous.unwrap_or(0.0);
        self.nodes[from.index()].out_weight += delta;
        self.nodes[to.index()].in_weight += delta;
        self.total_weight += delta;
        if from == to {
            self.self_weight += delta;
        }

        if previous.is_none() {
            self.arc_count += 1;
            if from == to {
                self.self_arc_count += 1;
            }
        }
        previous
    }

    /// Overwrite the weight of an existing arc; `None` if it does not exist
    pub fn set_arc_weight(&mut self, from: NodeId, to: NodeId, weight: f64) -> Option<f64> {
        self.arc_weight(from, to)?;
        self.insert_arc(from, to, weight)
    }

    /// Remove arc `from -> to`, returning its weight
    pub fn delete_arc(&mut self, from: NodeId, to: NodeId) -> Option<f64> {
        if !self.contains(to) {
            return None;
        }
        let weight = self.nodes.get_mut(from.index())?.out.remove(&to)?;
        self.nodes[to.index()].inc.remove(&from);

        self.nodes[from.index()].out_weight -= weight;
        self.nodes[to.index()].in_weight -= weight;
        self.total_weight -= weight;
        self.arc_count -= 1;
        if from == to {
            self.self_weight -= weight;
            self.self_arc_count -= 1;
        }
        Some(weight)
    }

    /// Swap-and-truncate node removal.
    ///
    /// Discards every arc incident to `id`, then relocates the node holding
    /// the highest id into slot `id`, rewriting the arcs that referenced it.
    /// Runs in time proportional to the degrees of the two nodes involved.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }

        let removed = std::mem::take(&mut self.nodes[id.index()]);
        for (&to, &weight) in &removed.out {
            if to != id {
                let neighbor = &mut self.nodes[to.index()];
                neighbor.inc.remove(&id);
                neighbor.in_weight -= weight;
            } else {
                self.self_arc_count -= 1;
                self.self_weight -= weight;
            }
            self.arc_count -= 1;
            self.total_weight -= weight;
        }
        for (&from, &weight) in &removed.inc {
            // the self-loop was already accounted for with the out-arcs
            if from == id {
                continue;
            }
            let neighbor = &mut self.nodes[from.index()];
            neighbor.out.remove(&id);
            neighbor.out_weight -= weight;
            self.arc_count -= 1;
            self.total_weight -= weight;
        }

        let last = NodeId(self.nodes.len() - 1);
        if last != id {
            let mut moved = std::mem::take(&mut self.nodes[last.index()]);
            for (&to, &weight) in &moved.out {
                if to != last {
                    let inc = &mut self.nodes[to.index()].inc;
                    inc.remove(&last);
                    inc.insert(id, weight);
                }
            }
            for (&from, &weight) in &moved.inc {
                if from != last {
                    let out = &mut self.nodes[from.index()].out;
                    out.remove(&last);
                    out.insert(id, weight);
                }
            }
            // (last, last) becomes (id, id)
            if let Some(weight) = moved.out.remove(&last) {
                moved.out.insert(id, weight);
            }
            if let Some(weight) = moved.inc.remove(&last) {
                moved.inc.insert(id, weight);
            }
            self.nodes[id.index()] = moved;
        }

        self.nodes.pop();
        true
    }

    /// Drop every arc, keeping the nodes
    pub fn delete_all_arcs(&mut self) {
        for entry in &mut self.nodes {
            *entry = AdjacencyEntry::default();
        }
        self.arc_count = 0;
        self.self_arc_count = 0;
        self.total_weight = 0.0;
        self.self_weight = 0.0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn arc_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.nodes.get(from.index())?.out.get(&to).copied()
    }

    pub fn out_arcs(&self, id: NodeId) -> AdjacentArcs<'_> {
        AdjacentArcs {
            inner: self.nodes.get(id.index()).map(|entry| entry.out.iter()),
        }
    }

    pub fn in_arcs(&self, id: NodeId) -> AdjacentArcs<'_> {
        AdjacentArcs {
            inner: self.nodes.get(id.index()).map(|entry| entry.inc.iter()),
        }
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.nodes.get(id.index()).map_or(0, |entry| entry.out.len())
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.nodes.get(id.index()).map_or(0, |entry| entry.inc.len())
    }

    pub fn out_weight(&self, id: NodeId) -> f64 {
        self.nodes.get(id.index()).map_or(0.0, |entry| entry.out_weight)
    }

    pub fn in_weight(&self, id: NodeId) -> f64 {
        self.nodes.get(id.index()).map_or(0.0, |entry| entry.in_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_nodes(n: usize) -> AdjacencyStore {
        let mut store = AdjacencyStore::new();
        for _ in 0..n {
            store.insert_node();
        }
        store
    }

    fn out_of(store: &AdjacencyStore, id: usize) -> Vec<(usize, f64)> {
        store.out_arcs(NodeId(id)).map(|(n, w)| (n.index(), w)).collect()
    }

    fn in_of(store: &AdjacencyStore, id: usize) -> Vec<(usize, f64)> {
        store.in_arcs(NodeId(id)).map(|(n, w)| (n.index(), w)).collect()
    }

    #[test]
    fn test_insert_node_ids_are_dense() {
        let mut store = AdjacencyStore::new();
        assert_eq!(store.insert_node(), NodeId(0));
        assert_eq!(store.insert_node(), NodeId(1));
        assert_eq!(store.num_nodes(), 2);
    }

    #[test]
    fn test_insert_arc_upserts() {
        let mut store = store_with_nodes(2);
        assert_eq!(store.insert_arc(NodeId(0), NodeId(1), 2.0), None);
        assert_eq!(store.insert_arc(NodeId(0), NodeId(1), 5.0), Some(2.0));

        assert_eq!(store.num_arcs(), 1);
        assert_eq!(store.total_weight(), 5.0);
        assert_eq!(store.out_weight(NodeId(0)), 5.0);
        assert_eq!(store.in_weight(NodeId(1)), 5.0);
        assert_eq!(store.arc_weight(NodeId(0), NodeId(1)), Some(5.0));
        assert_eq!(store.arc_weight(NodeId(1), NodeId(0)), None);
    }

    #[test]
    fn test_self_arc_aggregates() {
        let mut store = store_with_nodes(1);
        store.insert_arc(NodeId(0), NodeId(0), 3.0);
        store.insert_arc(NodeId(0), NodeId(0), 4.0);

        assert_eq!(store.num_arcs(), 1);
        assert_eq!(store.num_self_arcs(), 1);
        assert_eq!(store.self_arcs_weight(), 4.0);
        assert_eq!(store.out_degree(NodeId(0)), 1);
        assert_eq!(store.in_degree(NodeId(0)), 1);

        assert_eq!(store.delete_arc(NodeId(0), NodeId(0)), Some(4.0));
        assert_eq!(store.num_self_arcs(), 0);
        assert_eq!(store.self_arcs_weight(), 0.0);
        assert_eq!(store.num_arcs(), 0);
    }

    #[test]
    fn test_arcs_to_missing_nodes_are_ignored() {
        let mut store = store_with_nodes(1);
        assert_eq!(store.insert_arc(NodeId(0), NodeId(3), 1.0), None);
        assert_eq!(store.num_arcs(), 0);
        assert_eq!(store.delete_arc(NodeId(4), NodeId(0)), None);
        assert_eq!(store.set_arc_weight(NodeId(0), NodeId(0), 2.0), None);
        assert_eq!(store.out_arcs(NodeId(9)).count(), 0);
    }

    #[test]
    fn test_delete_node_relocates_last() {
        // ring 0->1->2->3->4->0
        let mut store = store_with_nodes(5);
        for i in 0..5 {
            store.insert_arc(NodeId(i), NodeId((i + 1) % 5), (i + 1) as f64);
        }

        assert!(store.delete_node(NodeId(2)));
        assert_eq!(store.num_nodes(), 4);
        assert_eq!(store.num_arcs(), 3);
        assert_eq!(store.total_weight(), 1.0 + 4.0 + 5.0);

        // old 4 now lives at 2: arcs 3->4 (4.0) and 4->0 (5.0) survive
        assert_eq!(out_of(&store, 2), vec![(0, 5.0)]);
        assert_eq!(in_of(&store, 2), vec![(3, 4.0)]);
        assert_eq!(out_of(&store, 3), vec![(2, 4.0)]);
        assert_eq!(in_of(&store, 0), vec![(2, 5.0)]);
        assert!(out_of(&store, 1).is_empty());
        assert_eq!(in_of(&store, 1), vec![(0, 1.0)]);
    }

    #[test]
    fn test_delete_node_with_arcs_to_relocated_node() {
        // 0<->2, 2->2, 1->2
        let mut store = store_with_nodes(3);
        store.insert_arc(NodeId(0), NodeId(2), 1.0);
        store.insert_arc(NodeId(2), NodeId(0), 2.0);
        store.insert_arc(NodeId(2), NodeId(2), 3.0);
        store.insert_arc(NodeId(1), NodeId(2), 4.0);

        assert!(store.delete_node(NodeId(0)));

        // old 2 is now 0: its self-loop and the arc from 1 survive
        assert_eq!(store.num_nodes(), 2);
        assert_eq!(store.num_arcs(), 2);
        assert_eq!(store.num_self_arcs(), 1);
        assert_eq!(store.self_arcs_weight(), 3.0);
        assert_eq!(out_of(&store, 0), vec![(0, 3.0)]);
        assert_eq!(in_of(&store, 0), vec![(0, 3.0), (1, 4.0)]);
        assert_eq!(out_of(&store, 1), vec![(0, 4.0)]);
        assert_eq!(store.out_weight(NodeId(0)), 3.0);
        assert_eq!(store.in_weight(NodeId(0)), 7.0);
    }

    #[test]
    fn test_delete_last_node() {
        let mut store = store_with_nodes(2);
        store.insert_arc(NodeId(0), NodeId(1), 1.0);
        store.insert_arc(NodeId(1), NodeId(1), 1.0);

        assert!(store.delete_node(NodeId(1)));
        assert_eq!(store.num_nodes(), 1);
        assert_eq!(store.num_arcs(), 0);
        assert_eq!(store.num_self_arcs(), 0);
        assert_eq!(store.out_degree(NodeId(0)), 0);
        assert!(!store.delete_node(NodeId(1)));
    }

    #[test]
    fn test_delete_all_arcs_and_clear() {
        let mut store = store_with_nodes(3);
        store.insert_arc(NodeId(0), NodeId(1), 1.0);
        store.insert_arc(NodeId(2), NodeId(2), 1.0);

        store.delete_all_arcs();
        assert_eq!(store.num_nodes(), 3);
        assert_eq!(store.num_arcs(), 0);
        assert_eq!(store.total_weight(), 0.0);
        assert_eq!(store.in_degree(NodeId(1)), 0);

        store.clear();
        assert_eq!(store.num_nodes(), 0);
    }
}
