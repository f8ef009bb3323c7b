//! Shared utilities for graph algorithms
//!
//! Provides the read-only topology contract algorithms run against, plus a
//! frozen Compressed Sparse Row implementation of it.

use std::ops::Range;
use tracing::warn;

/// Dense node index (0..N)
pub type NodeIndex = usize;

/// Slice bounds of row `idx`; empty when `idx` is out of range
fn row(offsets: &[usize], idx: NodeIndex) -> Range<usize> {
    match (offsets.get(idx), offsets.get(idx + 1)) {
        (Some(&start), Some(&end)) => start..end,
        _ => 0..0,
    }
}

/// Read-only view of a weighted, dense-indexed graph.
///
/// Arc iterators yield `(neighbor, weight)` pairs ordered by neighbor index.
/// Undirected graphs are expected to expose each non-self edge as two arcs.
/// An index outside `0..node_count()` has no arcs and zero degree/weight.
pub trait GraphView {
    type Arcs<'a>: Iterator<Item = (NodeIndex, f64)> + 'a
    where
        Self: 'a;

    /// Number of nodes
    fn node_count(&self) -> usize;

    /// Outgoing arcs of a node
    fn out_arcs(&self, idx: NodeIndex) -> Self::Arcs<'_>;

    /// Incoming arcs of a node, keyed by source
    fn in_arcs(&self, idx: NodeIndex) -> Self::Arcs<'_>;

    fn out_degree(&self, idx: NodeIndex) -> usize {
        self.out_arcs(idx).count()
    }

    fn in_degree(&self, idx: NodeIndex) -> usize {
        self.in_arcs(idx).count()
    }

    /// Sum of outgoing arc weights
    fn out_weight(&self, idx: NodeIndex) -> f64 {
        self.out_arcs(idx).map(|(_, w)| w).sum()
    }

    /// Sum of incoming arc weights
    fn in_weight(&self, idx: NodeIndex) -> f64 {
        self.in_arcs(idx).map(|(_, w)| w).sum()
    }
}

/// A dense, integer-indexed snapshot of a graph in Compressed Sparse Row format.
#[derive(Debug, Clone, Default)]
pub struct CsrGraph {
    /// Number of nodes
    pub node_count: usize,

    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<NodeIndex>,
    /// Weights aligned with `out_targets`
    pub out_weights: Vec<f64>,

    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<NodeIndex>,
    /// Weights aligned with `in_sources`
    pub in_weights: Vec<f64>,

    out_sums: Vec<f64>,
    in_sums: Vec<f64>,
}

/// Iterator over one CSR row
pub struct CsrArcs<'a> {
    targets: std::slice::Iter<'a, NodeIndex>,
    weights: std::slice::Iter<'a, f64>,
}

impl<'a> Iterator for CsrArcs<'a> {
    type Item = (NodeIndex, f64);

    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.targets.next()?, *self.weights.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.targets.size_hint()
    }
}

impl CsrGraph {
    /// Build from per-node outgoing adjacency lists.
    ///
    /// Each row is sorted by target; incoming rows are derived. Arcs whose
    /// target is not below the node count are dropped.
    pub fn from_adjacency_list(outgoing: Vec<Vec<(NodeIndex, f64)>>) -> Self {
        let node_count = outgoing.len();
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut out_weights = Vec::new();
        let mut incoming: Vec<Vec<(NodeIndex, f64)>> = vec![Vec::new(); node_count];

        out_offsets.push(0);
        for (source, mut row) in outgoing.into_iter().enumerate() {
            row.sort_by_key(|&(target, _)| target);
            for (target, weight) in row {
                if target >= node_count {
                    warn!(source, target, node_count, "dropping arc to unknown node");
                    continue;
                }
                out_targets.push(target);
                out_weights.push(weight);
                incoming[target].push((source, weight));
            }
            out_offsets.push(out_targets.len());
        }

        // Sources were pushed in ascending order, so rows are already sorted
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::with_capacity(out_targets.len());
        let mut in_weights = Vec::with_capacity(out_targets.len());
        in_offsets.push(0);
        for row in incoming {
            for (source, weight) in row {
                in_sources.push(source);
                in_weights.push(weight);
            }
            in_offsets.push(in_sources.len());
        }

        let out_sums = (0..node_count)
            .map(|i| out_weights[out_offsets[i]..out_offsets[i + 1]].iter().sum())
            .collect();
        let in_sums = (0..node_count)
            .map(|i| in_weights[in_offsets[i]..in_offsets[i + 1]].iter().sum())
            .collect();

        CsrGraph {
            node_count,
            out_offsets,
            out_targets,
            out_weights,
            in_offsets,
            in_sources,
            in_weights,
            out_sums,
            in_sums,
        }
    }

    /// Freeze any view into CSR form
    pub fn from_view<G: GraphView + ?Sized>(view: &G) -> Self {
        let outgoing = (0..view.node_count())
            .map(|i| view.out_arcs(i).collect())
            .collect();
        Self::from_adjacency_list(outgoing)
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.out_targets[row(&self.out_offsets, idx)]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.in_sources[row(&self.in_offsets, idx)]
    }

    /// Total number of arcs
    pub fn arc_count(&self) -> usize {
        self.out_targets.len()
    }
}

impl GraphView for CsrGraph {
    type Arcs<'a> = CsrArcs<'a>;

    fn node_count(&self) -> usize {
        self.node_count
    }

    fn out_arcs(&self, idx: NodeIndex) -> CsrArcs<'_> {
        let range = row(&self.out_offsets, idx);
        CsrArcs {
            targets: self.out_targets[range.clone()].iter(),
            weights: self.out_weights[range].iter(),
        }
    }

    fn in_arcs(&self, idx: NodeIndex) -> CsrArcs<'_> {
        let range = row(&self.in_offsets, idx);
        CsrArcs {
            targets: self.in_sources[range.clone()].iter(),
            weights: self.in_weights[range].iter(),
        }
    }

    fn out_degree(&self, idx: NodeIndex) -> usize {
        row(&self.out_offsets, idx).len()
    }

    fn in_degree(&self, idx: NodeIndex) -> usize {
        row(&self.in_offsets, idx).len()
    }

    fn out_weight(&self, idx: NodeIndex) -> f64 {
        self.out_sums.get(idx).copied().unwrap_or(0.0)
    }

    fn in_weight(&self, idx: NodeIndex) -> f64 {
        self.in_sums.get(idx).copied().unwrap_or(0.0)
    }
}
