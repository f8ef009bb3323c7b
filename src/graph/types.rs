//! Core type definitions for the graph store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense node identifier.
///
/// Ids always occupy `0..num_nodes` with no gaps. Removing a node renumbers
/// the node that held the highest id into the freed slot; every other id is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

/// A weighted arc, produced by edge enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Edge { from, to, weight }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Whether logical edges carry a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directedness {
    Directed,
    Undirected,
}

impl Directedness {
    /// The second arc backing a logical edge, if this mode stores one.
    ///
    /// Undirected non-self edges are two arcs; self-loops are always one.
    pub fn mirror(self, from: NodeId, to: NodeId) -> Option<(NodeId, NodeId)> {
        match self {
            Directedness::Undirected if from != to => Some((to, from)),
            _ => None,
        }
    }

    /// Fold a raw arc count into a logical edge count
    pub fn fold_count(self, arcs: usize, self_arcs: usize) -> usize {
        match self {
            Directedness::Directed => arcs,
            Directedness::Undirected => (arcs + self_arcs) / 2,
        }
    }

    /// Fold a raw arc weight total into a logical edge weight total
    pub fn fold_weight(self, weight: f64, self_weight: f64) -> f64 {
        match self {
            Directedness::Directed => weight,
            Directedness::Undirected => (weight + self_weight) / 2.0,
        }
    }

    /// Multiplier turning an edge count into the density numerator
    pub fn density_factor(self) -> f64 {
        match self {
            Directedness::Directed => 1.0,
            Directedness::Undirected => 2.0,
        }
    }
}

/// Whether edges carry arbitrary weights or are all `1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weighting {
    Weighted,
    Unweighted,
}

impl Weighting {
    /// Weight to store for a newly inserted edge.
    ///
    /// `None` means the edge is absent: unweighted graphs treat an explicit
    /// zero weight as "no edge".
    pub fn on_insert(self, weight: f64) -> Option<f64> {
        match self {
            Weighting::Weighted => Some(weight),
            Weighting::Unweighted if weight != 0.0 => Some(1.0),
            Weighting::Unweighted => None,
        }
    }

    /// Weight to store when an existing edge is reweighted
    pub fn on_reweight(self, weight: f64) -> f64 {
        match self {
            Weighting::Weighted => weight,
            Weighting::Unweighted => 1.0,
        }
    }
}

/// The four graph modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    DirectedWeighted,
    DirectedUnweighted,
    UndirectedWeighted,
    #[default]
    UndirectedUnweighted,
}

impl GraphKind {
    pub fn new(directedness: Directedness, weighting: Weighting) -> Self {
        match (directedness, weighting) {
            (Directedness::Directed, Weighting::Weighted) => GraphKind::DirectedWeighted,
            (Directedness::Directed, Weighting::Unweighted) => GraphKind::DirectedUnweighted,
            (Directedness::Undirected, Weighting::Weighted) => GraphKind::UndirectedWeighted,
            (Directedness::Undirected, Weighting::Unweighted) => GraphKind::UndirectedUnweighted,
        }
    }

    pub fn from_flags(directed: bool, weighted: bool) -> Self {
        let directedness = if directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        };
        let weighting = if weighted {
            Weighting::Weighted
        } else {
            Weighting::Unweighted
        };
        Self::new(directedness, weighting)
    }

    pub fn directedness(self) -> Directedness {
        match self {
            GraphKind::DirectedWeighted | GraphKind::DirectedUnweighted => Directedness::Directed,
            GraphKind::UndirectedWeighted | GraphKind::UndirectedUnweighted => Directedness::Undirected,
        }
    }

    pub fn weighting(self) -> Weighting {
        match self {
            GraphKind::DirectedWeighted | GraphKind::UndirectedWeighted => Weighting::Weighted,
            GraphKind::DirectedUnweighted | GraphKind::UndirectedUnweighted => Weighting::Unweighted,
        }
    }

    pub fn is_directed(self) -> bool {
        self.directedness() == Directedness::Directed
    }

    pub fn is_weighted(self) -> bool {
        self.weighting() == Weighting::Weighted
    }

    pub fn with_directedness(self, directedness: Directedness) -> Self {
        Self::new(directedness, self.weighting())
    }

    pub fn with_weighting(self, weighting: Weighting) -> Self {
        Self::new(self.directedness(), weighting)
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphKind::DirectedWeighted => "directed weighted",
            GraphKind::DirectedUnweighted => "directed unweighted",
            GraphKind::UndirectedWeighted => "undirected weighted",
            GraphKind::UndirectedUnweighted => "undirected unweighted",
        };
        f.write_str(name)
    }
}
