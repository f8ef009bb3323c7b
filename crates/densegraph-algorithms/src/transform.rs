//! Edge-weight transforms
//!
//! A transform maps the raw weight of arc `i -> j` to the effective weight the
//! propagation engine multiplies by. This is how stochastic normalisation and
//! Laplacians are applied without materialising a transformed matrix.

use super::common::{GraphView, NodeIndex};
use serde::{Deserialize, Serialize};

/// Effective weight of arc `from -> to` given its raw weight.
///
/// Any `Fn(&G, usize, usize, f64) -> f64` closure is a transform.
pub trait WeightTransform<G: ?Sized> {
    fn apply(&self, view: &G, from: NodeIndex, to: NodeIndex, weight: f64) -> f64;
}

impl<G: ?Sized, F> WeightTransform<G> for F
where
    F: Fn(&G, NodeIndex, NodeIndex, f64) -> f64,
{
    #[inline]
    fn apply(&self, view: &G, from: NodeIndex, to: NodeIndex, weight: f64) -> f64 {
        self(view, from, to, weight)
    }
}

/// Built-in transform catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardTransform {
    /// `w`
    Identity,
    /// `w / out_weight(i)`
    RowStochastic,
    /// `w / out_weight(j)`
    ColumnStochastic,
    /// `w / max(out_weight(i), in_weight(j))`
    MaxRowColStochastic,
    /// `w / min(out_weight(i), in_weight(j))`
    MinRowCol,
    /// `out_degree(i) - w` on the diagonal, `-w` elsewhere
    Laplacian,
    /// `1 - w / out_degree(i)`
    NormalizedLaplacianRow,
    /// `1 - w / out_degree(j)`
    NormalizedLaplacianCol,
}

/// Zero denominators come from dangling nodes; they contribute nothing.
#[inline]
fn ratio(weight: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        weight / denominator
    }
}

impl<G: GraphView + ?Sized> WeightTransform<G> for StandardTransform {
    fn apply(&self, view: &G, i: NodeIndex, j: NodeIndex, w: f64) -> f64 {
        match self {
            StandardTransform::Identity => w,
            StandardTransform::RowStochastic => ratio(w, view.out_weight(i)),
            StandardTransform::ColumnStochastic => ratio(w, view.out_weight(j)),
            StandardTransform::MaxRowColStochastic => {
                ratio(w, view.out_weight(i).max(view.in_weight(j)))
            }
            StandardTransform::MinRowCol => ratio(w, view.out_weight(i).min(view.in_weight(j))),
            StandardTransform::Laplacian => {
                if i == j {
                    view.out_degree(i) as f64 - w
                } else {
                    -w
                }
            }
            StandardTransform::NormalizedLaplacianRow => 1.0 - ratio(w, view.out_degree(i) as f64),
            StandardTransform::NormalizedLaplacianCol => 1.0 - ratio(w, view.out_degree(j) as f64),
        }
    }
}
