//! Matrix-free propagation
//!
//! Sparse matrix-vector products over a [`GraphView`] with a pluggable
//! [`WeightTransform`], and power-iteration random walks built on them.

use super::common::{GraphView, NodeIndex};
use super::transform::{StandardTransform, WeightTransform};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by the propagation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    #[error("vector length {actual} does not match node count {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type PropagationResult<T> = Result<T, PropagationError>;

/// Which side of the vector the adjacency operator sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplySide {
    /// `out[i] = Σ_{j ∈ out(i)} T(i, j, w_ij) * in[j]`
    Right,
    /// `out[i] = Σ_{j ∈ in(i)} T(j, i, w_ji) * in[j]`, i.e. the transpose
    Left,
}

/// Propagation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Fan per-node accumulation out over the rayon pool
    pub parallel: bool,
    /// Graphs smaller than this run sequentially even when `parallel` is set
    pub parallel_threshold: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 4096,
        }
    }
}

impl PropagationConfig {
    /// Always run on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    fn runs_parallel(&self, node_count: usize) -> bool {
        self.parallel && node_count >= self.parallel_threshold
    }
}

#[inline]
fn accumulate<G, T>(view: &G, transform: &T, side: MultiplySide, invec: &[f64], i: NodeIndex) -> f64
where
    G: GraphView + ?Sized,
    T: WeightTransform<G> + ?Sized,
{
    match side {
        MultiplySide::Right => view
            .out_arcs(i)
            .map(|(j, w)| invec[j] * transform.apply(view, i, j, w))
            .sum(),
        MultiplySide::Left => view
            .in_arcs(i)
            .map(|(j, w)| invec[j] * transform.apply(view, j, i, w))
            .sum(),
    }
}

/// One application of the transformed adjacency operator to `invec`.
///
/// Fails without computing anything if `invec.len()` differs from the node
/// count. Accumulation for each node only reads the view and `invec`, so
/// nodes are processed independently.
pub fn multiply_vector_transform<G, T>(
    view: &G,
    transform: &T,
    side: MultiplySide,
    invec: &[f64],
    config: &PropagationConfig,
) -> PropagationResult<Vec<f64>>
where
    G: GraphView + Sync + ?Sized,
    T: WeightTransform<G> + Sync + ?Sized,
{
    let n = view.node_count();
    if invec.len() != n {
        warn!(expected = n, actual = invec.len(), "propagation vector length mismatch");
        return Err(PropagationError::DimensionMismatch {
            expected: n,
            actual: invec.len(),
        });
    }

    let outvec: Vec<f64> = if config.runs_parallel(n) {
        (0..n)
            .into_par_iter()
            .map(|i| accumulate(view, transform, side, invec, i))
            .collect()
    } else {
        (0..n)
            .map(|i| accumulate(view, transform, side, invec, i))
            .collect()
    };

    Ok(outvec)
}

/// Power-iteration random walk.
///
/// Applies the walk operator `steps + 1` times: `steps = 0` is a single
/// application. `Right` propagates forward with the column-stochastic
/// transform, `Left` uses the row-stochastic transform on the transpose.
pub fn run_random_walks<G>(
    view: &G,
    invec: &[f64],
    steps: usize,
    side: MultiplySide,
    config: &PropagationConfig,
) -> PropagationResult<Vec<f64>>
where
    G: GraphView + Sync + ?Sized,
{
    let transform = match side {
        MultiplySide::Right => StandardTransform::ColumnStochastic,
        MultiplySide::Left => StandardTransform::RowStochastic,
    };

    debug!(steps, ?side, node_count = view.node_count(), "running random walk");

    let mut current = multiply_vector_transform(view, &transform, side, invec, config)?;
    for _ in 0..steps {
        current = multiply_vector_transform(view, &transform, side, &current, config)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CsrGraph;

    fn undirected_triangle_with_tail() -> CsrGraph {
        // 0-1, 1-2, 2-0, 2-3 as symmetric arcs
        CsrGraph::from_adjacency_list(vec![
            vec![(1, 1.0), (2, 1.0)],
            vec![(0, 1.0), (2, 1.0)],
            vec![(0, 1.0), (1, 1.0), (3, 1.0)],
            vec![(2, 1.0)],
        ])
    }

    #[test]
    fn test_identity_right_multiply() {
        // 0->1 (2.0), 1->0 (3.0), 1->1 (1.0)
        let g = CsrGraph::from_adjacency_list(vec![vec![(1, 2.0)], vec![(0, 3.0), (1, 1.0)]]);
        let config = PropagationConfig::sequential();
        let out =
            multiply_vector_transform(&g, &StandardTransform::Identity, MultiplySide::Right, &[1.0, 10.0], &config)
                .unwrap();
        assert_eq!(out, vec![20.0, 13.0]);

        let out =
            multiply_vector_transform(&g, &StandardTransform::Identity, MultiplySide::Left, &[1.0, 10.0], &config)
                .unwrap();
        // transpose: out[0] = w_10 * in[1], out[1] = w_01 * in[0] + w_11 * in[1]
        assert_eq!(out, vec![30.0, 12.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let g = undirected_triangle_with_tail();
        let result = multiply_vector_transform(
            &g,
            &StandardTransform::Identity,
            MultiplySide::Right,
            &[1.0, 2.0],
            &PropagationConfig::default(),
        );
        assert_eq!(
            result,
            Err(PropagationError::DimensionMismatch { expected: 4, actual: 2 })
        );
        assert!(run_random_walks(&g, &[], 3, MultiplySide::Right, &PropagationConfig::default()).is_err());
    }

    #[test]
    fn test_column_stochastic_preserves_mass() {
        let g = undirected_triangle_with_tail();
        let config = PropagationConfig::sequential();
        let p = vec![0.25; 4];
        let out = run_random_walks(&g, &p, 5, MultiplySide::Right, &config).unwrap();
        let mass: f64 = out.iter().sum();
        assert!((mass - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_steps_is_one_application() {
        let g = undirected_triangle_with_tail();
        let config = PropagationConfig::sequential();
        let p = vec![1.0, 0.0, 0.0, 0.0];
        let walked = run_random_walks(&g, &p, 0, MultiplySide::Right, &config).unwrap();
        let once =
            multiply_vector_transform(&g, &StandardTransform::ColumnStochastic, MultiplySide::Right, &p, &config)
                .unwrap();
        assert_eq!(walked, once);
        // all mass moves to the two neighbours of node 0
        assert_eq!(walked, vec![0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 64;
        let outgoing = (0..n)
            .map(|i| vec![((i + 1) % n, 1.0 + i as f64), ((i + 7) % n, 0.5)])
            .collect();
        let g = CsrGraph::from_adjacency_list(outgoing);
        let invec: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();

        let parallel = PropagationConfig {
            parallel: true,
            parallel_threshold: 1,
        };
        let a = multiply_vector_transform(&g, &StandardTransform::RowStochastic, MultiplySide::Left, &invec, &parallel)
            .unwrap();
        let b = multiply_vector_transform(
            &g,
            &StandardTransform::RowStochastic,
            MultiplySide::Left,
            &invec,
            &PropagationConfig::sequential(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_closure_transform_through_engine() {
        let g = undirected_triangle_with_tail();
        let degree_scaled = |view: &CsrGraph, i: usize, _j: usize, w: f64| w * view.out_degree(i) as f64;
        let out = multiply_vector_transform(
            &g,
            &degree_scaled,
            MultiplySide::Right,
            &[1.0; 4],
            &PropagationConfig::sequential(),
        )
        .unwrap();
        assert_eq!(out, vec![4.0, 4.0, 9.0, 1.0]);
    }
}
