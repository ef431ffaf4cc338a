//! Creation-probability extraction from the rescaled level stack
//!
//! Each generation step of the shuffling sampler needs, per aligned 2 x 2
//! block, the probability that a freshly created domino pair receives the
//! diagonal orientation. Those probabilities are ratios of valuation products
//! read off the rescaled levels, processed innermost level first so that
//! table k serves the growth step from order k to order k + 1.

use ndarray::Array2;

use crate::algorithm::recursion::SquareMoveStack;

/// Bernoulli probabilities for one generation step
///
/// Table k is (k + 1) x (k + 1); entry (i, j) is the probability that the
/// aligned block at that sub-position, if it becomes eligible for creation,
/// receives the diagonal orientation. Immutable once computed.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    cells: Array2<f64>,
}

impl ProbabilityTable {
    /// Side length of the table
    pub fn size(&self) -> usize {
        self.cells.dim().0
    }

    /// Probability at the given block position, if in range
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get([row, col]).copied()
    }
}

/// Extract one probability table per diamond order from the level stack
///
/// Pure function of the stack. Per aligned block the infinitesimal orders of
/// the two diagonal pair products decide first: the strictly dominant (lower
/// order) anti-diagonal pair forces probability 0, a dominant diagonal pair
/// forces 1, and equal orders fall through to the coefficient ratio. A zero
/// coefficient sum falls back to one half; that branch is unreachable for a
/// well-posed weight matrix and the test suite asserts it stays cold.
pub fn extract(stack: &SquareMoveStack) -> Vec<ProbabilityTable> {
    let order = stack.order();
    let mut tables = Vec::with_capacity(order);

    for k in 0..order {
        let Some(level) = stack.levels().get(order - k - 1) else {
            break;
        };
        let rows = level.size() / 2;

        let cells = Array2::from_shape_fn((rows, rows), |(i, j)| {
            let nw = level.get(2 * i, 2 * j);
            let se = level.get(2 * i + 1, 2 * j + 1);
            let sw = level.get(2 * i + 1, 2 * j);
            let ne = level.get(2 * i, 2 * j + 1);

            let diagonal_order = nw.order + se.order;
            let anti_order = sw.order + ne.order;

            if diagonal_order > anti_order {
                0.0
            } else if diagonal_order < anti_order {
                1.0
            } else {
                let diagonal = nw.coefficient * se.coefficient;
                let anti = sw.coefficient * ne.coefficient;
                let total = diagonal + anti;
                if total <= 0.0 { 0.5 } else { diagonal / total }
            }
        });

        tables.push(ProbabilityTable { cells });
    }

    tables
}
