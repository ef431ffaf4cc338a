//! Square-move rescaling of the weight matrix
//!
//! The recursion is the octahedron (Hirota) recurrence underlying
//! domino-shuffling: each application contracts an n x n valuation table to
//! an (n - 2) x (n - 2) one by combining every cell with its diagonal, right
//! and down neighbours. Iterating from the full 2N x 2N matrix down to a
//! 2 x 2 table yields one rescaled level per diamond order, from which the
//! creation probabilities of every generation step are read off.

use ndarray::Array2;

use crate::math::valuation::{DEGENERACY_EPSILON, ScaledWeight};
use crate::spatial::weights::WeightMatrix;

/// One rescaled valuation table in the level stack
#[derive(Debug, Clone)]
pub struct RescaledLevel {
    cells: Array2<ScaledWeight>,
}

impl RescaledLevel {
    /// Side length of the table
    pub fn size(&self) -> usize {
        self.cells.dim().0
    }

    /// Valuation at the given cell
    ///
    /// Out-of-range reads return the neutral weight; the recursion and the
    /// probability extraction only index within range.
    pub fn get(&self, row: usize, col: usize) -> ScaledWeight {
        self.cells
            .get([row, col])
            .copied()
            .unwrap_or_else(|| ScaledWeight::new(1.0, 0))
    }
}

/// Result of the full rescaling recursion
///
/// Levels are ordered outermost (size 2N) to innermost (size 2). The stack is
/// owned by the call that produced it and is consumed read-only by the
/// probability extraction.
#[derive(Debug, Clone)]
pub struct SquareMoveStack {
    levels: Vec<RescaledLevel>,
    degenerate_denominators: usize,
}

impl SquareMoveStack {
    /// Rescaled levels, outermost first
    pub fn levels(&self) -> &[RescaledLevel] {
        &self.levels
    }

    /// Diamond order N (the number of levels)
    pub fn order(&self) -> usize {
        self.levels.len()
    }

    /// How many denominator coefficients were clamped away from zero
    ///
    /// A nonzero count signals that the weight matrix sits near a singular
    /// configuration and the extracted probabilities carry the clamping
    /// precision limit; it is a diagnostic, not a failure.
    pub const fn degenerate_denominators(&self) -> usize {
        self.degenerate_denominators
    }
}

/// Run the square-move recursion over a weight matrix
///
/// Deterministic, pure function of the input. Exact-zero entries enter as
/// first-order infinitesimals; denominator coefficients that round to zero
/// are clamped to [`DEGENERACY_EPSILON`] and counted on the returned stack.
pub fn rescale(weights: &WeightMatrix) -> SquareMoveStack {
    let dimension = weights.dimension();
    let order = weights.order();

    let base = Array2::from_shape_fn((dimension, dimension), |(row, col)| {
        ScaledWeight::from_weight(weights.get(row, col))
    });

    let mut levels = Vec::with_capacity(order);
    levels.push(RescaledLevel { cells: base });
    let mut degenerate_denominators = 0;

    for step in 0..order.saturating_sub(1) {
        let size = dimension - 2 * step - 2;
        let Some(previous) = levels.last() else {
            break;
        };

        let mut next = Array2::from_elem((size, size), ScaledWeight::new(1.0, 0));
        for row in 0..size {
            for col in 0..size {
                // Parity-dependent index shift into the previous level
                let shifted_row = row + 2 * (row % 2);
                let shifted_col = col + 2 * (col % 2);

                let current = previous.get(shifted_row, shifted_col);
                let diagonal = previous.get(row + 1, col + 1);
                let right = previous.get(shifted_row, col + 1);
                let down = previous.get(row + 1, shifted_col);

                let mut denominator = current.product(diagonal).combine(right.product(down));
                if denominator.coefficient.abs() < DEGENERACY_EPSILON {
                    denominator.coefficient = DEGENERACY_EPSILON;
                    degenerate_denominators += 1;
                }

                if let Some(cell) = next.get_mut([row, col]) {
                    *cell = ScaledWeight::new(
                        current.coefficient / denominator.coefficient,
                        current.order - denominator.order,
                    );
                }
            }
        }

        levels.push(RescaledLevel { cells: next });
    }

    SquareMoveStack {
        levels,
        degenerate_denominators,
    }
}

#[cfg(test)]
mod tests {
    use super::rescale;
    use crate::math::valuation::ScaledWeight;
    use crate::spatial::weights::WeightMatrix;
    use ndarray::Array2;

    fn uniform_weights(order: usize) -> WeightMatrix {
        match WeightMatrix::uniform(order) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        }
    }

    #[test]
    fn uniform_order_two_halves_every_inner_cell() {
        let stack = rescale(&uniform_weights(2));
        assert_eq!(stack.order(), 2);
        assert_eq!(stack.degenerate_denominators(), 0);

        let levels = stack.levels();
        assert_eq!(levels.first().map(super::RescaledLevel::size), Some(4));
        assert_eq!(levels.get(1).map(super::RescaledLevel::size), Some(2));

        // Every 2x2 neighbourhood of ones has denominator 1*1 + 1*1 = 2
        if let Some(inner) = levels.get(1) {
            for row in 0..2 {
                for col in 0..2 {
                    assert_eq!(inner.get(row, col), ScaledWeight::new(0.5, 0));
                }
            }
        }
    }

    #[test]
    fn checkerboard_zeros_dominate_by_order() {
        // Zeros on odd (row + col) parity: the surviving diagonal pair has
        // strictly lower infinitesimal order on the main diagonal everywhere
        let cells = Array2::from_shape_fn((4, 4), |(row, col)| {
            if (row + col) % 2 == 1 { 0.0 } else { 1.0 }
        });
        let weights = match WeightMatrix::from_array(cells) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        };

        let stack = rescale(&weights);
        assert_eq!(stack.degenerate_denominators(), 0);

        let Some(inner) = stack.levels().get(1) else {
            unreachable!("stack is missing its inner level");
        };
        assert_eq!(inner.get(0, 0), ScaledWeight::new(1.0, 0));
        assert_eq!(inner.get(0, 1), ScaledWeight::new(1.0, 1));
        assert_eq!(inner.get(1, 0), ScaledWeight::new(1.0, 1));
        assert_eq!(inner.get(1, 1), ScaledWeight::new(1.0, 0));
    }

    #[test]
    fn stack_sizes_descend_by_two() {
        let stack = rescale(&uniform_weights(4));
        let sizes: Vec<usize> = stack.levels().iter().map(super::RescaledLevel::size).collect();
        assert_eq!(sizes, vec![8, 6, 4, 2]);
    }
}
