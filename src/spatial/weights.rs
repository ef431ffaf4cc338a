//! Validated edge-weight matrices with standard construction policies
//!
//! The Gibbs measure on tilings is proportional to the product of weights
//! under the placed dominoes. The matrix is validated once at construction
//! and immutable afterwards; exact zeros are legal and encode boundary or
//! periodic structure.

use ndarray::Array2;
use rand::Rng;

use crate::io::configuration::MAX_DIAMOND_ORDER;
use crate::io::error::{Result, SamplerError};

/// Immutable 2N x 2N grid of non-negative reals for a diamond of order N
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    cells: Array2<f64>,
}

impl WeightMatrix {
    /// Validate and wrap a prebuilt weight table
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not square, its dimension is odd or
    /// zero, the implied diamond order exceeds [`MAX_DIAMOND_ORDER`], or any
    /// entry is negative or non-finite.
    pub fn from_array(cells: Array2<f64>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows == 0 || rows % 2 != 0 {
            return Err(SamplerError::InvalidParameter {
                parameter: "weights",
                value: format!("{rows}x{cols}"),
                reason: "weight table must be square with even nonzero dimension".to_string(),
            });
        }
        check_order(rows / 2)?;

        for ((row, col), &value) in cells.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(SamplerError::InvalidWeight { row, col, value });
            }
        }

        Ok(Self { cells })
    }

    /// Constant-weight matrix, the uniform measure on tilings
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is zero or above [`MAX_DIAMOND_ORDER`].
    pub fn uniform(order: usize) -> Result<Self> {
        check_order(order)?;
        Ok(Self {
            cells: Array2::ones((2 * order, 2 * order)),
        })
    }

    /// Two-by-two periodic weights alternating between `a` and `b`
    ///
    /// Cells whose row and column quarter-phases agree carry `b`, the rest
    /// carry `a`, reproducing the standard period-two staircase pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is out of range or either weight is
    /// negative or non-finite.
    pub fn two_periodic(order: usize, a: f64, b: f64) -> Result<Self> {
        check_order(order)?;
        check_weight_parameter("a", a)?;
        check_weight_parameter("b", b)?;

        let dimension = 2 * order;
        let cells = Array2::from_shape_fn((dimension, dimension), |(row, col)| {
            let row_phase = row % 4;
            let col_phase = col % 4;
            if (row_phase < 2 && col_phase < 2) || (row_phase >= 2 && col_phase >= 2) {
                b
            } else {
                a
            }
        });

        Ok(Self { cells })
    }

    /// Independent two-value Bernoulli weights
    ///
    /// Each cell independently carries `low` with probability `probability`
    /// and `high` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is out of range, either weight is negative
    /// or non-finite, or `probability` lies outside `[0, 1]`.
    pub fn bernoulli<R: Rng + ?Sized>(
        order: usize,
        low: f64,
        high: f64,
        probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_order(order)?;
        check_weight_parameter("low", low)?;
        check_weight_parameter("high", high)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(SamplerError::InvalidParameter {
                parameter: "probability",
                value: probability.to_string(),
                reason: "must lie in [0, 1]".to_string(),
            });
        }

        let dimension = 2 * order;
        let mut cells = Array2::zeros((dimension, dimension));
        for cell in &mut cells {
            *cell = if rng.random::<f64>() < probability {
                low
            } else {
                high
            };
        }

        Ok(Self { cells })
    }

    /// Side length of the matrix (2N for a diamond of order N)
    pub fn dimension(&self) -> usize {
        self.cells.dim().0
    }

    /// Diamond order N implied by the matrix dimension
    pub fn order(&self) -> usize {
        self.dimension() / 2
    }

    /// Weight at the given cell, zero outside the table
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells.get([row, col]).copied().unwrap_or(0.0)
    }

    /// Borrow the underlying table
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.cells
    }
}

fn check_order(order: usize) -> Result<()> {
    if order == 0 || order > MAX_DIAMOND_ORDER {
        return Err(SamplerError::InvalidOrder {
            order,
            maximum: MAX_DIAMOND_ORDER,
        });
    }
    Ok(())
}

fn check_weight_parameter(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SamplerError::InvalidParameter {
            parameter,
            value: value.to_string(),
            reason: "weights must be finite and non-negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::WeightMatrix;
    use crate::io::configuration::MAX_DIAMOND_ORDER;
    use crate::io::error::SamplerError;
    use ndarray::Array2;

    #[test]
    fn rejects_zero_and_oversized_orders() {
        assert!(matches!(
            WeightMatrix::uniform(0),
            Err(SamplerError::InvalidOrder { order: 0, .. })
        ));
        assert!(matches!(
            WeightMatrix::uniform(MAX_DIAMOND_ORDER + 1),
            Err(SamplerError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn rejects_negative_and_non_finite_entries() {
        let mut negative = Array2::ones((4, 4));
        if let Some(cell) = negative.get_mut([1, 2]) {
            *cell = -0.5;
        }
        assert!(matches!(
            WeightMatrix::from_array(negative),
            Err(SamplerError::InvalidWeight { row: 1, col: 2, .. })
        ));

        let mut non_finite = Array2::ones((4, 4));
        if let Some(cell) = non_finite.get_mut([0, 0]) {
            *cell = f64::NAN;
        }
        assert!(WeightMatrix::from_array(non_finite).is_err());
    }

    #[test]
    fn rejects_odd_or_rectangular_tables() {
        assert!(WeightMatrix::from_array(Array2::ones((3, 3))).is_err());
        assert!(WeightMatrix::from_array(Array2::ones((4, 6))).is_err());
    }

    #[test]
    fn accepts_exact_zero_entries() {
        let mut cells = Array2::ones((4, 4));
        if let Some(cell) = cells.get_mut([2, 2]) {
            *cell = 0.0;
        }
        let weights = WeightMatrix::from_array(cells);
        assert!(weights.is_ok());
    }

    #[test]
    fn two_periodic_pattern_matches_quarter_phases() {
        let weights = match WeightMatrix::two_periodic(2, 0.5, 1.5) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        };
        assert_eq!(weights.dimension(), 4);
        // Rows 0..2 and columns 0..2 share a phase and carry b
        assert!((weights.get(0, 0) - 1.5).abs() < f64::EPSILON);
        assert!((weights.get(1, 1) - 1.5).abs() < f64::EPSILON);
        assert!((weights.get(0, 2) - 0.5).abs() < f64::EPSILON);
        assert!((weights.get(2, 0) - 0.5).abs() < f64::EPSILON);
        assert!((weights.get(2, 2) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_lookup_reads_zero() {
        let weights = match WeightMatrix::uniform(1) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        };
        assert!((weights.get(5, 5) - 0.0).abs() < f64::EPSILON);
    }
}
