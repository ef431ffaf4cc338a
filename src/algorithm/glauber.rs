//! Single-plaquette heat-bath refinement
//!
//! The refiner perturbs an existing tiling while preserving the Gibbs
//! measure of its weight matrix. Each step picks one 2 x 2 plaquette over
//! the full offset range of the lattice, and, when the plaquette holds
//! exactly one diagonal pair, resamples its orientation from the exact
//! conditional distribution given the rest of the configuration. The update
//! satisfies detailed balance, so refinement may be freely interleaved with
//! or substituted for exact shuffling output.

use rand::Rng;

use crate::io::error::{Result, SamplerError};
use crate::spatial::tiling::{Plaquette, Tiling};
use crate::spatial::weights::WeightMatrix;

/// Heat-bath refiner bound to one weight matrix
#[derive(Debug, Clone)]
pub struct GlauberRefiner<'a> {
    weights: &'a WeightMatrix,
}

impl<'a> GlauberRefiner<'a> {
    /// Bind a refiner to the weight matrix defining the target measure
    pub const fn new(weights: &'a WeightMatrix) -> Self {
        Self { weights }
    }

    /// Number of steps in one sweep (one average visit per plaquette)
    pub fn sweep_length(&self) -> u64 {
        let span = (self.weights.dimension() - 1) as u64;
        span * span
    }

    /// One heat-bath update on a uniformly random plaquette
    ///
    /// Returns whether the plaquette orientation changed. Plaquettes that do
    /// not hold exactly one diagonal pair are skipped with no effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the tiling and the weight matrix disagree on the
    /// lattice dimension.
    pub fn step<R: Rng + ?Sized>(&self, tiling: &mut Tiling, rng: &mut R) -> Result<bool> {
        self.check_dimension(tiling)?;

        let dimension = tiling.dimension();
        let row = rng.random_range(0..dimension - 1);
        let col = rng.random_range(0..dimension - 1);

        let current = tiling.plaquette(row, col);
        let currently_diagonal = match current {
            Plaquette::Diagonal => true,
            Plaquette::AntiDiagonal => false,
            Plaquette::Empty | Plaquette::Mixed => return Ok(false),
        };

        let choose_diagonal = rng.random::<f64>() < self.diagonal_probability(row, col);
        if choose_diagonal == currently_diagonal {
            return Ok(false);
        }

        tiling.set(row, col, choose_diagonal);
        tiling.set(row + 1, col + 1, choose_diagonal);
        tiling.set(row + 1, col, !choose_diagonal);
        tiling.set(row, col + 1, !choose_diagonal);
        Ok(true)
    }

    /// Run a fixed number of steps, returning how many flipped
    ///
    /// The loop is a tight sequential iteration with no early exit; pacing a
    /// long refinement is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the tiling and the weight matrix disagree on the
    /// lattice dimension.
    pub fn run<R: Rng + ?Sized>(
        &self,
        tiling: &mut Tiling,
        rng: &mut R,
        steps: u64,
    ) -> Result<u64> {
        self.check_dimension(tiling)?;

        let mut flipped = 0;
        for _ in 0..steps {
            if self.step(tiling, rng)? {
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    /// Run one sweep of steps
    ///
    /// # Errors
    ///
    /// Returns an error if the tiling and the weight matrix disagree on the
    /// lattice dimension.
    pub fn sweep<R: Rng + ?Sized>(&self, tiling: &mut Tiling, rng: &mut R) -> Result<u64> {
        self.run(tiling, rng, self.sweep_length())
    }

    /// Conditional probability of the diagonal orientation at this plaquette
    fn diagonal_probability(&self, row: usize, col: usize) -> f64 {
        let diagonal = self.weights.get(row, col) * self.weights.get(row + 1, col + 1);
        let anti = self.weights.get(row + 1, col) * self.weights.get(row, col + 1);
        let total = diagonal + anti;
        if total <= 0.0 {
            0.5
        } else {
            diagonal / total
        }
    }

    fn check_dimension(&self, tiling: &Tiling) -> Result<()> {
        if tiling.dimension() != self.weights.dimension() {
            return Err(SamplerError::DimensionMismatch {
                expected: self.weights.dimension(),
                actual: tiling.dimension(),
                operation: "heat-bath refinement",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GlauberRefiner;
    use crate::spatial::tiling::Tiling;
    use crate::spatial::weights::WeightMatrix;
    use ndarray::Array2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn uniform_weights(order: usize) -> WeightMatrix {
        match WeightMatrix::uniform(order) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        }
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let weights = uniform_weights(2);
        let refiner = GlauberRefiner::new(&weights);
        let mut tiling = Tiling::empty(2);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(refiner.step(&mut tiling, &mut rng).is_err());
    }

    #[test]
    fn non_flippable_plaquettes_are_never_touched() {
        let weights = uniform_weights(1);
        let refiner = GlauberRefiner::new(&weights);

        // A lone marker is not a diagonal pair, so nothing may change
        let mut tiling = Tiling::empty(2);
        tiling.set(0, 0, true);
        let reference = tiling.clone();

        let mut rng = StdRng::seed_from_u64(11);
        let flips = match refiner.run(&mut tiling, &mut rng, 500) {
            Ok(flips) => flips,
            Err(error) => unreachable!("refinement failed: {error}"),
        };
        assert_eq!(flips, 0);
        assert_eq!(tiling, reference);
    }

    #[test]
    fn extreme_weights_force_the_heavy_orientation() {
        // Diagonal corners carry all the weight, so the anti-diagonal
        // orientation cannot survive a single update
        let cells = Array2::from_shape_fn((2, 2), |(row, col)| {
            if row == col { 1000.0 } else { 0.001 }
        });
        let weights = match WeightMatrix::from_array(cells) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        };
        let refiner = GlauberRefiner::new(&weights);

        let mut tiling = Tiling::empty(2);
        tiling.set(0, 1, true);
        tiling.set(1, 0, true);

        let mut rng = StdRng::seed_from_u64(17);
        let flips = match refiner.run(&mut tiling, &mut rng, 200) {
            Ok(flips) => flips,
            Err(error) => unreachable!("refinement failed: {error}"),
        };

        assert_eq!(flips, 1);
        assert!(tiling.is_occupied(0, 0));
        assert!(tiling.is_occupied(1, 1));
        assert!(!tiling.is_occupied(0, 1));
        assert!(!tiling.is_occupied(1, 0));
    }

    #[test]
    fn uniform_weights_flip_about_half_the_time() {
        let weights = uniform_weights(1);
        let refiner = GlauberRefiner::new(&weights);

        let mut tiling = Tiling::empty(2);
        tiling.set(0, 0, true);
        tiling.set(1, 1, true);

        let mut rng = StdRng::seed_from_u64(23);
        let steps = 10_000;
        let flips = match refiner.run(&mut tiling, &mut rng, steps) {
            Ok(flips) => flips,
            Err(error) => unreachable!("refinement failed: {error}"),
        };

        // Each step resamples the single plaquette half-and-half
        let rate = flips as f64 / steps as f64;
        assert!((rate - 0.5).abs() < 0.05, "flip rate {rate} is far from 0.5");
    }

    #[test]
    fn occupation_follows_the_weight_ratio() {
        // w_diag = 3, w_anti = 1: the heat bath resamples the plaquette to
        // diagonal with probability 3/4 on every step
        let cells = Array2::from_shape_fn((2, 2), |(row, col)| {
            if row == 0 && col == 0 { 3.0 } else { 1.0 }
        });
        let weights = match WeightMatrix::from_array(cells) {
            Ok(weights) => weights,
            Err(error) => unreachable!("construction failed: {error}"),
        };
        let refiner = GlauberRefiner::new(&weights);

        let mut tiling = Tiling::empty(2);
        tiling.set(0, 0, true);
        tiling.set(1, 1, true);

        let mut rng = StdRng::seed_from_u64(41);
        let steps = 20_000;
        let mut diagonal_visits = 0;
        for _ in 0..steps {
            if refiner.step(&mut tiling, &mut rng).is_err() {
                unreachable!("refinement failed");
            }
            if tiling.is_occupied(0, 0) {
                diagonal_visits += 1;
            }
        }

        let share = f64::from(diagonal_visits) / f64::from(steps);
        assert!(
            (share - 0.75).abs() < 0.02,
            "diagonal occupation {share} is far from 0.75"
        );
    }

    #[test]
    fn refinement_preserves_marker_count() {
        let weights = uniform_weights(1);
        let refiner = GlauberRefiner::new(&weights);

        let mut tiling = Tiling::empty(2);
        tiling.set(0, 1, true);
        tiling.set(1, 0, true);

        let mut rng = StdRng::seed_from_u64(5);
        if refiner.run(&mut tiling, &mut rng, 1000).is_err() {
            unreachable!("refinement failed");
        }
        assert_eq!(tiling.marker_count(), 2);
    }
}
