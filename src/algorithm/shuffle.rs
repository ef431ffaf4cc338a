//! Delete/slide/create growth of a random tiling
//!
//! The shuffling generator grows a tiling of order k into order k + 1 in two
//! phases. The deterministic phase embeds the marker grid with a one-cell
//! border, annihilates colliding diagonal pairs and slides every surviving
//! lone marker to the opposite corner of its block. The random phase then
//! fills each isolated empty block with a fresh pair, drawing the diagonal
//! orientation against the creation probability extracted for that step.
//! Iterating from a single seeded block up to order N produces an exact
//! sample of the Gibbs measure defined by the weight matrix.

use rand::Rng;

use crate::algorithm::probability::ProbabilityTable;
use crate::io::error::{Result, SamplerError};
use crate::spatial::tiling::Tiling;

/// Probability used when a table lookup falls outside its valid range
///
/// With a correctly paired level/table stack the fallback is never drawn;
/// the generator counts its uses so tests can assert the pairing holds.
pub const UNIFORM_FALLBACK: f64 = 0.5;

/// Incremental shuffling generator
///
/// Holds the tiling grown so far together with the probability tables for
/// the remaining steps. Each [`advance`](Self::advance) call grows the
/// diamond by one order, which lets a driver report progress between steps;
/// [`generate`] wraps the full loop.
#[derive(Debug)]
pub struct ShuffleGenerator<'a> {
    tables: &'a [ProbabilityTable],
    tiling: Tiling,
    grown: usize,
    fallback_draws: usize,
}

impl<'a> ShuffleGenerator<'a> {
    /// Seed an order-1 tiling from the first probability table
    ///
    /// # Errors
    ///
    /// Returns an error if the table stack is empty.
    pub fn new<R: Rng + ?Sized>(tables: &'a [ProbabilityTable], rng: &mut R) -> Result<Self> {
        let Some(seed_table) = tables.first() else {
            return Err(SamplerError::InvariantViolated {
                operation: "shuffle seeding",
                reason: "probability table stack is empty".to_string(),
            });
        };

        let mut fallback_draws = 0;
        let seed_probability = seed_table.get(0, 0);
        if seed_probability.is_none() {
            fallback_draws += 1;
        }
        let threshold = seed_probability.unwrap_or(UNIFORM_FALLBACK);

        let mut tiling = Tiling::empty(2);
        if rng.random::<f64>() < threshold {
            tiling.set(0, 0, true);
            tiling.set(1, 1, true);
        } else {
            tiling.set(0, 1, true);
            tiling.set(1, 0, true);
        }

        Ok(Self {
            tables,
            tiling,
            grown: 1,
            fallback_draws,
        })
    }

    /// Final diamond order this generator grows towards
    pub const fn target_order(&self) -> usize {
        self.tables.len()
    }

    /// Diamond order of the tiling grown so far
    pub const fn current_order(&self) -> usize {
        self.grown
    }

    /// How many creation draws used the uniform fallback
    pub const fn fallback_draws(&self) -> usize {
        self.fallback_draws
    }

    /// Borrow the tiling in its current state
    pub const fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    /// Grow the tiling by one order; returns false once the target is reached
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.grown >= self.tables.len() {
            return false;
        }

        self.tiling = delete_slide(&self.tiling);
        let tables = self.tables;
        self.create(tables.get(self.grown), rng);
        self.grown += 1;
        true
    }

    /// Take the finished (or partially grown) tiling
    pub fn into_tiling(self) -> Tiling {
        self.tiling
    }

    /// Fill every isolated empty block with a freshly oriented pair
    fn create<R: Rng + ?Sized>(&mut self, table: Option<&ProbabilityTable>, rng: &mut R) {
        let dimension = self.tiling.dimension();
        let half = dimension / 2;

        for block_row in 0..half {
            for block_col in 0..half {
                let row = 2 * block_row;
                let col = 2 * block_col;

                if self.tiling.is_occupied(row, col)
                    || self.tiling.is_occupied(row, col + 1)
                    || self.tiling.is_occupied(row + 1, col)
                    || self.tiling.is_occupied(row + 1, col + 1)
                {
                    continue;
                }
                if !self.block_is_isolated(block_row, block_col, half) {
                    continue;
                }

                let probability = table.and_then(|t| t.get(block_row, block_col));
                if probability.is_none() {
                    self.fallback_draws += 1;
                }
                let threshold = probability.unwrap_or(UNIFORM_FALLBACK);

                if rng.random::<f64>() < threshold {
                    self.tiling.set(row, col, true);
                    self.tiling.set(row + 1, col + 1, true);
                } else {
                    self.tiling.set(row + 1, col, true);
                    self.tiling.set(row, col + 1, true);
                }
            }
        }
    }

    /// Whether the cardinal half-blocks bordering this block are all empty
    fn block_is_isolated(&self, block_row: usize, block_col: usize, half: usize) -> bool {
        let row = 2 * block_row;
        let col = 2 * block_col;

        let west = block_col == 0
            || (!self.tiling.is_occupied(row, col - 1)
                && !self.tiling.is_occupied(row + 1, col - 1));
        let east = block_col + 1 >= half
            || (!self.tiling.is_occupied(row, col + 2)
                && !self.tiling.is_occupied(row + 1, col + 2));
        let north = block_row == 0
            || (!self.tiling.is_occupied(row - 1, col)
                && !self.tiling.is_occupied(row - 1, col + 1));
        let south = block_row + 1 >= half
            || (!self.tiling.is_occupied(row + 2, col)
                && !self.tiling.is_occupied(row + 2, col + 1));

        west && east && north && south
    }
}

/// One-shot growth of a complete tiling from a table stack
///
/// Consumes one independent uniform draw per random decision, so a fixed
/// draw sequence reproduces a fixed tiling.
///
/// # Errors
///
/// Returns an error if the table stack is empty.
pub fn generate<R: Rng + ?Sized>(tables: &[ProbabilityTable], rng: &mut R) -> Result<Tiling> {
    let mut generator = ShuffleGenerator::new(tables, rng)?;
    while generator.advance(rng) {}
    Ok(generator.into_tiling())
}

/// Deterministic deletion and sliding phase of one growth step
///
/// Embeds the grid centred in a two-cell-larger one, annihilates both
/// markers of any fully occupied diagonal pair, then moves every remaining
/// lone marker to the opposite corner of its realigned block. Marker count
/// changes only through annihilation; no randomness is consumed.
pub fn delete_slide(tiling: &Tiling) -> Tiling {
    let old_dimension = tiling.dimension();
    let new_dimension = old_dimension + 2;
    let mut grid = Tiling::empty(new_dimension);

    for row in 0..old_dimension {
        for col in 0..old_dimension {
            if tiling.is_occupied(row, col) {
                grid.set(row + 1, col + 1, true);
            }
        }
    }

    // Deletion: colliding pairs sit in the blocks of the embedded alignment
    let half = old_dimension / 2;
    for block_row in 0..half {
        for block_col in 0..half {
            let row = 2 * block_row;
            let col = 2 * block_col;
            if grid.is_occupied(row, col) && grid.is_occupied(row + 1, col + 1) {
                grid.set(row, col, false);
                grid.set(row + 1, col + 1, false);
            } else if grid.is_occupied(row, col + 1) && grid.is_occupied(row + 1, col) {
                grid.set(row, col + 1, false);
                grid.set(row + 1, col, false);
            }
        }
    }

    // Sliding: every lone marker jumps to the opposite corner of its block
    for block_row in 0..=half {
        for block_col in 0..=half {
            let row = 2 * block_row;
            let col = 2 * block_col;
            if grid.is_occupied(row + 1, col + 1) {
                grid.set(row, col, true);
                grid.set(row + 1, col + 1, false);
            } else if grid.is_occupied(row, col) {
                grid.set(row, col, false);
                grid.set(row + 1, col + 1, true);
            } else if grid.is_occupied(row + 1, col) {
                grid.set(row, col + 1, true);
                grid.set(row + 1, col, false);
            } else if grid.is_occupied(row, col + 1) {
                grid.set(row + 1, col, true);
                grid.set(row, col + 1, false);
            }
        }
    }

    grid
}
