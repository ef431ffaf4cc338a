//! Exact and approximate sampling of random domino tilings of the Aztec diamond
//!
//! The exact path implements the domino-shuffling (square-move) algorithm:
//! a weight matrix is rescaled level by level through the square-move
//! recurrence, per-order creation probabilities are extracted, and a tiling
//! is grown one diamond order at a time by alternating deletion, sliding and
//! creation steps. The approximate path runs single-plaquette heat-bath
//! dynamics against the same weight matrix, so both samplers target the same
//! Gibbs measure and may be freely combined.

#![forbid(unsafe_code)]

/// Core sampling algorithms: square-move recursion, probability extraction,
/// shuffling generation and heat-bath refinement
pub mod algorithm;
/// Statistical summaries of tiling configurations
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Valuation arithmetic for weight tables containing exact zeros
pub mod math;
/// Weight matrices and the domino marker grid
pub mod spatial;

pub use io::error::{Result, SamplerError};
