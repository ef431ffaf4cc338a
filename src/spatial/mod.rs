//! Spatial data structures for weights and tilings
//!
//! This module contains the two grids the samplers operate on:
//! - Validated edge-weight matrices and their standard construction policies
//! - The binary domino marker grid with its rectangle derivation

/// Domino marker grid and rectangle derivation
pub mod tiling;
/// Validated weight matrices and construction policies
pub mod weights;

pub use tiling::Tiling;
pub use weights::WeightMatrix;
