//! Core sampling algorithms
//!
//! The exact path runs [`recursion`] -> [`probability`] -> [`shuffle`]; the
//! approximate path is [`glauber`], which refines any existing tiling against
//! the same weight matrix.

/// Single-plaquette heat-bath refinement
pub mod glauber;
/// Creation-probability extraction from the rescaled level stack
pub mod probability;
/// Square-move weight rescaling
pub mod recursion;
/// Delete/slide/create growth of a random tiling
pub mod shuffle;

pub use glauber::GlauberRefiner;
pub use probability::{ProbabilityTable, extract};
pub use recursion::{RescaledLevel, SquareMoveStack, rescale};
pub use shuffle::{ShuffleGenerator, generate};
