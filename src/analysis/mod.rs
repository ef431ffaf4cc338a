//! Statistical summaries of tiling configurations

/// Plaquette orientation counts over the full lattice
pub mod census;

pub use census::OrientationCensus;
