//! Mathematical utilities for the shuffling recursion

/// Coefficient-and-order pairs representing formally infinitesimal weights
pub mod valuation;
