//! Error types for sampler operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all sampler operations
#[derive(Debug)]
pub enum SamplerError {
    /// Diamond order outside the supported range
    InvalidOrder {
        /// Requested diamond order
        order: usize,
        /// Largest supported order
        maximum: usize,
    },

    /// Weight table entry failed validation
    InvalidWeight {
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
        /// Value that failed validation
        value: f64,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid shapes disagree between collaborating structures
    DimensionMismatch {
        /// Dimension the operation expected
        expected: usize,
        /// Dimension actually supplied
        actual: usize,
        /// Operation that detected the mismatch
        operation: &'static str,
    },

    /// An internal contract was broken
    InvariantViolated {
        /// Operation that detected the violation
        operation: &'static str,
        /// Description of the broken contract
        reason: String,
    },

    /// Failed to save a rendered tiling to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder { order, maximum } => {
                write!(f, "Diamond order {order} is outside the supported range 1..={maximum}")
            }
            Self::InvalidWeight { row, col, value } => {
                write!(
                    f,
                    "Weight at ({row}, {col}) is {value}; weights must be finite and non-negative"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DimensionMismatch {
                expected,
                actual,
                operation,
            } => {
                write!(
                    f,
                    "Dimension mismatch during {operation}: expected {expected}, got {actual}"
                )
            }
            Self::InvariantViolated { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(f, "Failed to export image to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SamplerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for sampler results
pub type Result<T> = std::result::Result<T, SamplerError>;

#[cfg(test)]
mod tests {
    use super::SamplerError;

    #[test]
    fn display_names_the_failing_input() {
        let error = SamplerError::InvalidOrder {
            order: 0,
            maximum: 512,
        };
        assert_eq!(
            error.to_string(),
            "Diamond order 0 is outside the supported range 1..=512"
        );

        let error = SamplerError::DimensionMismatch {
            expected: 8,
            actual: 6,
            operation: "refinement",
        };
        assert!(error.to_string().contains("expected 8, got 6"));
    }
}
