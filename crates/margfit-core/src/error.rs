//! Error types for factored array construction
//!
//! Every check in this crate runs eagerly when a [`DimIndices`](crate::DimIndices)
//! or [`ArrayFactors`](crate::ArrayFactors) is built, so a value that exists is
//! always valid. All variants describe configuration errors in the caller's
//! input; none of them are retryable.
//!
//! # Examples
//!
//! ```
//! use margfit_core::{DimIndices, FactorError};
//!
//! let err = DimIndices::new(vec![vec![0, 0]]).unwrap_err();
//! assert_eq!(err, FactorError::DuplicateDimension { factor: 0, dim: 0 });
//! ```

use crate::promote::DType;
use thiserror::Error;

/// Error type for dimension maps, factored arrays and their kernels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactorError {
    /// No factors (or no ownership sets) were supplied
    #[error("At least one factor is required")]
    EmptyFactors,

    /// Two factors claim the same global dimension with different extents
    #[error(
        "Size mismatch in dimension {dim}: factor {first_factor} has extent {expected}, \
         factor {factor} has extent {found}"
    )]
    SizeMismatch {
        dim: usize,
        expected: usize,
        found: usize,
        first_factor: usize,
        factor: usize,
    },

    /// A global dimension in `0..ndims` is claimed by no factor
    #[error("Dimension {dim} of {ndims} is not assigned to any factor")]
    UnassignedDimension { dim: usize, ndims: usize },

    /// A factor claims a dimension beyond the declared dimensionality
    #[error("Factor {factor} claims dimension {dim}, but only {ndims} dimensions are declared")]
    DimensionOutOfRange {
        factor: usize,
        dim: usize,
        ndims: usize,
    },

    /// A factor lists the same global dimension twice
    #[error("Factor {factor} claims dimension {dim} more than once")]
    DuplicateDimension { factor: usize, dim: usize },

    /// A factor's rank differs from the length of its ownership set
    #[error("Factor {factor} has {actual} axes but its ownership set lists {declared} dimensions")]
    RankMismatch {
        factor: usize,
        declared: usize,
        actual: usize,
    },

    /// The number of factors and ownership sets differ
    #[error("Got {factors} factors but {owners} ownership sets")]
    FactorCountMismatch { factors: usize, owners: usize },

    /// A factor has an empty axis
    #[error("Factor {factor} has zero extent along dimension {dim}")]
    ZeroExtent { factor: usize, dim: usize },

    /// Factor element types have no common numeric type
    #[error("Cannot promote {left} and {right} to a common numeric type")]
    Promotion { left: DType, right: DType },

    /// A value does not fit the promoted element type
    #[error("Factor {factor}: value of type {from} is not representable as {to}")]
    Cast { factor: usize, from: DType, to: DType },

    /// A factor position is out of range
    #[error("Factor index {index} out of range for {len} factors")]
    FactorIndex { index: usize, len: usize },

    /// A replacement factor does not have the shape of the factor it replaces
    #[error("Replacement for factor {factor} has shape {found:?}, expected {expected:?}")]
    ReplacementShape {
        factor: usize,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// An expanded factor cannot be broadcast to the full size
    ///
    /// Guard in the alignment kernels. Construction of an
    /// [`ArrayFactors`](crate::ArrayFactors) already rules this out, so it
    /// only signals an internal inconsistency, never bad caller input.
    #[error("Factor {factor} with expanded shape {from:?} cannot be broadcast to {to:?}")]
    Broadcast {
        factor: usize,
        from: Vec<usize>,
        to: Vec<usize>,
    },

    /// An integer product does not fit the element type
    #[error("{operation}: {dtype} overflow while multiplying factors")]
    Overflow { operation: String, dtype: DType },

    /// Element-wise operands differ in shape
    #[error("{operation}: incompatible shapes {shape_a:?} and {shape_b:?}")]
    IncompatibleShapes {
        operation: String,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
    },

    /// Array construction failed in the underlying array library
    #[error("Shape error: {0}")]
    Shape(String),
}

/// Result type for factored array operations
pub type FactorResult<T> = Result<T, FactorError>;

impl FactorError {
    /// Create an incompatible shapes error
    pub fn incompatible_shapes(
        operation: impl Into<String>,
        shape_a: &[usize],
        shape_b: &[usize],
    ) -> Self {
        FactorError::IncompatibleShapes {
            operation: operation.into(),
            shape_a: shape_a.to_vec(),
            shape_b: shape_b.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_display() {
        let err = FactorError::SizeMismatch {
            dim: 2,
            expected: 3,
            found: 4,
            first_factor: 0,
            factor: 1,
        };

        let msg = format!("{}", err);
        assert!(msg.contains("dimension 2"));
        assert!(msg.contains("extent 3"));
        assert!(msg.contains("extent 4"));
    }

    #[test]
    fn test_rank_mismatch_display() {
        let err = FactorError::RankMismatch {
            factor: 1,
            declared: 1,
            actual: 2,
        };

        let msg = format!("{}", err);
        assert!(msg.contains("Factor 1"));
        assert!(msg.contains("2 axes"));
    }

    #[test]
    fn test_promotion_display() {
        let err = FactorError::Promotion {
            left: DType::U64,
            right: DType::I32,
        };

        let msg = format!("{}", err);
        assert!(msg.contains("u64"));
        assert!(msg.contains("i32"));
    }

    #[test]
    fn test_incompatible_shapes_display() {
        let err = FactorError::incompatible_shapes("hadamard", &[2, 3], &[2, 4]);

        let msg = format!("{}", err);
        assert!(msg.contains("hadamard"));
        assert!(msg.contains("[2, 3]"));
        assert!(msg.contains("[2, 4]"));
    }

    #[test]
    fn test_overflow_display() {
        let err = FactorError::Overflow {
            operation: "hadamard_nd_inplace".to_string(),
            dtype: DType::I32,
        };

        let msg = format!("{}", err);
        assert!(msg.contains("hadamard_nd_inplace"));
        assert!(msg.contains("i32 overflow"));
    }

    #[test]
    fn test_broadcast_display() {
        let err = FactorError::Broadcast {
            factor: 1,
            from: vec![2, 1],
            to: vec![3, 4],
        };

        let msg = format!("{}", err);
        assert!(msg.contains("Factor 1"));
        assert!(msg.contains("[2, 1]"));
        assert!(msg.contains("[3, 4]"));
    }
}
