//! # margfit-core
//!
//! Dimension ownership maps and the factored array type for margfit.
//!
//! A factored array stores a D-dimensional array as a set of lower-dimensional
//! factor arrays whose broadcast product reconstructs the full array. Each
//! factor owns an arbitrary, possibly non-contiguous, subset of the global
//! dimensions. This generalizes the outer product used by classic marginal
//! factor models, where each factor owns exactly one dimension.
//!
//! - **Ownership maps** ([`DimIndices`]) record which global dimensions each
//!   factor covers, validated once at construction
//! - **Factored arrays** ([`ArrayFactors`]) hold the factors and derive the
//!   size of the full array by cross-checking every factor's shape
//! - **Type promotion** ([`DType`], [`AnyArray`], [`PromotedFactors`]) brings
//!   factors of mixed element types to one common type up front
//!
//! Alignment and materialization of the dense array live in `margfit-kernels`.
//!
//! ## Quick Start
//!
//! ```
//! use margfit_core::{ArrayFactors, DimIndices};
//! use scirs2_core::ndarray_ext::array;
//!
//! // Default ownership: factor i owns dimension i
//! let af = ArrayFactors::outer(vec![
//!     array![1.0, 2.0, 3.0].into_dyn(),
//!     array![4.0, 5.0].into_dyn(),
//! ])
//! .unwrap();
//! assert_eq!(af.size(), &[3, 2]);
//!
//! // Explicit ownership: a matrix over dims 0 and 2, a vector over dim 1
//! let di = DimIndices::new(vec![vec![0, 2], vec![1]]).unwrap();
//! let af = ArrayFactors::new(
//!     vec![array![[1.0, 2.0], [3.0, 4.0]].into_dyn(), array![1.0, 1.0, 1.0].into_dyn()],
//!     di,
//! )
//! .unwrap();
//! assert_eq!(af.size(), &[2, 3, 2]);
//! ```
//!
//! ## Indexing
//!
//! Global dimensions and factor positions are zero-based.
//!
//! ## Error Handling
//!
//! Construction returns [`FactorResult`]; every check is eager, so a value of
//! any type in this crate is always valid.
//!
//! ## Features
//!
//! - `serde`: serialization for [`DType`] and [`DimIndices`] (validated on
//!   deserialization)
//!
//! ## SciRS2 Integration
//!
//! All array types come from `scirs2_core::ndarray_ext`. Direct use of
//! `ndarray` or `num-traits` is not permitted.

#![deny(warnings)]

pub mod dims;
pub mod display;
pub mod error;
pub mod factors;
pub mod promote;

#[cfg(test)]
mod property_tests;

pub use dims::{DimIndices, DimSet};
pub use error::{FactorError, FactorResult};
pub use factors::{ArrayFactors, PromotedFactors, Shape};
pub use promote::{promote_all, AnyArray, DType, Element};
