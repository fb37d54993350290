//! # margfit-kernels
//!
//! Alignment and materialization kernels for factored arrays.
//!
//! A factored array ([`ArrayFactors`](margfit_core::ArrayFactors)) stores only
//! its factors. This crate expands those factors to the full dimensionality
//! and multiplies them into the dense array they represent.
//!
//! **Key Features:**
//! - **Generalized broadcasting** - Factors own arbitrary, non-contiguous
//!   dimension sets in any axis order ([`align_margins`], [`expand_factor`])
//! - **Materialization** - Dense array as the element-wise product of aligned
//!   factors ([`Materialize::to_array`], [`materialize_with`])
//! - **Fused evaluation** - Multiplies broadcast views directly into the
//!   accumulator without per-factor dense copies
//! - **Hadamard products** - In-place element-wise multiplication
//! - **Outer products** - Direct reference implementation for the classic case
//!
//! ## Quick Start
//!
//! ```rust
//! use margfit_core::ArrayFactors;
//! use margfit_kernels::{align_margins, Materialize};
//! use scirs2_core::ndarray_ext::array;
//!
//! // A vector over dim 1 and a matrix over dims 0 and 2
//! let af = ArrayFactors::from_indices(
//!     vec![array![1.0, 2.0, 3.0].into_dyn(), array![[1.0, 2.0], [3.0, 4.0]].into_dyn()],
//!     vec![vec![1], vec![0, 2]],
//! )
//! .unwrap();
//!
//! let aligned = align_margins(&af).unwrap();
//! assert!(aligned.iter().all(|a| a.shape() == &[2, 3, 2]));
//!
//! let dense = af.to_array().unwrap();
//! assert_eq!(dense[[1, 2, 1]], 4.0 * 3.0);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default) - Per-factor alignment on the scirs2 parallel pool
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations.
//! Direct use of `ndarray` or `rayon` is not permitted.

#![deny(warnings)]

pub mod align;
pub mod config;
pub mod materialize;
pub mod outer;
pub mod product;


// Re-exports
pub use align::*;
pub use config::{MaterializeConfig, MaterializeStrategy};
pub use materialize::{materialize, materialize_with, Materialize};
pub use outer::*;
pub use product::*;
