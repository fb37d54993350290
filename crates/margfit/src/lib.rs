//! # margfit - factored multidimensional arrays
//!
//! A factored array represents a D-dimensional array by a few
//! lower-dimensional factor arrays whose broadcast product reconstructs it.
//! Each factor owns an arbitrary subset of the global dimensions, which makes
//! this a generalization of the outer product used by marginal factor models
//! and iterative proportional fitting.
//!
//! This is the **meta crate** that re-exports all margfit components.
//!
//! ## Quick Start
//!
//! ```
//! use margfit::prelude::*;
//! use scirs2_core::ndarray_ext::array;
//!
//! // Default ownership: factor i owns dimension i
//! let af = ArrayFactors::outer(vec![
//!     array![1.0, 2.0, 3.0].into_dyn(),
//!     array![4.0, 5.0].into_dyn(),
//! ])?;
//! assert_eq!(af.size(), &[3, 2]);
//!
//! let dense = af.to_array()?;
//! assert_eq!(dense, array![[4.0, 5.0], [8.0, 10.0], [12.0, 15.0]].into_dyn());
//! # Ok::<(), FactorError>(())
//! ```
//!
//! ## Components
//!
//! ### Core types ([`core`])
//!
//! Ownership maps, the factored array type, type promotion and errors.
//!
//! ```
//! use margfit::core::{AnyArray, DType, PromotedFactors};
//! use scirs2_core::ndarray_ext::array;
//!
//! let pf = PromotedFactors::outer(vec![
//!     AnyArray::from(array![1i64, 2].into_dyn()),
//!     AnyArray::from(array![0.5f64, 1.5].into_dyn()),
//! ])
//! .unwrap();
//! assert_eq!(pf.dtype(), DType::F64);
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! Broadcast alignment, materialization and element-wise products.
//!
//! ```
//! use margfit::core::ArrayFactors;
//! use margfit::kernels::align_margins;
//! use scirs2_core::ndarray_ext::array;
//!
//! let af = ArrayFactors::from_indices(
//!     vec![array![1.0, 2.0, 3.0].into_dyn(), array![[1.0, 2.0], [3.0, 4.0]].into_dyn()],
//!     vec![vec![1], vec![0, 2]],
//! )
//! .unwrap();
//! let aligned = align_margins(&af).unwrap();
//! assert_eq!(aligned[1].shape(), &[2, 3, 2]);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): parallel per-factor alignment
//! - `serde`: serialization of ownership maps and element types

#![deny(warnings)]

// Re-export all components
pub use margfit_core as core;
pub use margfit_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use margfit::prelude::*;
    //!
    //! let di = DimIndices::outer(3).unwrap();
    //! assert_eq!(di.ndims(), 3);
    //! ```

    // Core types
    pub use crate::core::{
        AnyArray, ArrayFactors, DType, DimIndices, Element, FactorError, FactorResult,
        PromotedFactors,
    };

    // Kernels
    pub use crate::kernels::{
        align_margins, materialize, materialize_with, Materialize, MaterializeConfig,
        MaterializeStrategy,
    };
}
