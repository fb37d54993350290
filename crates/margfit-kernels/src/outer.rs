//! Direct N-way outer product
//!
//! `X[i₁, ..., iₙ] = v₁[i₁] · v₂[i₂] · ... · vₙ[iₙ]`
//!
//! This is a factored array with default ownership, evaluated coordinate by
//! coordinate without any broadcasting. Tests and benchmarks use it as an
//! independent reference for [`materialize`](crate::materialize).

use margfit_core::{Element, FactorError, FactorResult};
use scirs2_core::ndarray_ext::{ArrayD, ArrayView1, IxDyn};

/// Outer product of one or more vectors
///
/// Entries are multiplied left to right starting from one, the same order
/// materialization uses, so results agree exactly.
///
/// # Errors
///
/// [`FactorError::EmptyFactors`] if `vectors` is empty, and
/// [`FactorError::Overflow`] if an integer product does not fit `T`.
///
/// # Examples
///
/// ```
/// use margfit_kernels::outer_product;
/// use scirs2_core::ndarray_ext::array;
///
/// let rows = array![1.0, 2.0, 3.0];
/// let cols = array![4.0, 5.0];
///
/// let x = outer_product(&[rows.view(), cols.view()]).unwrap();
/// assert_eq!(x, array![[4.0, 5.0], [8.0, 10.0], [12.0, 15.0]].into_dyn());
/// ```
pub fn outer_product<T: Element>(vectors: &[ArrayView1<T>]) -> FactorResult<ArrayD<T>> {
    if vectors.is_empty() {
        return Err(FactorError::EmptyFactors);
    }

    let extents: Vec<usize> = vectors.iter().map(|v| v.len()).collect();
    let mut overflow = false;
    let x = ArrayD::from_shape_fn(IxDyn(&extents), |coord| {
        vectors
            .iter()
            .enumerate()
            .try_fold(T::one(), |acc, (axis, v)| acc.mul_checked(v[coord[axis]]))
            .unwrap_or_else(|| {
                overflow = true;
                T::zero()
            })
    });

    if overflow {
        return Err(FactorError::Overflow {
            operation: "outer_product".to_string(),
            dtype: T::DTYPE,
        });
    }
    Ok(x)
}
