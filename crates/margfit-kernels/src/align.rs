//! Broadcast alignment of factors
//!
//! Alignment turns every factor into an array of the full dimensionality D:
//!
//! 1. The factor's axes are permuted into ascending global-dimension order
//! 2. A length-1 axis is inserted at every global dimension the factor does
//!    not own
//! 3. The result is broadcast (replicated) to the full size
//!
//! Steps 1 and 2 are zero-copy view operations ([`expand_factor`]). Step 3
//! produces a dense array ([`align_factor`]).
//!
//! Unlike first-N/last-N broadcasting rules, the owned dimensions of a factor
//! may sit anywhere in the global index space and in any order.
//!
//! # Examples
//!
//! ```
//! use margfit_core::ArrayFactors;
//! use margfit_kernels::align_margins;
//! use scirs2_core::ndarray_ext::array;
//!
//! let af = ArrayFactors::from_indices(
//!     vec![array![10.0, 20.0, 30.0].into_dyn(), array![[1.0, 2.0], [3.0, 4.0]].into_dyn()],
//!     vec![vec![1], vec![0, 2]],
//! )
//! .unwrap();
//!
//! let aligned = align_margins(&af).unwrap();
//! assert_eq!(aligned[0].shape(), &[2, 3, 2]);
//! assert_eq!(aligned[0][[1, 2, 0]], 30.0);
//! assert_eq!(aligned[1][[1, 2, 0]], 3.0);
//! ```

use margfit_core::{ArrayFactors, Element, FactorError, FactorResult};
use scirs2_core::ndarray_ext::{ArrayD, ArrayView, Axis, IxDyn};

/// Permute and pad a factor view so that axis `d` is global dimension `d`.
///
/// `owned` must list distinct dimensions below `ndims`, one per axis.
fn expand_view<'a, T>(
    view: ArrayView<'a, T, IxDyn>,
    owned: &[usize],
    ndims: usize,
) -> ArrayView<'a, T, IxDyn> {
    let mut order: Vec<usize> = (0..owned.len()).collect();
    order.sort_by_key(|&axis| owned[axis]);

    let mut expanded = view.permuted_axes(IxDyn(&order));
    // Inserting in ascending order keeps every earlier axis in place
    for dim in 0..ndims {
        if !owned.contains(&dim) {
            expanded = expanded.insert_axis(Axis(dim));
        }
    }
    expanded
}

/// View of factor `i` with rank D, owned axes in global position and
/// length-1 axes elsewhere.
///
/// # Errors
///
/// [`FactorError::FactorIndex`] if `i` is out of range.
///
/// # Examples
///
/// ```
/// use margfit_core::ArrayFactors;
/// use margfit_kernels::expand_factor;
/// use scirs2_core::ndarray_ext::array;
///
/// let af = ArrayFactors::from_indices(
///     vec![array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn(), array![1.0, 1.0].into_dyn()],
///     vec![vec![2, 0], vec![1]],
/// )
/// .unwrap();
///
/// let view = expand_factor(&af, 0).unwrap();
/// assert_eq!(view.shape(), &[3, 1, 2]);
/// assert_eq!(view[[2, 0, 1]], 6.0);
/// ```
pub fn expand_factor<T: Element>(
    af: &ArrayFactors<T>,
    i: usize,
) -> FactorResult<ArrayView<'_, T, IxDyn>> {
    let factor = af.factor(i).ok_or(FactorError::FactorIndex {
        index: i,
        len: af.len(),
    })?;
    Ok(expand_view(factor.view(), &af.dims()[i], af.ndims()))
}

/// Dense copy of factor `i` broadcast to the full size.
///
/// # Errors
///
/// [`FactorError::FactorIndex`] if `i` is out of range, and
/// [`FactorError::Broadcast`] if the expanded factor does not fit the size.
pub fn align_factor<T: Element>(af: &ArrayFactors<T>, i: usize) -> FactorResult<ArrayD<T>> {
    let expanded = expand_factor(af, i)?;
    let aligned = expanded
        .broadcast(IxDyn(af.size()))
        .ok_or_else(|| FactorError::Broadcast {
            factor: i,
            from: expanded.shape().to_vec(),
            to: af.size().to_vec(),
        })?
        .to_owned();
    Ok(aligned)
}

/// Align every factor to the full size, in factor order.
///
/// Each output has shape `af.size()` and carries only its own factor's
/// values; nothing is multiplied yet. The operation is pure and repeated
/// calls return equal results.
///
/// # Errors
///
/// [`FactorError::Broadcast`] if a factor does not fit the size, which a
/// validated [`ArrayFactors`] rules out.
pub fn align_margins<T: Element>(af: &ArrayFactors<T>) -> FactorResult<Vec<ArrayD<T>>> {
    (0..af.len()).map(|i| align_factor(af, i)).collect()
}

/// Align every factor on the parallel pool.
///
/// Output is identical to [`align_margins`].
#[cfg(feature = "parallel")]
pub fn align_margins_parallel<T: Element>(af: &ArrayFactors<T>) -> FactorResult<Vec<ArrayD<T>>> {
    use scirs2_core::parallel_ops::*;

    (0..af.len())
        .into_par_iter()
        .map(|i| align_factor(af, i))
        .collect()
}
