//! Hadamard (element-wise) products over aligned factors
//!
//! For tensors A and B of the same shape, `A ⊙ B` has entries
//! `c_ijk... = a_ijk... * b_ijk...`. Materialization folds the aligned
//! factors into an accumulator with the in-place form.

use margfit_core::{Element, FactorError, FactorResult};
use scirs2_core::ndarray_ext::{ArrayD, ArrayView, IxDyn, Zip};

/// In-place Hadamard product `acc = acc ⊙ b` for N-dimensional arrays
///
/// # Errors
///
/// [`FactorError::IncompatibleShapes`] if the shapes differ, and
/// [`FactorError::Overflow`] if an integer product does not fit `T`. On
/// overflow the contents of `acc` are unspecified.
///
/// # Examples
///
/// ```
/// use margfit_kernels::hadamard_nd_inplace;
/// use scirs2_core::ndarray_ext::array;
///
/// let mut acc = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
/// let b = array![[2.0, 2.0], [0.5, 1.0]].into_dyn();
/// hadamard_nd_inplace(&mut acc, &b.view()).unwrap();
/// assert_eq!(acc, array![[2.0, 4.0], [1.5, 4.0]].into_dyn());
/// ```
pub fn hadamard_nd_inplace<T: Element>(
    acc: &mut ArrayD<T>,
    b: &ArrayView<T, IxDyn>,
) -> FactorResult<()> {
    if acc.shape() != b.shape() {
        return Err(FactorError::incompatible_shapes(
            "hadamard_nd_inplace",
            acc.shape(),
            b.shape(),
        ));
    }

    let mut overflow = false;
    Zip::from(acc).and(b).for_each(|x, &y| match x.mul_checked(y) {
        Some(v) => *x = v,
        None => overflow = true,
    });

    if overflow {
        return Err(FactorError::Overflow {
            operation: "hadamard_nd_inplace".to_string(),
            dtype: T::DTYPE,
        });
    }
    Ok(())
}

/// Multiply aligned arrays element-wise, in order, starting from ones.
///
/// `result[c] = 1 · aligned[0][c] · aligned[1][c] · ...`
///
/// # Errors
///
/// [`FactorError::IncompatibleShapes`] if some array does not have shape
/// `size`, and [`FactorError::Overflow`] if an integer product overflows.
pub fn product_of<T: Element>(aligned: &[ArrayD<T>], size: &[usize]) -> FactorResult<ArrayD<T>> {
    let mut acc = ArrayD::from_elem(IxDyn(size), T::one());
    for factor in aligned {
        hadamard_nd_inplace(&mut acc, &factor.view())?;
    }
    Ok(acc)
}
