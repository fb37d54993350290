//! Materialization of the dense array
//!
//! The dense array is the element-wise product of all aligned factors:
//!
//! `X[c] = ∏ᵢ aligned[i][c]`
//!
//! The accumulator starts at the multiplicative identity and factors are
//! multiplied in factor order, which fixes floating-point rounding. Nothing
//! is cached: every call recomputes from the current factors, so factors
//! replaced between calls are always picked up.

use crate::align::{align_margins, expand_factor};
use crate::config::{MaterializeConfig, MaterializeStrategy};
use crate::product::{hadamard_nd_inplace, product_of};
use log::debug;
use margfit_core::{
    with_promoted, AnyArray, ArrayFactors, Element, FactorError, FactorResult, PromotedFactors,
};
use scirs2_core::ndarray_ext::{ArrayD, IxDyn};

/// Conversion of a factored representation into its dense array
///
/// # Examples
///
/// ```
/// use margfit_core::ArrayFactors;
/// use margfit_kernels::Materialize;
/// use scirs2_core::ndarray_ext::array;
///
/// let af = ArrayFactors::outer(vec![
///     array![1.0, 2.0, 3.0].into_dyn(),
///     array![4.0, 5.0].into_dyn(),
/// ])
/// .unwrap();
///
/// let dense = af.to_array().unwrap();
/// assert_eq!(dense, array![[4.0, 5.0], [8.0, 10.0], [12.0, 15.0]].into_dyn());
/// ```
pub trait Materialize {
    /// Dense array type produced
    type Output;

    /// Compute the dense array with the default configuration
    fn to_array(&self) -> FactorResult<Self::Output> {
        self.to_array_with(&MaterializeConfig::default())
    }

    /// Compute the dense array with an explicit configuration
    fn to_array_with(&self, config: &MaterializeConfig) -> FactorResult<Self::Output>;
}

impl<T: Element> Materialize for ArrayFactors<T> {
    type Output = ArrayD<T>;

    fn to_array_with(&self, config: &MaterializeConfig) -> FactorResult<ArrayD<T>> {
        materialize_with(self, config)
    }
}

impl Materialize for PromotedFactors {
    type Output = AnyArray;

    fn to_array_with(&self, config: &MaterializeConfig) -> FactorResult<AnyArray> {
        with_promoted!(self, af => materialize_with(af, config).map(AnyArray::from))
    }
}

/// Dense array of a factored representation, default configuration
pub fn materialize<T: Element>(af: &ArrayFactors<T>) -> FactorResult<ArrayD<T>> {
    materialize_with(af, &MaterializeConfig::default())
}

/// Dense array of a factored representation
///
/// # Errors
///
/// [`FactorError::Overflow`] if an integer product does not fit `T`, and
/// [`FactorError::Broadcast`] if a factor does not fit the size, which a
/// validated [`ArrayFactors`] rules out.
///
/// # Examples
///
/// ```
/// use margfit_core::ArrayFactors;
/// use margfit_kernels::{materialize_with, MaterializeConfig, MaterializeStrategy};
/// use scirs2_core::ndarray_ext::array;
///
/// let af = ArrayFactors::from_indices(
///     vec![array![1.0, 2.0, 3.0].into_dyn(), array![[1.0, 2.0], [3.0, 4.0]].into_dyn()],
///     vec![vec![1], vec![0, 2]],
/// )
/// .unwrap();
///
/// let fused = materialize_with(&af, &MaterializeConfig::new()).unwrap();
/// let aligned = materialize_with(
///     &af,
///     &MaterializeConfig::new().with_strategy(MaterializeStrategy::Aligned),
/// )
/// .unwrap();
/// assert_eq!(fused, aligned);
/// assert_eq!(fused[[1, 2, 0]], 3.0 * 3.0);
/// ```
pub fn materialize_with<T: Element>(
    af: &ArrayFactors<T>,
    config: &MaterializeConfig,
) -> FactorResult<ArrayD<T>> {
    debug!(
        "Materializing {} factors to size {:?} ({:?})",
        af.len(),
        af.size(),
        config.strategy
    );

    match config.strategy {
        MaterializeStrategy::Fused => materialize_fused(af),
        MaterializeStrategy::Aligned => {
            let aligned = align_for(af, config.parallel)?;
            product_of(&aligned, af.size())
        }
    }
}

fn materialize_fused<T: Element>(af: &ArrayFactors<T>) -> FactorResult<ArrayD<T>> {
    let mut acc = ArrayD::from_elem(IxDyn(af.size()), T::one());
    for i in 0..af.len() {
        let expanded = expand_factor(af, i)?;
        let view = expanded
            .broadcast(IxDyn(af.size()))
            .ok_or_else(|| FactorError::Broadcast {
                factor: i,
                from: expanded.shape().to_vec(),
                to: af.size().to_vec(),
            })?;
        hadamard_nd_inplace(&mut acc, &view)?;
    }
    Ok(acc)
}

#[cfg(feature = "parallel")]
fn align_for<T: Element>(af: &ArrayFactors<T>, parallel: bool) -> FactorResult<Vec<ArrayD<T>>> {
    if parallel {
        crate::align::align_margins_parallel(af)
    } else {
        align_margins(af)
    }
}

#[cfg(not(feature = "parallel"))]
fn align_for<T: Element>(af: &ArrayFactors<T>, parallel: bool) -> FactorResult<Vec<ArrayD<T>>> {
    if parallel {
        debug!("parallel alignment requested without the `parallel` feature");
    }
    align_margins(af)
}
