//! Factored array representation
//!
//! An [`ArrayFactors`] stores a D-dimensional array as a list of factor
//! arrays. The full array's value at coordinate `c` is the product, over all
//! factors, of the factor entry found by reading `c` at the factor's owned
//! dimensions:
//!
//! `X[c] = ∏ᵢ Fᵢ[c[idx[i][0]], c[idx[i][1]], ...]`
//!
//! With one 1-D factor per dimension this is the classic outer product. Any
//! factor may own several, possibly non-contiguous, dimensions, and factors
//! may share a dimension as long as they agree on its extent.
//!
//! The dense array is never stored. Materialization lives in
//! `margfit-kernels` and recomputes from the factors on every call.

use crate::dims::DimIndices;
use crate::error::{FactorError, FactorResult};
use crate::promote::{promote_all, AnyArray, DType, Element};
use log::{debug, trace};
use scirs2_core::ndarray_ext::ArrayD;
use smallvec::SmallVec;

/// Extents of the full array, one entry per global dimension
pub type Shape = SmallVec<[usize; 6]>;

/// A multidimensional array stored as a product of lower-dimensional factors
///
/// # Examples
///
/// ```
/// use margfit_core::ArrayFactors;
/// use scirs2_core::ndarray_ext::array;
///
/// let af = ArrayFactors::outer(vec![
///     array![1.0, 2.0, 3.0].into_dyn(),
///     array![4.0, 5.0].into_dyn(),
/// ])
/// .unwrap();
///
/// assert_eq!(af.size(), &[3, 2]);
/// assert_eq!(af.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayFactors<T> {
    af: Vec<ArrayD<T>>,
    di: DimIndices,
    size: Shape,
}

impl<T: Element> ArrayFactors<T> {
    /// Create a factored array with an explicit ownership map.
    ///
    /// Every factor's shape is cross-checked against every dimension it
    /// claims, and the size of the full array is derived from the result.
    ///
    /// # Errors
    ///
    /// - [`FactorError::FactorCountMismatch`] if `af` and `di` differ in length
    /// - [`FactorError::RankMismatch`] if a factor's rank differs from its set
    /// - [`FactorError::ZeroExtent`] if a factor has an empty axis
    /// - [`FactorError::SizeMismatch`] if factors disagree on a shared extent
    ///
    /// # Examples
    ///
    /// ```
    /// use margfit_core::{ArrayFactors, DimIndices};
    /// use scirs2_core::ndarray_ext::array;
    ///
    /// let a = array![1.0, 2.0, 3.0].into_dyn();
    /// let b = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    /// let di = DimIndices::new(vec![vec![1], vec![0, 2]]).unwrap();
    ///
    /// let af = ArrayFactors::new(vec![a, b], di).unwrap();
    /// assert_eq!(af.size(), &[2, 3, 2]);
    /// ```
    pub fn new(af: Vec<ArrayD<T>>, di: DimIndices) -> FactorResult<Self> {
        let size = derive_size(&af, &di)?;
        debug!(
            "ArrayFactors<{}>: {} factors, size {:?}",
            T::DTYPE,
            af.len(),
            size.as_slice()
        );
        Ok(Self { af, di, size })
    }

    /// Create a factored array from a raw ownership sequence.
    ///
    /// Equivalent to wrapping `idx` with [`DimIndices::new`] first.
    pub fn from_indices(af: Vec<ArrayD<T>>, idx: Vec<Vec<usize>>) -> FactorResult<Self> {
        let di = DimIndices::new(idx)?;
        Self::new(af, di)
    }

    /// Create a factored array with default ownership.
    ///
    /// Factor `i` must be one-dimensional and owns global dimension `i`.
    ///
    /// # Errors
    ///
    /// [`FactorError::EmptyFactors`] for no factors, and
    /// [`FactorError::RankMismatch`] if some factor is not one-dimensional.
    pub fn outer(af: Vec<ArrayD<T>>) -> FactorResult<Self> {
        let di = DimIndices::outer(af.len())?;
        Self::new(af, di)
    }

    /// Element type tag
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Extent of the full array along each global dimension
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Number of global dimensions
    pub fn ndims(&self) -> usize {
        self.size.len()
    }

    /// Number of factors
    pub fn len(&self) -> usize {
        self.af.len()
    }

    /// Always false: construction requires at least one factor
    pub fn is_empty(&self) -> bool {
        self.af.is_empty()
    }

    /// Number of elements in the full array
    pub fn dense_len(&self) -> usize {
        self.size.iter().product()
    }

    /// The factor arrays, in factor order
    pub fn factors(&self) -> &[ArrayD<T>] {
        &self.af
    }

    /// Factor `i`, if it exists
    pub fn factor(&self, i: usize) -> Option<&ArrayD<T>> {
        self.af.get(i)
    }

    /// The ownership map
    pub fn dims(&self) -> &DimIndices {
        &self.di
    }

    /// Replace factor `i` with an array of the same shape, returning the old one.
    ///
    /// This is how an external fitting loop updates the representation
    /// between iterations. Ownership and size are unchanged.
    ///
    /// # Errors
    ///
    /// - [`FactorError::FactorIndex`] if `i` is out of range
    /// - [`FactorError::ReplacementShape`] if the shapes differ
    ///
    /// # Examples
    ///
    /// ```
    /// use margfit_core::ArrayFactors;
    /// use scirs2_core::ndarray_ext::array;
    ///
    /// let mut af = ArrayFactors::outer(vec![
    ///     array![1.0, 2.0].into_dyn(),
    ///     array![3.0, 4.0, 5.0].into_dyn(),
    /// ])
    /// .unwrap();
    ///
    /// let old = af.replace_factor(0, array![0.5, 0.5].into_dyn()).unwrap();
    /// assert_eq!(old, array![1.0, 2.0].into_dyn());
    /// assert!(af.replace_factor(0, array![1.0].into_dyn()).is_err());
    /// ```
    pub fn replace_factor(&mut self, i: usize, factor: ArrayD<T>) -> FactorResult<ArrayD<T>> {
        let len = self.af.len();
        let slot = self
            .af
            .get_mut(i)
            .ok_or(FactorError::FactorIndex { index: i, len })?;

        if slot.shape() != factor.shape() {
            return Err(FactorError::ReplacementShape {
                factor: i,
                expected: slot.shape().to_vec(),
                found: factor.shape().to_vec(),
            });
        }

        debug!("Replacing factor {} with shape {:?}", i, factor.shape());
        Ok(std::mem::replace(slot, factor))
    }

    /// Decompose into factors, ownership map and size
    pub fn into_parts(self) -> (Vec<ArrayD<T>>, DimIndices, Shape) {
        (self.af, self.di, self.size)
    }
}

/// Cross-check factor shapes against their ownership sets and derive the size.
fn derive_size<T>(af: &[ArrayD<T>], di: &DimIndices) -> FactorResult<Shape> {
    if af.is_empty() {
        return Err(FactorError::EmptyFactors);
    }
    if af.len() != di.len() {
        return Err(FactorError::FactorCountMismatch {
            factors: af.len(),
            owners: di.len(),
        });
    }

    let ndims = di.ndims();
    // (extent, first factor that claimed it)
    let mut adopted: Vec<Option<(usize, usize)>> = vec![None; ndims];

    for (factor, (array, owned)) in af.iter().zip(di.iter()).enumerate() {
        if array.ndim() != owned.len() {
            return Err(FactorError::RankMismatch {
                factor,
                declared: owned.len(),
                actual: array.ndim(),
            });
        }

        for (&dim, &extent) in owned.iter().zip(array.shape()) {
            if extent == 0 {
                return Err(FactorError::ZeroExtent { factor, dim });
            }
            match adopted[dim] {
                None => {
                    trace!("dim {} adopts extent {} from factor {}", dim, extent, factor);
                    adopted[dim] = Some((extent, factor));
                }
                Some((expected, first_factor)) if expected != extent => {
                    return Err(FactorError::SizeMismatch {
                        dim,
                        expected,
                        found: extent,
                        first_factor,
                        factor,
                    });
                }
                Some(_) => {}
            }
        }
    }

    adopted
        .into_iter()
        .enumerate()
        .map(|(dim, slot)| {
            slot.map(|(extent, _)| extent)
                .ok_or(FactorError::UnassignedDimension { dim, ndims })
        })
        .collect()
}

/// An [`ArrayFactors`] whose element type was chosen by promotion at runtime
///
/// # Examples
///
/// ```
/// use margfit_core::{AnyArray, DType, PromotedFactors};
/// use scirs2_core::ndarray_ext::array;
///
/// let pf = PromotedFactors::outer(vec![
///     AnyArray::from(array![1i64, 2, 3].into_dyn()),
///     AnyArray::from(array![0.5f64, 0.25].into_dyn()),
/// ])
/// .unwrap();
///
/// assert_eq!(pf.dtype(), DType::F64);
/// assert_eq!(pf.size(), &[3, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PromotedFactors {
    I32(ArrayFactors<i32>),
    I64(ArrayFactors<i64>),
    U32(ArrayFactors<u32>),
    U64(ArrayFactors<u64>),
    F32(ArrayFactors<f32>),
    F64(ArrayFactors<f64>),
}

/// Apply an expression to the [`ArrayFactors`] inside any [`PromotedFactors`] variant
#[macro_export]
macro_rules! with_promoted {
    ($value:expr, $af:ident => $body:expr) => {
        match $value {
            $crate::PromotedFactors::I32($af) => $body,
            $crate::PromotedFactors::I64($af) => $body,
            $crate::PromotedFactors::U32($af) => $body,
            $crate::PromotedFactors::U64($af) => $body,
            $crate::PromotedFactors::F32($af) => $body,
            $crate::PromotedFactors::F64($af) => $body,
        }
    };
}

fn convert_all<T: Element>(af: &[AnyArray]) -> FactorResult<Vec<ArrayD<T>>> {
    af.iter()
        .enumerate()
        .map(|(i, factor)| factor.cast_factor::<T>(i))
        .collect()
}

impl PromotedFactors {
    /// Promote all factors to their common element type, then validate.
    ///
    /// # Errors
    ///
    /// [`FactorError::Promotion`] if the element types have no common type,
    /// plus every error of [`ArrayFactors::new`].
    pub fn new(af: Vec<AnyArray>, di: DimIndices) -> FactorResult<Self> {
        let dtype = promote_all(af.iter().map(AnyArray::dtype))?;
        debug!("Promoting {} factors to {}", af.len(), dtype);

        Ok(match dtype {
            DType::I32 => PromotedFactors::I32(ArrayFactors::new(convert_all(&af)?, di)?),
            DType::I64 => PromotedFactors::I64(ArrayFactors::new(convert_all(&af)?, di)?),
            DType::U32 => PromotedFactors::U32(ArrayFactors::new(convert_all(&af)?, di)?),
            DType::U64 => PromotedFactors::U64(ArrayFactors::new(convert_all(&af)?, di)?),
            DType::F32 => PromotedFactors::F32(ArrayFactors::new(convert_all(&af)?, di)?),
            DType::F64 => PromotedFactors::F64(ArrayFactors::new(convert_all(&af)?, di)?),
        })
    }

    /// Promote with a raw ownership sequence
    pub fn from_indices(af: Vec<AnyArray>, idx: Vec<Vec<usize>>) -> FactorResult<Self> {
        Self::new(af, DimIndices::new(idx)?)
    }

    /// Promote with default one-factor-per-dimension ownership
    pub fn outer(af: Vec<AnyArray>) -> FactorResult<Self> {
        let di = DimIndices::outer(af.len())?;
        Self::new(af, di)
    }

    /// Promoted element type
    pub fn dtype(&self) -> DType {
        with_promoted!(self, af => af.dtype())
    }

    /// Extent of the full array along each global dimension
    pub fn size(&self) -> &[usize] {
        with_promoted!(self, af => af.size())
    }

    /// Number of factors
    pub fn len(&self) -> usize {
        with_promoted!(self, af => af.len())
    }

    /// Always false: construction requires at least one factor
    pub fn is_empty(&self) -> bool {
        with_promoted!(self, af => af.is_empty())
    }

    /// The ownership map
    pub fn dims(&self) -> &DimIndices {
        with_promoted!(self, af => af.dims())
    }
}

macro_rules! impl_promoted_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayFactors<$ty>> for PromotedFactors {
                fn from(af: ArrayFactors<$ty>) -> Self {
                    PromotedFactors::$variant(af)
                }
            }
        )*
    };
}

impl_promoted_from!(
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);
