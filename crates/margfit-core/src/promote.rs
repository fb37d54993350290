//! Numeric element types and promotion
//!
//! Factors may arrive with different element types. They are converted once,
//! at construction, into a single promoted type so every later operation runs
//! on a uniformly typed `ArrayFactors<T>`.
//!
//! # Promotion rules
//!
//! | operands | result |
//! |----------|--------|
//! | same type | that type |
//! | float, float | `f64` |
//! | float, any integer | `f64` |
//! | signed, signed / unsigned, unsigned | the wider type |
//! | unsigned, strictly wider signed | the signed type |
//! | `u32`, `i32` | `i64` |
//! | `u64`, any signed | error |
//!
//! # Examples
//!
//! ```
//! use margfit_core::DType;
//!
//! assert_eq!(DType::I64.promote(DType::F64).unwrap(), DType::F64);
//! assert_eq!(DType::U32.promote(DType::I32).unwrap(), DType::I64);
//! assert!(DType::U64.promote(DType::I64).is_err());
//! ```

use crate::error::{FactorError, FactorResult};
use scirs2_core::ndarray_ext::{ArrayD, IxDyn};
use scirs2_core::numeric::{Num, NumCast};
use std::fmt;

/// Runtime tag for the supported element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DType {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Signed,
    Unsigned,
    Float,
}

impl DType {
    fn kind(self) -> Kind {
        match self {
            DType::I32 | DType::I64 => Kind::Signed,
            DType::U32 | DType::U64 => Kind::Unsigned,
            DType::F32 | DType::F64 => Kind::Float,
        }
    }

    /// Width in bits
    pub fn bits(self) -> u32 {
        match self {
            DType::I32 | DType::U32 | DType::F32 => 32,
            DType::I64 | DType::U64 | DType::F64 => 64,
        }
    }

    /// True for `f32` and `f64`
    pub fn is_float(self) -> bool {
        self.kind() == Kind::Float
    }

    fn widest(self, other: DType) -> DType {
        if other.bits() > self.bits() {
            other
        } else {
            self
        }
    }

    /// Smallest type both `self` and `other` convert into.
    ///
    /// An integer mixed with any float gives `f64`, even for `f32`: `f32`
    /// cannot represent every `i32`, let alone every 64-bit integer.
    ///
    /// # Errors
    ///
    /// [`FactorError::Promotion`] when no such type exists (`u64` mixed with a
    /// signed integer).
    pub fn promote(self, other: DType) -> FactorResult<DType> {
        if self == other {
            return Ok(self);
        }

        match (self.kind(), other.kind()) {
            (Kind::Float, _) | (_, Kind::Float) => Ok(DType::F64),
            (Kind::Signed, Kind::Signed) | (Kind::Unsigned, Kind::Unsigned) => {
                Ok(self.widest(other))
            }
            (Kind::Unsigned, Kind::Signed) => promote_mixed_sign(self, other),
            (Kind::Signed, Kind::Unsigned) => promote_mixed_sign(other, self),
        }
    }
}

fn promote_mixed_sign(unsigned: DType, signed: DType) -> FactorResult<DType> {
    if signed.bits() > unsigned.bits() {
        Ok(signed)
    } else if unsigned.bits() < 64 {
        Ok(DType::I64)
    } else {
        Err(FactorError::Promotion {
            left: unsigned,
            right: signed,
        })
    }
}

/// Promote a sequence of element types to their common type.
///
/// # Errors
///
/// [`FactorError::EmptyFactors`] for an empty sequence, or the first
/// promotion failure encountered.
pub fn promote_all<I>(dtypes: I) -> FactorResult<DType>
where
    I: IntoIterator<Item = DType>,
{
    let mut iter = dtypes.into_iter();
    let first = iter.next().ok_or(FactorError::EmptyFactors)?;
    iter.try_fold(first, |acc, dt| acc.promote(dt))
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F32 => "f32",
            DType::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// Numeric element type of a factor
pub trait Element:
    Copy + Num + NumCast + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Runtime tag of this type
    const DTYPE: DType;

    /// `self * rhs`, or `None` when the product is not representable.
    ///
    /// Integers check for overflow. Floats always succeed and follow IEEE
    /// rules (an overflowing product becomes infinite).
    fn mul_checked(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_element {
    (@from $ty:ty => $variant:ident) => {
        impl From<ArrayD<$ty>> for AnyArray {
            fn from(array: ArrayD<$ty>) -> Self {
                AnyArray::$variant(array)
            }
        }
    };
    (int: $($ty:ty => $variant:ident),* ; float: $($fty:ty => $fvariant:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$variant;

                #[inline]
                fn mul_checked(self, rhs: Self) -> Option<Self> {
                    self.checked_mul(rhs)
                }
            }

            impl_element!(@from $ty => $variant);
        )*
        $(
            impl Element for $fty {
                const DTYPE: DType = DType::$fvariant;

                #[inline]
                fn mul_checked(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }
            }

            impl_element!(@from $fty => $fvariant);
        )*
    };
}

impl_element!(
    int: i32 => I32, i64 => I64, u32 => U32, u64 => U64;
    float: f32 => F32, f64 => F64,
);

/// Dynamic-rank array whose element type is known only at runtime
#[derive(Clone, Debug, PartialEq)]
pub enum AnyArray {
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Apply an expression to the array inside any [`AnyArray`] variant
macro_rules! with_any_array {
    ($value:expr, $array:ident => $body:expr) => {
        match $value {
            AnyArray::I32($array) => $body,
            AnyArray::I64($array) => $body,
            AnyArray::U32($array) => $body,
            AnyArray::U64($array) => $body,
            AnyArray::F32($array) => $body,
            AnyArray::F64($array) => $body,
        }
    };
}

impl AnyArray {
    /// Element type of the wrapped array
    pub fn dtype(&self) -> DType {
        match self {
            AnyArray::I32(_) => DType::I32,
            AnyArray::I64(_) => DType::I64,
            AnyArray::U32(_) => DType::U32,
            AnyArray::U64(_) => DType::U64,
            AnyArray::F32(_) => DType::F32,
            AnyArray::F64(_) => DType::F64,
        }
    }

    /// Shape of the wrapped array
    pub fn shape(&self) -> &[usize] {
        with_any_array!(self, a => a.shape())
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        with_any_array!(self, a => a.ndim())
    }

    /// Convert every element to `T`.
    ///
    /// # Errors
    ///
    /// [`FactorError::Cast`] if some value is not representable in `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use margfit_core::AnyArray;
    /// use scirs2_core::ndarray_ext::{array, ArrayD};
    ///
    /// let ints: ArrayD<i64> = array![1, 2, 3].into_dyn();
    /// let any = AnyArray::from(ints);
    /// let floats = any.cast::<f64>().unwrap();
    /// assert_eq!(floats[[2]], 3.0);
    /// ```
    pub fn cast<T: Element>(&self) -> FactorResult<ArrayD<T>> {
        with_any_array!(self, a => cast_array(a, 0))
    }

    pub(crate) fn cast_factor<T: Element>(&self, factor: usize) -> FactorResult<ArrayD<T>> {
        with_any_array!(self, a => cast_array(a, factor))
    }
}

fn cast_array<S, T>(array: &ArrayD<S>, factor: usize) -> FactorResult<ArrayD<T>>
where
    S: Element,
    T: Element,
{
    let mut values = Vec::with_capacity(array.len());
    for &x in array.iter() {
        let y = <T as NumCast>::from(x).ok_or(FactorError::Cast {
            factor,
            from: S::DTYPE,
            to: T::DTYPE,
        })?;
        values.push(y);
    }
    ArrayD::from_shape_vec(IxDyn(array.shape()), values)
        .map_err(|e| FactorError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_promote_same() {
        for dt in [
            DType::I32,
            DType::I64,
            DType::U32,
            DType::U64,
            DType::F32,
            DType::F64,
        ] {
            assert_eq!(dt.promote(dt).unwrap(), dt);
        }
    }

    #[test]
    fn test_promote_int_float() {
        assert_eq!(DType::I64.promote(DType::F64).unwrap(), DType::F64);
        assert_eq!(DType::F32.promote(DType::I32).unwrap(), DType::F64);
        assert_eq!(DType::U64.promote(DType::F32).unwrap(), DType::F64);
        assert_eq!(DType::F32.promote(DType::F64).unwrap(), DType::F64);
    }

    #[test]
    fn test_promote_integers() {
        assert_eq!(DType::I32.promote(DType::I64).unwrap(), DType::I64);
        assert_eq!(DType::U32.promote(DType::U64).unwrap(), DType::U64);
        assert_eq!(DType::U32.promote(DType::I64).unwrap(), DType::I64);
        assert_eq!(DType::I32.promote(DType::U32).unwrap(), DType::I64);
    }

    #[test]
    fn test_promote_u64_signed_fails() {
        let err = DType::I32.promote(DType::U64).unwrap_err();
        assert_eq!(
            err,
            FactorError::Promotion {
                left: DType::U64,
                right: DType::I32
            }
        );
    }

    #[test]
    fn test_promote_is_symmetric() {
        let all = [
            DType::I32,
            DType::I64,
            DType::U32,
            DType::U64,
            DType::F32,
            DType::F64,
        ];
        for a in all {
            for b in all {
                assert_eq!(a.promote(b).ok(), b.promote(a).ok(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_promote_all() {
        let dt = promote_all([DType::I32, DType::U32, DType::F32]).unwrap();
        assert_eq!(dt, DType::F64);
        assert_eq!(promote_all([]), Err(FactorError::EmptyFactors));
    }

    #[test]
    fn test_any_array_cast() {
        let any = AnyArray::from(array![[1u32, 2], [3, 4]].into_dyn());
        assert_eq!(any.dtype(), DType::U32);
        assert_eq!(any.shape(), &[2, 2]);

        let out = any.cast::<i64>().unwrap();
        assert_eq!(out[[1, 0]], 3);
    }

    #[test]
    fn test_any_array_cast_out_of_range() {
        let any = AnyArray::from(array![-1i32, 2].into_dyn());
        let err = any.cast::<u32>().unwrap_err();
        assert!(matches!(err, FactorError::Cast { .. }));
    }

    #[test]
    fn test_cast_preserves_logical_order() {
        // Transposed input has a non-standard memory layout
        let a = array![[1i32, 2, 3], [4, 5, 6]].reversed_axes().into_dyn();
        let out = AnyArray::from(a.clone()).cast::<f64>().unwrap();
        assert_eq!(out.shape(), &[3, 2]);
        assert_eq!(out[[2, 1]], 6.0);
        assert_eq!(out[[0, 1]], 4.0);
    }

    #[test]
    fn test_mul_checked_integer_overflow() {
        assert_eq!(100_000i32.mul_checked(100_000), None);
        assert_eq!(100_000i64.mul_checked(100_000), Some(10_000_000_000));
        assert_eq!(u32::MAX.mul_checked(2), None);
        assert_eq!(3u64.mul_checked(4), Some(12));
    }

    #[test]
    fn test_mul_checked_float_never_fails() {
        assert_eq!(f32::MAX.mul_checked(2.0), Some(f32::INFINITY));
        assert_eq!(1.5f64.mul_checked(2.0), Some(3.0));
    }
}
