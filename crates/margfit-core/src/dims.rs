//! Dimension ownership maps
//!
//! A [`DimIndices`] records, for every factor of a factored array, which
//! global dimensions its axes correspond to. Axis `j` of factor `i` is global
//! dimension `idx[i][j]`, so the order inside a set follows the factor's own
//! shape rather than the global order.
//!
//! A global dimension may be claimed by several factors. Those factors then
//! share the dimension and must agree on its extent, which is checked later by
//! [`ArrayFactors`](crate::ArrayFactors).
//!
//! # Examples
//!
//! ```
//! use margfit_core::DimIndices;
//!
//! // Factor 0 is a vector over dim 1, factor 1 a matrix over dims 0 and 2
//! let di = DimIndices::new(vec![vec![1], vec![0, 2]]).unwrap();
//! assert_eq!(di.ndims(), 3);
//! assert_eq!(di.len(), 2);
//! assert_eq!(&di[1], &[0, 2]);
//! ```

use crate::error::{FactorError, FactorResult};
use smallvec::SmallVec;
use std::ops::Index;

/// Ordered set of global dimensions owned by one factor.
///
/// Inline storage covers factors of up to 6 axes.
pub type DimSet = SmallVec<[usize; 6]>;

/// Immutable mapping from factor position to owned global dimensions
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<usize>>", into = "Vec<Vec<usize>>")
)]
pub struct DimIndices {
    idx: Vec<DimSet>,
    ndims: usize,
}

impl DimIndices {
    /// Build an ownership map, deriving the global dimensionality.
    ///
    /// The dimensionality is one more than the largest identifier referenced.
    /// Every dimension below it must be claimed by at least one factor.
    ///
    /// # Errors
    ///
    /// - [`FactorError::EmptyFactors`] if `idx` is empty
    /// - [`FactorError::DuplicateDimension`] if a set repeats an identifier
    /// - [`FactorError::UnassignedDimension`] if a dimension is never claimed
    pub fn new(idx: Vec<Vec<usize>>) -> FactorResult<Self> {
        let ndims = idx
            .iter()
            .flat_map(|set| set.iter())
            .max()
            .map_or(0, |&d| d + 1);
        Self::with_ndims(idx, ndims)
    }

    /// Build an ownership map over a declared number of global dimensions.
    ///
    /// # Errors
    ///
    /// As [`DimIndices::new`], plus [`FactorError::DimensionOutOfRange`] when
    /// an identifier is `>= ndims`.
    ///
    /// # Examples
    ///
    /// ```
    /// use margfit_core::{DimIndices, FactorError};
    ///
    /// let err = DimIndices::with_ndims(vec![vec![0], vec![1]], 3).unwrap_err();
    /// assert_eq!(err, FactorError::UnassignedDimension { dim: 2, ndims: 3 });
    /// ```
    pub fn with_ndims(idx: Vec<Vec<usize>>, ndims: usize) -> FactorResult<Self> {
        if idx.is_empty() {
            return Err(FactorError::EmptyFactors);
        }

        let mut claimed = vec![false; ndims];
        let mut sets = Vec::with_capacity(idx.len());

        for (factor, set) in idx.into_iter().enumerate() {
            let mut seen: DimSet = SmallVec::with_capacity(set.len());
            for &dim in &set {
                if dim >= ndims {
                    return Err(FactorError::DimensionOutOfRange { factor, dim, ndims });
                }
                if seen.contains(&dim) {
                    return Err(FactorError::DuplicateDimension { factor, dim });
                }
                seen.push(dim);
                claimed[dim] = true;
            }
            sets.push(seen);
        }

        if let Some(dim) = claimed.iter().position(|&c| !c) {
            return Err(FactorError::UnassignedDimension { dim, ndims });
        }

        Ok(Self { idx: sets, ndims })
    }

    /// Default ownership: factor `i` owns exactly global dimension `i`.
    ///
    /// This is the ordinary outer-product layout.
    ///
    /// # Errors
    ///
    /// [`FactorError::EmptyFactors`] if `n == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use margfit_core::DimIndices;
    ///
    /// let di = DimIndices::outer(3).unwrap();
    /// assert_eq!(di, DimIndices::new(vec![vec![0], vec![1], vec![2]]).unwrap());
    /// ```
    pub fn outer(n: usize) -> FactorResult<Self> {
        Self::with_ndims((0..n).map(|i| vec![i]).collect(), n)
    }

    /// Number of global dimensions
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Number of factors
    pub fn len(&self) -> usize {
        self.idx.len()
    }

    /// Always false for a validated map
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Owned dimensions of factor `i`, in the factor's axis order
    pub fn get(&self, i: usize) -> Option<&[usize]> {
        self.idx.get(i).map(|set| set.as_slice())
    }

    /// Iterate over the ownership sets in factor order
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.idx.iter().map(|set| set.as_slice())
    }

    /// Factors whose ownership set contains global dimension `dim`
    ///
    /// # Examples
    ///
    /// ```
    /// use margfit_core::DimIndices;
    ///
    /// let di = DimIndices::new(vec![vec![0, 1], vec![1, 2]]).unwrap();
    /// assert_eq!(di.owners(1), vec![0, 1]);
    /// assert_eq!(di.owners(2), vec![1]);
    /// ```
    pub fn owners(&self, dim: usize) -> Vec<usize> {
        self.idx
            .iter()
            .enumerate()
            .filter(|(_, set)| set.contains(&dim))
            .map(|(i, _)| i)
            .collect()
    }

    /// True when every global dimension has exactly one owner
    pub fn is_disjoint(&self) -> bool {
        let total: usize = self.idx.iter().map(|set| set.len()).sum();
        total == self.ndims
    }
}

impl Index<usize> for DimIndices {
    type Output = [usize];

    fn index(&self, i: usize) -> &[usize] {
        &self.idx[i]
    }
}

impl TryFrom<Vec<Vec<usize>>> for DimIndices {
    type Error = FactorError;

    fn try_from(idx: Vec<Vec<usize>>) -> FactorResult<Self> {
        Self::new(idx)
    }
}

impl From<DimIndices> for Vec<Vec<usize>> {
    fn from(di: DimIndices) -> Self {
        di.idx.into_iter().map(|set| set.into_vec()).collect()
    }
}
