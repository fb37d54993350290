//! Property-based tests for ownership maps and size derivation

use crate::{ArrayFactors, DimIndices, FactorError};
use proptest::prelude::*;
use scirs2_core::ndarray_ext::{Array, ArrayD, IxDyn};

/// Extents for up to 5 global dimensions
fn extents_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..5, 1..=5)
}

/// Extents plus an assignment of every dimension to one of up to 3 factors
fn partition_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<Vec<usize>>)> {
    extents_strategy().prop_flat_map(|extents| {
        let ndims = extents.len();
        (
            Just(extents),
            prop::collection::vec(0usize..3, ndims),
            Just((0..ndims).collect::<Vec<usize>>()).prop_shuffle(),
        )
            .prop_map(|(extents, owner, order)| {
                let mut idx: Vec<Vec<usize>> = vec![Vec::new(); 3];
                for dim in order {
                    idx[owner[dim]].push(dim);
                }
                idx.retain(|set| !set.is_empty());
                (extents, idx)
            })
    })
}

fn factors_for(extents: &[usize], idx: &[Vec<usize>]) -> Vec<ArrayD<f64>> {
    idx.iter()
        .map(|set| {
            let shape: Vec<usize> = set.iter().map(|&d| extents[d]).collect();
            Array::from_elem(IxDyn(&shape), 1.0)
        })
        .collect()
}

proptest! {
    /// The derived size equals the extent every owner reports
    #[test]
    fn prop_size_matches_owner_extents((extents, idx) in partition_strategy()) {
        let factors = factors_for(&extents, &idx);
        let af = ArrayFactors::from_indices(factors, idx).unwrap();

        prop_assert_eq!(af.size(), extents.as_slice());
        for dim in 0..af.ndims() {
            for owner in af.dims().owners(dim) {
                let axis = af.dims()[owner].iter().position(|&d| d == dim).unwrap();
                prop_assert_eq!(af.factors()[owner].shape()[axis], af.size()[dim]);
            }
        }
    }

    /// A partition is always disjoint and covers every dimension once
    #[test]
    fn prop_partition_is_disjoint((extents, idx) in partition_strategy()) {
        let di = DimIndices::new(idx).unwrap();
        prop_assert_eq!(di.ndims(), extents.len());
        prop_assert!(di.is_disjoint());
        for dim in 0..di.ndims() {
            prop_assert_eq!(di.owners(dim).len(), 1);
        }
    }

    /// A second factor sharing a dimension with a different extent is rejected
    #[test]
    fn prop_shared_extent_mismatch_fails(
        (extents, idx) in partition_strategy(),
        dim_seed in 0usize..5,
        bump in 1usize..3,
    ) {
        let dim = dim_seed % extents.len();
        let mut factors = factors_for(&extents, &idx);
        let mut idx = idx;

        factors.push(Array::from_elem(IxDyn(&[extents[dim] + bump]), 1.0));
        idx.push(vec![dim]);

        let err = ArrayFactors::from_indices(factors, idx).unwrap_err();
        let is_size_mismatch = matches!(err, FactorError::SizeMismatch { dim: d, .. } if d == dim);
        prop_assert!(is_size_mismatch);
    }

    /// Default ownership matches the explicit singleton sets
    #[test]
    fn prop_default_ownership(extents in extents_strategy()) {
        let factors: Vec<ArrayD<f64>> = extents
            .iter()
            .map(|&n| Array::from_elem(IxDyn(&[n]), 2.0))
            .collect();
        let explicit: Vec<Vec<usize>> = (0..extents.len()).map(|i| vec![i]).collect();

        let a = ArrayFactors::outer(factors.clone()).unwrap();
        let b = ArrayFactors::from_indices(factors, explicit).unwrap();
        prop_assert_eq!(a, b);
    }
}
