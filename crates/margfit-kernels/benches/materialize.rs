//! Performance benchmarks for margfit-kernels
//!
//! Run with: cargo bench -p margfit-kernels
//!
//! Benchmarks cover:
//! - Factor alignment (serial & parallel)
//! - Materialization (fused & aligned strategies)
//! - Hadamard accumulation
//! - Direct outer product vs. factored outer product

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use margfit_core::ArrayFactors;
use margfit_kernels::*;
use scirs2_core::ndarray_ext::{Array, Array1, ArrayD, IxDyn};

/// Two matrix factors sharing no dimension plus a vector: dims {0,2}, {1,3}, {4}
fn shared_layout(size: usize) -> ArrayFactors<f64> {
    let a = Array::from_shape_fn(IxDyn(&[size, size]), |ix| (ix[0] + ix[1] + 1) as f64 * 0.01);
    let b = Array::from_shape_fn(IxDyn(&[size, size]), |ix| (ix[0] * ix[1] + 1) as f64 * 0.01);
    let c = Array::from_shape_fn(IxDyn(&[4]), |ix| (ix[0] + 1) as f64);
    ArrayFactors::from_indices(vec![a, b, c], vec![vec![0, 2], vec![3, 1], vec![4]])
        .expect("valid layout")
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_margins");

    for &size in [4, 8, 16, 24].iter() {
        let af = shared_layout(size);
        group.throughput(Throughput::Elements((af.dense_len() * af.len()) as u64));

        group.bench_with_input(BenchmarkId::new("serial", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(align_margins(&af).unwrap());
            });
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(align_margins_parallel(&af).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");

    for &size in [4, 8, 16, 24].iter() {
        let af = shared_layout(size);
        group.throughput(Throughput::Elements(af.dense_len() as u64));

        let fused = MaterializeConfig::new();
        group.bench_with_input(BenchmarkId::new("fused", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(materialize_with(&af, &fused).unwrap());
            });
        });

        let aligned = MaterializeConfig::new().with_strategy(MaterializeStrategy::Aligned);
        group.bench_with_input(BenchmarkId::new("aligned", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(materialize_with(&af, &aligned).unwrap());
            });
        });

        #[cfg(feature = "parallel")]
        {
            let parallel = aligned.clone().with_parallel(true);
            group.bench_with_input(
                BenchmarkId::new("aligned_parallel", size),
                &size,
                |bencher, _| {
                    bencher.iter(|| {
                        black_box(materialize_with(&af, &parallel).unwrap());
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_hadamard(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard_nd_inplace");

    for &size in [16, 64, 128].iter() {
        let b = ArrayD::<f64>::from_elem(IxDyn(&[size, size, 4]), 1.0001);
        group.throughput(Throughput::Elements(b.len() as u64));

        group.bench_with_input(BenchmarkId::new("in_place", size), &size, |bencher, _| {
            let mut acc = ArrayD::<f64>::from_elem(IxDyn(&[size, size, 4]), 1.0);
            bencher.iter(|| {
                hadamard_nd_inplace(&mut acc, &b.view()).unwrap();
                black_box(&acc);
            });
        });
    }
    group.finish();
}

fn bench_outer(c: &mut Criterion) {
    let mut group = c.benchmark_group("outer");

    for &size in [10, 20, 40].iter() {
        let vectors: Vec<Array1<f64>> = (0..3)
            .map(|k| Array1::from_shape_fn(size, |i| (i + k + 1) as f64))
            .collect();
        group.throughput(Throughput::Elements((size * size * size) as u64));

        let views: Vec<_> = vectors.iter().map(|v| v.view()).collect();
        group.bench_with_input(BenchmarkId::new("direct", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(outer_product(&views).unwrap());
            });
        });

        let af = ArrayFactors::outer(vectors.iter().map(|v| v.clone().into_dyn()).collect())
            .expect("valid factors");
        group.bench_with_input(BenchmarkId::new("factored", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(materialize(&af).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_align,
    bench_materialize,
    bench_hadamard,
    bench_outer
);
criterion_main!(benches);
