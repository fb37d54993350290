//! Example demonstrating factors over non-contiguous dimensions
//!
//! A vector owns dimension 1 and a matrix owns dimensions 0 and 2, so the
//! dense array is `X[i, j, k] = B[i, k] * A[j]`. The example then runs a short
//! proportional-fitting loop that rescales one factor at a time until the
//! dense array matches target margins.
//!
//! Run with: cargo run --example shared_dims

use margfit_core::ArrayFactors;
use margfit_kernels::{align_margins, Materialize, MaterializeConfig, MaterializeStrategy};
use scirs2_core::ndarray_ext::{array, ArrayD, Axis};

fn main() -> anyhow::Result<()> {
    println!("=== Shared Dimension Example ===\n");

    // Example 1: Size inference and alignment
    println!("1. Size Inference and Alignment");
    println!("-------------------------------");

    let a = array![1.0, 2.0, 3.0].into_dyn();
    let b = array![[1.0, 10.0], [100.0, 1000.0]].into_dyn();
    let af = ArrayFactors::<f64>::from_indices(vec![a, b], vec![vec![1], vec![0, 2]])?;

    println!("{}", af);
    println!("Inferred size: {:?}\n", af.size());

    for (i, aligned) in align_margins(&af)?.iter().enumerate() {
        println!("Aligned factor {} has shape {:?}", i, aligned.shape());
    }
    println!();

    // Example 2: Materialization strategies
    println!("2. Materialization Strategies");
    println!("-----------------------------");

    let fused = af.to_array()?;
    let aligned =
        af.to_array_with(&MaterializeConfig::new().with_strategy(MaterializeStrategy::Aligned))?;
    println!("Dense array:\n{}\n", fused);
    println!("Fused and aligned agree: {}\n", fused == aligned);

    // Example 3: Iterative proportional fitting on a 2-D table
    println!("3. Proportional Fitting");
    println!("-----------------------");

    let targets = [vec![0.2, 0.3, 0.5], vec![0.6, 0.4]];
    let mut table = ArrayFactors::<f64>::outer(vec![
        array![1.0, 1.0, 1.0].into_dyn(),
        array![1.0, 1.0].into_dyn(),
    ])?;

    for sweep in 0..3 {
        for (i, target) in targets.iter().enumerate() {
            let dense = table.to_array()?;
            let margin = dense.sum_axis(Axis(1 - i));
            let updated = ArrayD::from_shape_fn(table.factors()[i].raw_dim(), |ix| {
                table.factors()[i][[ix[0]]] * target[ix[0]] / margin[[ix[0]]]
            });
            table.replace_factor(i, updated)?;
        }
        let dense = table.to_array()?;
        println!(
            "Sweep {}: row sums {:?}, column sums {:?}",
            sweep,
            dense.sum_axis(Axis(1)).iter().copied().collect::<Vec<f64>>(),
            dense.sum_axis(Axis(0)).iter().copied().collect::<Vec<f64>>()
        );
    }

    println!("\nFitted table:\n{}", table.to_array()?);

    Ok(())
}
