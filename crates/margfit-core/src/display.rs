//! Diagnostic rendering
//!
//! Human-readable dumps for logging and debugging. The format is not stable
//! and is not meant to be parsed.

use crate::dims::DimIndices;
use crate::factors::{ArrayFactors, PromotedFactors};
use crate::promote::Element;
use std::fmt;

impl fmt::Display for DimIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DimIndices(")?;
        for (i, set) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", set)?;
        }
        write!(f, ")")
    }
}

impl<T: Element> fmt::Display for ArrayFactors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ArrayFactors<{}> of size {:?} with {} factors",
            self.dtype(),
            self.size(),
            self.len()
        )?;
        for (i, (factor, owned)) in self.factors().iter().zip(self.dims().iter()).enumerate() {
            // Multi-line array output is indented under its header
            let body = format!("{}", factor).replace('\n', "\n    ");
            write!(f, "  factor {} over dims {:?}:\n    {}", i, owned, body)?;
            if i + 1 < self.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PromotedFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::with_promoted!(self, af => fmt::Display::fmt(af, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promote::AnyArray;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_dim_indices_display() {
        let di = DimIndices::new(vec![vec![1], vec![0, 2]]).unwrap();
        assert_eq!(format!("{}", di), "DimIndices([1], [0, 2])");
    }

    #[test]
    fn test_array_factors_display() {
        let af = ArrayFactors::outer(vec![
            array![1.0, 2.0, 3.0].into_dyn(),
            array![4.0, 5.0].into_dyn(),
        ])
        .unwrap();

        let text = format!("{}", af);
        assert!(text.starts_with("ArrayFactors<f64> of size [3, 2] with 2 factors"));
        assert!(text.contains("factor 0 over dims [0]"));
        assert!(text.contains("factor 1 over dims [1]"));
        assert!(text.contains("[4, 5]"));
    }

    #[test]
    fn test_promoted_display() {
        let pf = PromotedFactors::outer(vec![
            AnyArray::from(array![1i32, 2].into_dyn()),
            AnyArray::from(array![3i64].into_dyn()),
        ])
        .unwrap();

        let text = format!("{}", pf);
        assert!(text.starts_with("ArrayFactors<i64>"));
    }
}
