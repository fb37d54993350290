//! Materialization configuration

/// How the dense array is computed from the factors
///
/// Both strategies multiply the factors in factor order starting from one,
/// so their results are bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterializeStrategy {
    /// Multiply each expanded factor view straight into the accumulator,
    /// never allocating per-factor dense copies
    #[default]
    Fused,
    /// Align every factor to a dense array first, then fold them together
    Aligned,
}

/// Options for [`materialize_with`](crate::materialize_with)
///
/// # Examples
///
/// ```
/// use margfit_kernels::{MaterializeConfig, MaterializeStrategy};
///
/// let config = MaterializeConfig::new()
///     .with_strategy(MaterializeStrategy::Aligned)
///     .with_parallel(true);
/// assert_eq!(config.strategy, MaterializeStrategy::Aligned);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MaterializeConfig {
    /// Evaluation strategy
    pub strategy: MaterializeStrategy,
    /// Align factors on the parallel pool (`Aligned` strategy with the
    /// `parallel` feature only)
    pub parallel: bool,
}

impl MaterializeConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation strategy
    pub fn with_strategy(mut self, strategy: MaterializeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set parallel alignment
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
