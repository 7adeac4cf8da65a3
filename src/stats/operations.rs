//! Implementations of the summary statistics used by the reducers.
//!
//! Ratio statistics (het, pi, Dxy) are computed as the ratio of summed
//! numerators to summed denominators across loci, not as a mean of per-locus
//! ratios, so loci are weighted by how many comparisons they contribute.

use num_traits::Float;
use std::iter::Sum;

/// Calculate the mean; `None` if there are no values.
pub fn mean<F: Float + Sum>(values: &[F]) -> Option<F> {
    if values.is_empty() {
        return None;
    }
    let sum: F = values.iter().copied().sum();
    Some(sum / F::from(values.len())?)
}

/// Calculate the sample standard deviation (with `n - 1` degrees of freedom).
///
/// A single value has a standard deviation of zero; no values have none.
pub fn sample_std<F: Float + Sum>(values: &[F]) -> Option<F> {
    let m = mean(values)?;
    if values.len() == 1 {
        return Some(F::zero());
    }
    let squares: F = values.iter().map(|&x| (x - m) * (x - m)).sum();
    let variance = squares / F::from(values.len() - 1)?;
    Some(variance.sqrt())
}

/// The mean and sample standard deviation, with `(0, 0)` for no values.
pub fn mean_std<F: Float + Sum>(values: &[F]) -> (F, F) {
    match (mean(values), sample_std(values)) {
        (Some(m), Some(s)) => (m, s),
        _ => (F::zero(), F::zero()),
    }
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn ratio_or_zero<F: Float>(numerator: F, denominator: F) -> F {
    if denominator == F::zero() {
        F::zero()
    } else {
        numerator / denominator
    }
}

/// A running sum of numerators and denominators.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SumRatio {
    pub numerator: f64,
    pub denominator: f64,
}

impl SumRatio {
    /// Add one locus. Missing values count as zero.
    pub fn add(&mut self, numerator: Option<f64>, denominator: Option<f64>) {
        self.numerator += numerator.unwrap_or(0.0);
        self.denominator += denominator.unwrap_or(0.0);
    }

    pub fn ratio(&self) -> f64 {
        ratio_or_zero(self.numerator, self.denominator)
    }
}
