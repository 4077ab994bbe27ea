//! Point estimates with one-standard-error intervals.

use std::fmt;

use pricer_core::math::statistics::{mean, sample_variance_about};
use pricer_core::types::{PricingError, PricingResult};

use crate::path_dependent::PayoffVector;

/// Band `[mean - SE, mean + SE]` where `SE = sqrt(sample_variance / n)`.
///
/// This is a one-standard-error band (about 68% coverage), not a 95%
/// interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Symmetric band of half-width `half_width` around `centre`.
    #[inline]
    pub fn around(centre: f64, half_width: f64) -> Self {
        Self {
            lower: centre - half_width,
            upper: centre + half_width,
        }
    }

    /// `upper - lower`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// `true` if `value` lies within the closed band.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Renders as `[lower, upper]`, two decimals unless a precision is given.
impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "[{:.*}, {:.*}]",
            precision, self.lower, precision, self.upper
        )
    }
}

/// Monte Carlo price estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::pricing::PriceEstimate;
///
/// let estimate = PriceEstimate::from_samples(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(estimate.mean, 2.5);
/// assert_eq!(estimate.n, 4);
/// assert!(estimate.interval.contains(2.5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceEstimate {
    /// Sample mean of the discounted payoffs.
    pub mean: f64,
    /// Sample variance with the `n - 1` denominator.
    pub sample_variance: f64,
    /// Number of samples.
    pub n: usize,
    /// One-standard-error band around `mean`.
    pub interval: ConfidenceInterval,
}

impl PriceEstimate {
    /// Estimates from one discounted payoff per trajectory.
    ///
    /// # Errors
    ///
    /// [`PricingError::InsufficientSamples`] for fewer than two samples.
    pub fn from_samples(samples: &[f64]) -> PricingResult<Self> {
        let n = samples.len();
        let mean = match mean(samples) {
            Some(mean) if n > 1 => mean,
            _ => return Err(PricingError::InsufficientSamples { got: n }),
        };
        let sample_variance = sample_variance_about(samples, mean)?;
        let standard_error = (sample_variance / n as f64).sqrt();
        Ok(Self {
            mean,
            sample_variance,
            n,
            interval: ConfidenceInterval::around(mean, standard_error),
        })
    }

    /// Estimates over the whole population of a payoff vector.
    ///
    /// Trajectories without an entry count as zero payoffs, so a barrier price
    /// is `Σ payoff / population`.
    pub fn from_payoffs(payoffs: &PayoffVector) -> PricingResult<Self> {
        Self::from_samples(&payoffs.to_population())
    }

    /// `sqrt(sample_variance / n)`.
    #[inline]
    pub fn standard_error(&self) -> f64 {
        (self.sample_variance / self.n as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_sample() {
        let estimate = PriceEstimate::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(estimate.mean, 5.0);
        assert_relative_eq!(estimate.sample_variance, 32.0 / 7.0, epsilon = 1e-12);
        let se = (32.0_f64 / 7.0 / 8.0).sqrt();
        assert_relative_eq!(estimate.interval.lower, 5.0 - se, epsilon = 1e-12);
        assert_relative_eq!(estimate.interval.upper, 5.0 + se, epsilon = 1e-12);
        assert_relative_eq!(estimate.standard_error(), se, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_samples_collapse() {
        let estimate = PriceEstimate::from_samples(&[3.5; 10]).unwrap();
        assert_eq!(estimate.sample_variance, 0.0);
        assert_eq!(estimate.interval, ConfidenceInterval { lower: 3.5, upper: 3.5 });
    }

    #[test]
    fn test_insufficient_samples() {
        assert_eq!(
            PriceEstimate::from_samples(&[1.0]).unwrap_err(),
            PricingError::InsufficientSamples { got: 1 }
        );
        assert_eq!(
            PriceEstimate::from_samples(&[]).unwrap_err(),
            PricingError::InsufficientSamples { got: 0 }
        );
    }

    #[test]
    fn test_sparse_payoffs_use_population() {
        let payoffs = PayoffVector::new(vec![4.0, 8.0], vec![1, 3], 4).unwrap();
        let estimate = PriceEstimate::from_payoffs(&payoffs).unwrap();
        assert_eq!(estimate.n, 4);
        assert_relative_eq!(estimate.mean, 3.0);
    }

    #[test]
    fn test_interval_display() {
        let interval = ConfidenceInterval { lower: 1.23456, upper: 2.5 };
        assert_eq!(interval.to_string(), "[1.23, 2.50]");
        assert_eq!(format!("{:.4}", interval), "[1.2346, 2.5000]");
    }
}
