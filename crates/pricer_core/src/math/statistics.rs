//! Sample statistics over `f64` slices.
//!
//! Used by the volatility estimator and by the Monte Carlo price estimator.
//! Both consumers require the unbiased (n - 1) variance, so that is the only
//! variance provided here.

use crate::types::{PricingError, PricingResult};

/// Arithmetic mean of `values`.
///
/// Returns `None` for an empty slice.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance `Σ(mean - xᵢ)² / (n - 1)` around a known mean.
///
/// # Errors
///
/// [`PricingError::InsufficientSamples`] when fewer than two values are given.
pub fn sample_variance_about(values: &[f64], mean: f64) -> PricingResult<f64> {
    let n = values.len();
    if n < 2 {
        return Err(PricingError::InsufficientSamples { got: n });
    }
    let sum_sq = values.iter().map(|x| (mean - x) * (mean - x)).sum::<f64>();
    Ok(sum_sq / (n - 1) as f64)
}

/// Unbiased sample variance of `values`.
///
/// # Errors
///
/// [`PricingError::InsufficientSamples`] when fewer than two values are given.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::sample_variance;
///
/// let var = sample_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((var - 32.0 / 7.0).abs() < 1e-12);
/// ```
pub fn sample_variance(values: &[f64]) -> PricingResult<f64> {
    let m = mean(values).ok_or(PricingError::InsufficientSamples { got: 0 })?;
    sample_variance_about(values, m)
}

/// Unbiased sample standard deviation of `values`.
///
/// # Errors
///
/// [`PricingError::InsufficientSamples`] when fewer than two values are given.
pub fn sample_std_dev(values: &[f64]) -> PricingResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_basic() {
        assert_relative_eq!(mean(&[100.0, 105.0, 110.0, 95.0, 100.0]).unwrap(), 102.0);
    }

    #[test]
    fn test_variance_constant_is_zero() {
        assert_eq!(sample_variance(&[3.0; 10]).unwrap(), 0.0);
    }

    #[test]
    fn test_variance_about_given_mean() {
        // Deviations from 2.0: -1, 0, 1 -> (1 + 0 + 1) / 2
        assert_relative_eq!(sample_variance_about(&[1.0, 2.0, 3.0], 2.0).unwrap(), 1.0);
    }

    #[test]
    fn test_variance_requires_two_values() {
        assert_eq!(
            sample_variance(&[1.0]),
            Err(PricingError::InsufficientSamples { got: 1 })
        );
        assert_eq!(
            sample_variance(&[]),
            Err(PricingError::InsufficientSamples { got: 0 })
        );
    }

    #[test]
    fn test_std_dev() {
        assert_relative_eq!(sample_std_dev(&[1.0, 3.0]).unwrap(), 2.0_f64.sqrt());
    }
}
