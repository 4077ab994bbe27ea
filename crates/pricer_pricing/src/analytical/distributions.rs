//! Standard normal distribution functions.

use std::f64::consts::SQRT_2;

/// Standard normal CDF approximation.
///
/// Uses the Abramowitz and Stegun approximation 7.1.26 for the complementary
/// error function, accurate to about `1.5e-7`.
///
/// ```rust
/// use pricer_pricing::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
pub fn norm_cdf(x: f64) -> f64 {
    if x.abs() > 8.0 {
        return if x > 0.0 { 1.0 } else { 0.0 };
    }

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    // erfc(-x / √2)
    let arg = -x / SQRT_2;
    let abs_arg = arg.abs();
    let t = 1.0 / (1.0 + P * abs_arg);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_arg * abs_arg).exp();
    let erfc = if arg < 0.0 { 2.0 - erfc_abs } else { erfc_abs };

    0.5 * erfc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0), 0.841_344_746, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(-1.0), 0.158_655_254, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(2.5), 0.993_790_335, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [0.1, 0.5, 1.3, 2.7, 4.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_norm_cdf_tails() {
        assert_eq!(norm_cdf(9.0), 1.0);
        assert_eq!(norm_cdf(-9.0), 0.0);
    }
}
