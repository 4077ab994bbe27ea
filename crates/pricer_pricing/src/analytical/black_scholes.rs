//! Black-Scholes European call.

use super::distributions::norm_cdf;

/// Price a European call under Black-Scholes.
///
/// # Mathematical Formula
///
/// ```text
/// d1 = [ln(S / K) + (r + σ²/2) T] / (σ √T)
/// d2 = d1 - σ √T
///
/// Call = S N(d1) - K exp(-rT) N(d2)
/// ```
///
/// With zero volatility or zero maturity the price is the deterministic
/// limit `max(S - K exp(-rT), 0)`.
///
/// # Arguments
///
/// * `spot` - Current spot price (S_0)
/// * `strike` - Strike price (K)
/// * `rate` - Risk-free interest rate (r)
/// * `volatility` - Annualized volatility (σ)
/// * `maturity` - Time to maturity (T)
///
/// # Example
///
/// ```rust
/// use pricer_pricing::analytical::black_scholes_call;
///
/// let price = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    let discounted_strike = strike * (-rate * maturity).exp();
    if volatility <= 0.0 || maturity <= 0.0 {
        return (spot - discounted_strike).max(0.0);
    }

    let vol_sqrt_t = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_value() {
        // Hull, S=K=100, r=5%, σ=20%, T=1
        assert_relative_eq!(
            black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0),
            10.4506,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_zero_volatility_limit() {
        let price = black_scholes_call(100.0, 95.0, 0.03, 0.0, 1.0);
        assert_relative_eq!(price, 100.0 - 95.0 * (-0.03_f64).exp(), epsilon = 1e-12);
        assert_eq!(black_scholes_call(90.0, 100.0, 0.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_bounds() {
        for strike in [50.0, 90.0, 100.0, 120.0, 200.0] {
            let price = black_scholes_call(100.0, strike, 0.03, 0.3, 2.0);
            let lower = (100.0 - strike * (-0.06_f64).exp()).max(0.0);
            assert!(price >= lower - 1e-6, "strike {}: {} < {}", strike, price, lower);
            assert!(price <= 100.0);
        }
    }

    #[test]
    fn test_increases_with_volatility() {
        let low = black_scholes_call(100.0, 100.0, 0.03, 0.1, 1.0);
        let high = black_scholes_call(100.0, 100.0, 0.03, 0.4, 1.0);
        assert!(high > low);
    }
}
