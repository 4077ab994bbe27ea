//! Historical volatility estimation.
//!
//! The estimator is the sample standard deviation of simple daily returns,
//! annualised by `sqrt(trading_days)`:
//!
//! ```text
//! σ = std(p[i]/p[i-1] - 1) × √trading_days
//! ```

use super::PriceHistory;
use crate::math::statistics::sample_std_dev;
use crate::types::{PricingError, PricingResult};

/// Minimum observations for a defined sample standard deviation of returns.
pub const MIN_OBSERVATIONS: usize = 3;

/// Reason attached to [`PricingError::InsufficientData`] for short histories.
pub const TOO_FEW_RETURNS: &str =
    "two prices give one return, whose sample standard deviation is undefined";

/// Annualised volatility estimator over a daily price history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolatilityEstimator {
    trading_days: u32,
}

impl VolatilityEstimator {
    /// Creates an estimator for the given trading-days-per-year convention.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if `trading_days` is zero.
    pub fn new(trading_days: u32) -> PricingResult<Self> {
        if trading_days == 0 {
            return Err(PricingError::invalid(
                "trading_days",
                "must be positive, got 0",
            ));
        }
        Ok(Self { trading_days })
    }

    /// Trading days per year used for annualisation.
    #[inline]
    pub fn trading_days(&self) -> u32 {
        self.trading_days
    }

    /// Estimates annualised volatility from `history`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InsufficientData`] when the history has fewer than
    /// [`MIN_OBSERVATIONS`] prices (two returns are needed for an unbiased
    /// standard deviation).
    ///
    /// # Examples
    /// ```
    /// use pricer_core::market_data::{PriceHistory, VolatilityEstimator};
    ///
    /// let history = PriceHistory::new(vec![100.0, 101.0, 100.0, 102.0]).unwrap();
    /// let sigma = VolatilityEstimator::new(252).unwrap().estimate(&history).unwrap();
    /// assert!(sigma > 0.0);
    /// ```
    pub fn estimate(&self, history: &PriceHistory) -> PricingResult<f64> {
        if history.len() < MIN_OBSERVATIONS {
            return Err(PricingError::InsufficientData {
                got: history.len(),
                need: MIN_OBSERVATIONS,
                context: TOO_FEW_RETURNS,
            });
        }
        let daily = sample_std_dev(&history.simple_returns())?;
        Ok(daily * f64::from(self.trading_days).sqrt())
    }
}
