//! Historical price series.

use crate::types::{PricingError, PricingResult};

const EMPTY_HISTORY: &str = "the last price is the simulation start";

/// Ordered (time ascending) series of observed prices.
///
/// Construction guarantees a non-empty series of strictly positive, finite
/// prices, so [`PriceHistory::last_price`] is always a valid simulation start.
///
/// # Examples
/// ```
/// use pricer_core::market_data::PriceHistory;
///
/// let history = PriceHistory::new(vec![100.0, 101.0, 99.5]).unwrap();
/// assert_eq!(history.len(), 3);
/// assert_eq!(history.last_price(), 99.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceHistory {
    prices: Vec<f64>,
}

impl PriceHistory {
    /// Creates a price history from observations ordered oldest first.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InsufficientData`] if `prices` is empty
    /// - [`PricingError::InvalidParameter`] if any price is non-finite or non-positive
    pub fn new(prices: Vec<f64>) -> PricingResult<Self> {
        if prices.is_empty() {
            return Err(PricingError::InsufficientData {
                got: 0,
                need: 1,
                context: EMPTY_HISTORY,
            });
        }
        if let Some((idx, &p)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(PricingError::invalid(
                "prices",
                format!("observation {} is {}, prices must be positive and finite", idx, p),
            ));
        }
        Ok(Self { prices })
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent observation, used as the simulation start price S0.
    #[inline]
    pub fn last_price(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    /// All observations, oldest first.
    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Simple returns `p[i] / p[i-1] - 1` between consecutive observations.
    pub fn simple_returns(&self) -> Vec<f64> {
        self.prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
    }
}
