//! Property tests for the historical volatility estimator.

use pricer_core::market_data::{PriceHistory, VolatilityEstimator, TOO_FEW_RETURNS};
use pricer_core::types::PricingError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn volatility_is_non_negative_and_finite(
        prices in prop::collection::vec(1.0_f64..1_000.0, 3..200),
        trading_days in 1_u32..400,
    ) {
        let history = PriceHistory::new(prices).unwrap();
        let sigma = VolatilityEstimator::new(trading_days)
            .unwrap()
            .estimate(&history)
            .unwrap();
        prop_assert!(sigma >= 0.0);
        prop_assert!(sigma.is_finite());
    }

    #[test]
    fn volatility_is_scale_invariant(
        prices in prop::collection::vec(1.0_f64..1_000.0, 3..100),
        scale in 0.1_f64..10.0,
    ) {
        let estimator = VolatilityEstimator::new(252).unwrap();
        let scaled: Vec<f64> = prices.iter().map(|p| p * scale).collect();
        let a = estimator.estimate(&PriceHistory::new(prices).unwrap()).unwrap();
        let b = estimator.estimate(&PriceHistory::new(scaled).unwrap()).unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * (1.0 + a.abs()));
    }

    #[test]
    fn short_histories_are_rejected(prices in prop::collection::vec(1.0_f64..1_000.0, 1..3)) {
        let n = prices.len();
        let history = PriceHistory::new(prices).unwrap();
        let result = VolatilityEstimator::new(252).unwrap().estimate(&history);
        prop_assert_eq!(
            result,
            Err(PricingError::InsufficientData { got: n, need: 3, context: TOO_FEW_RETURNS })
        );
    }
}
