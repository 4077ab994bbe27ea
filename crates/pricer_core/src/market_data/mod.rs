//! Market inputs for simulation.
//!
//! # Components
//!
//! - [`history`]: Validated historical price series ([`PriceHistory`])
//! - [`volatility`]: Annualised historical volatility ([`VolatilityEstimator`])
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{PriceHistory, VolatilityEstimator};
//!
//! let history = PriceHistory::new(vec![100.0, 100.5, 99.8, 101.2, 100.9]).unwrap();
//! let sigma = VolatilityEstimator::new(252).unwrap().estimate(&history).unwrap();
//! let spot = history.last_price();
//! assert_eq!(spot, 100.9);
//! assert!(sigma > 0.0 && sigma.is_finite());
//! ```

pub mod history;
pub mod volatility;

pub use history::PriceHistory;
pub use volatility::{VolatilityEstimator, MIN_OBSERVATIONS, TOO_FEW_RETURNS};
