//! # pricer_core: Foundation for the Monte Carlo Exotic Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `PricingResult` (`types::error`)
//! - Validated historical prices: `PriceHistory` (`market_data::history`)
//! - Annualised volatility: `VolatilityEstimator` (`market_data::volatility`)
//! - Sample statistics: mean and unbiased variance (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates; its only external
//! dependency is `thiserror`.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{PriceHistory, VolatilityEstimator};
//! use pricer_core::types::PricingError;
//!
//! let history = PriceHistory::new(vec![100.0, 101.0, 99.0, 100.5]).unwrap();
//! let sigma = VolatilityEstimator::new(252).unwrap().estimate(&history).unwrap();
//! assert!(sigma > 0.0);
//!
//! let short = PriceHistory::new(vec![100.0]).unwrap();
//! assert!(matches!(
//!     VolatilityEstimator::new(252).unwrap().estimate(&short),
//!     Err(PricingError::InsufficientData { .. })
//! ));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
