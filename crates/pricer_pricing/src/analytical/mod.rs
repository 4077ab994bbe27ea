//! Analytical (closed-form) solutions for option pricing.
//!
//! This module provides the Black-Scholes call price used to check the
//! convergence of the Monte Carlo vanilla estimate.
//!
//! # Usage
//!
//! ```rust
//! use pricer_pricing::analytical::black_scholes_call;
//!
//! let price = black_scholes_call(
//!     100.0, // spot
//!     100.0, // strike
//!     0.03,  // risk-free rate
//!     0.25,  // volatility
//!     1.0,   // time to maturity
//! );
//! assert!(price > 0.0);
//! ```

mod black_scholes;
mod distributions;

pub use black_scholes::black_scholes_call;
pub use distributions::norm_cdf;
