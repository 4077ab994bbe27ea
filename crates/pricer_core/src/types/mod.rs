//! Core error types.
//!
//! # Re-exports
//!
//! - [`PricingError`], [`PricingResult`] from `error`

pub mod error;

pub use error::{PricingError, PricingResult};
