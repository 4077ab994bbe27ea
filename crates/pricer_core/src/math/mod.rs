//! Numerical helpers shared across the pricing stack.
//!
//! - [`statistics`]: mean and unbiased variance over sample slices

pub mod statistics;
