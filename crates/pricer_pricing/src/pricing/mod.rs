//! Price estimation from payoff vectors.
//!
//! - [`PriceEstimate`]: sample mean, sample variance and a one-standard-error
//!   [`ConfidenceInterval`]
//! - [`PayoffStore`]: where computed payoff vectors are persisted
//! - [`PricingEngine`]: every option over every method, in parallel
//! - [`ResultTable`]: options as rows, methods as columns

mod engine;
mod estimate;
mod store;
mod table;

pub use engine::PricingEngine;
pub use estimate::{ConfidenceInterval, PriceEstimate};
pub use store::{InMemoryPayoffStore, PayoffStore};
pub use table::ResultTable;
