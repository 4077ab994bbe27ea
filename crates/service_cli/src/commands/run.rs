//! Run command implementation
//!
//! Simulation followed by pricing in one pass.

use pricer_pricing::pricing::ResultTable;

use crate::config::PricingConfig;
use crate::output::OutputFormat;
use crate::Result;

use super::{price, simulate};

/// Run the full pipeline
pub fn run(config: &PricingConfig, format: OutputFormat) -> Result<ResultTable> {
    let matrices = simulate::run(config)?;
    price::price_matrices(config, &matrices, format)
}
