//! Simulate command implementation
//!
//! Reads the price history, estimates volatility and writes one simulation
//! file per method under `<output_dir>/simulations`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pricer_core::market_data::VolatilityEstimator;
use pricer_pricing::mc::{PathMatrix, SimulationEngine, SimulationMethod};
use tracing::info;

use crate::config::PricingConfig;
use crate::input::HistoryFile;
use crate::output::write_matrices;
use crate::Result;

/// Simulation inputs derived from the price history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketInputs {
    /// Reference price, the last observation
    pub spot: f64,
    /// Annualised historical volatility
    pub volatility: f64,
    /// Number of observations
    pub observations: usize,
    /// Date of the reference price
    pub as_of: Option<NaiveDate>,
}

/// Load the configured history and estimate S0 and σ
pub fn market_inputs(config: &PricingConfig) -> Result<MarketInputs> {
    let file = HistoryFile::load(&config.general.history_file)?;
    let history = file.history();
    let volatility = VolatilityEstimator::new(config.simulation.trading_days)?.estimate(history)?;
    Ok(MarketInputs {
        spot: history.last_price(),
        volatility,
        observations: history.len(),
        as_of: file.last_date(),
    })
}

/// Run the simulate command
pub fn run(config: &PricingConfig) -> Result<BTreeMap<SimulationMethod, PathMatrix>> {
    let params = config.simulation_parameters()?;
    let inputs = market_inputs(config)?;
    info!(
        ticker = %config.general.ticker,
        spot = inputs.spot,
        volatility = inputs.volatility,
        observations = inputs.observations,
        "market inputs estimated"
    );

    let matrices = SimulationEngine::new(inputs.spot, inputs.volatility, params).run()?;
    write_matrices(&config.simulations_dir(), &matrices)?;
    Ok(matrices)
}
