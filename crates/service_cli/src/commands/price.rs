//! Price command implementation
//!
//! Prices every option over the simulation files of a previous `simulate`
//! run, or re-estimates prices from stored payoff files.

use std::collections::BTreeMap;

use pricer_pricing::mc::{PathMatrix, SimulationMethod};
use pricer_pricing::path_dependent::OptionType;
use pricer_pricing::pricing::{PricingEngine, ResultTable};
use tracing::info;

use crate::config::PricingConfig;
use crate::output::{read_matrices, render, write_results, FilePayoffStore, OutputFormat};
use crate::Result;

/// Price in-memory matrices, persisting payoffs and result tables
pub fn price_matrices(
    config: &PricingConfig,
    matrices: &BTreeMap<SimulationMethod, PathMatrix>,
    format: OutputFormat,
) -> Result<ResultTable> {
    let params = config.simulation_parameters()?;
    let engine = PricingEngine::new(config.option_parameters()?, params.discount_factor())?;
    let store = FilePayoffStore::create(config.payoffs_dir())?;

    let table = engine.price_all(matrices, &store)?;
    report(config, &table, format)?;
    Ok(table)
}

/// Run the price command
pub fn run(config: &PricingConfig, format: OutputFormat, from_payoffs: bool) -> Result<ResultTable> {
    if from_payoffs {
        info!(dir = %config.payoffs_dir().display(), "estimating from stored payoffs");
        let store = FilePayoffStore::open(config.payoffs_dir())?;
        let table =
            PricingEngine::estimate_from_store(&store, &SimulationMethod::ALL, &OptionType::ALL)?;
        report(config, &table, format)?;
        return Ok(table);
    }

    let matrices = read_matrices(&config.simulations_dir(), &SimulationMethod::ALL)?;
    info!(methods = matrices.len(), "simulations loaded");
    price_matrices(config, &matrices, format)
}

fn report(config: &PricingConfig, table: &ResultTable, format: OutputFormat) -> Result<()> {
    write_results(&config.general.output_dir, table, format, &config.general.ticker)?;
    println!("{}", render(table, format, &config.general.ticker)?);
    Ok(())
}
