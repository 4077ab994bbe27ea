//! Check command implementation
//!
//! Validates the configuration and history without simulating, and prints
//! the derived run parameters with a Black-Scholes reference for the vanilla.

use std::fmt;

use chrono::NaiveDate;
use pricer_pricing::analytical::black_scholes_call;
use tracing::info;

use crate::config::PricingConfig;
use crate::Result;

use super::simulate::market_inputs;

/// Parameters a run with this configuration would use
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Underlying symbol
    pub ticker: String,
    /// Date of the reference price
    pub as_of: Option<NaiveDate>,
    /// History length
    pub observations: usize,
    /// Reference price
    pub spot: f64,
    /// Annualised historical volatility
    pub volatility: f64,
    /// Time points per trajectory
    pub horizon_steps: usize,
    /// Step length in years
    pub dt: f64,
    /// `exp(-r × horizon)`
    pub discount_factor: f64,
    /// Time spanned by a simulated path, `(horizon_steps - 1) × dt`
    pub effective_maturity: f64,
    /// Closed-form vanilla call at the effective maturity
    pub black_scholes_reference: f64,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_of = self
            .as_of
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(f, "Ticker:              {}", self.ticker)?;
        writeln!(f, "Observations:        {} (last {})", self.observations, as_of)?;
        writeln!(f, "Spot (S0):           {:.4}", self.spot)?;
        writeln!(f, "Volatility:          {:.4}", self.volatility)?;
        writeln!(f, "Horizon steps:       {}", self.horizon_steps)?;
        writeln!(f, "dt:                  {:.6}", self.dt)?;
        writeln!(f, "Discount factor:     {:.6}", self.discount_factor)?;
        writeln!(f, "Effective maturity:  {:.4}", self.effective_maturity)?;
        write!(f, "Black-Scholes call:  {:.4}", self.black_scholes_reference)
    }
}

/// Run the check command
pub fn run(config: &PricingConfig) -> Result<CheckReport> {
    let params = config.simulation_parameters()?;
    let options = config.option_parameters()?;
    let inputs = market_inputs(config)?;

    let effective_maturity = (params.horizon_steps() - 1) as f64 * params.dt();
    let report = CheckReport {
        ticker: config.general.ticker.clone(),
        as_of: inputs.as_of,
        observations: inputs.observations,
        spot: inputs.spot,
        volatility: inputs.volatility,
        horizon_steps: params.horizon_steps(),
        dt: params.dt(),
        discount_factor: params.discount_factor(),
        effective_maturity,
        black_scholes_reference: black_scholes_call(
            inputs.spot,
            options.strike(inputs.spot),
            params.rate(),
            inputs.volatility,
            effective_maturity,
        ),
    };

    info!("Configuration check passed");
    println!("{}", report);
    Ok(report)
}
