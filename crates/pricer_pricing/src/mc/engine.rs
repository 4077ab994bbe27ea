//! Orchestration of the three sampling methods.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use pricer_core::types::{PricingError, PricingResult};
use tracing::info;

use super::antithetic::AntitheticSampler;
use super::config::SimulationParameters;
use super::matrix::PathMatrix;
use super::paths::PathSimulator;
use super::stratified::StratifiedSampler;

/// Sampling strategy used to produce a path matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SimulationMethod {
    /// Plain Monte Carlo.
    Naive,
    /// Antithetic variates over a sample of the naive batch.
    Antithetic,
    /// Stratified starting prices.
    Stratified,
}

impl SimulationMethod {
    /// All methods, in execution order.
    pub const ALL: [SimulationMethod; 3] = [
        SimulationMethod::Naive,
        SimulationMethod::Antithetic,
        SimulationMethod::Stratified,
    ];

    /// Lowercase identifier used in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationMethod::Naive => "naive",
            SimulationMethod::Antithetic => "antithetic",
            SimulationMethod::Stratified => "stratified",
        }
    }

    /// Column heading in result tables.
    pub fn label(&self) -> &'static str {
        match self {
            SimulationMethod::Naive => "Naive simulation",
            SimulationMethod::Antithetic => "Antithetic simulation",
            SimulationMethod::Stratified => "Stratified simulation",
        }
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" => Ok(SimulationMethod::Naive),
            "antithetic" => Ok(SimulationMethod::Antithetic),
            "stratified" => Ok(SimulationMethod::Stratified),
            other => Err(PricingError::invalid(
                "method",
                format!("unknown simulation method '{}'", other),
            )),
        }
    }
}

/// Runs naive, antithetic and stratified simulation for one underlying.
///
/// Antithetic sampling consumes the naive batch, so the methods always run
/// in [`SimulationMethod::ALL`] order.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SimulationEngine, SimulationMethod, SimulationParameters};
///
/// let params = SimulationParameters::builder()
///     .rate(0.03)
///     .horizon(0.02)
///     .n_trajectories(100)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let matrices = SimulationEngine::new(100.0, 0.2, params).run().unwrap();
/// assert_eq!(matrices[&SimulationMethod::Naive].n_trajectories(), 100);
/// assert_eq!(matrices[&SimulationMethod::Antithetic].n_trajectories(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    spot: f64,
    volatility: f64,
    params: SimulationParameters,
}

impl SimulationEngine {
    /// Creates an engine for an underlying at `spot` with annualised `volatility`.
    pub fn new(spot: f64, volatility: f64, params: SimulationParameters) -> Self {
        Self {
            spot,
            volatility,
            params,
        }
    }

    /// Simulation parameters.
    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Runs every method and returns one matrix per method.
    pub fn run(&self) -> PricingResult<BTreeMap<SimulationMethod, PathMatrix>> {
        let naive = PathSimulator::new(self.spot, self.volatility, &self.params)?.simulate()?;
        info!(
            method = %SimulationMethod::Naive,
            trajectories = naive.n_trajectories(),
            points = naive.n_points(),
            "simulation complete"
        );

        let antithetic = AntitheticSampler::from_parameters(&self.params).sample(&naive)?;
        info!(
            method = %SimulationMethod::Antithetic,
            trajectories = antithetic.n_trajectories(),
            "simulation complete"
        );

        let stratified =
            StratifiedSampler::new(self.spot, self.volatility, &self.params)?.simulate()?;
        info!(
            method = %SimulationMethod::Stratified,
            trajectories = stratified.n_trajectories(),
            allocation = %self.params.stratum_allocation(),
            "simulation complete"
        );

        Ok(BTreeMap::from([
            (SimulationMethod::Naive, naive),
            (SimulationMethod::Antithetic, antithetic),
            (SimulationMethod::Stratified, stratified),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        for method in SimulationMethod::ALL {
            assert_eq!(method.as_str().parse::<SimulationMethod>().unwrap(), method);
        }
        assert_eq!(SimulationMethod::Stratified.label(), "Stratified simulation");
        assert!("quasi".parse::<SimulationMethod>().is_err());
    }

    #[test]
    fn test_run_produces_all_methods() {
        let params = SimulationParameters::builder()
            .rate(0.01)
            .horizon(0.01)
            .n_trajectories(21)
            .antithetic_proportion(0.5)
            .seed(3)
            .build()
            .unwrap();
        let matrices = SimulationEngine::new(80.0, 0.3, params).run().unwrap();
        assert_eq!(matrices.len(), 3);
        assert_eq!(matrices[&SimulationMethod::Naive].n_trajectories(), 21);
        assert_eq!(matrices[&SimulationMethod::Antithetic].n_trajectories(), 20);
        assert_eq!(matrices[&SimulationMethod::Stratified].n_trajectories(), 21);
    }

    #[test]
    fn test_run_propagates_empty_sample() {
        let params = SimulationParameters::builder()
            .rate(0.01)
            .horizon(0.01)
            .n_trajectories(1)
            .antithetic_proportion(0.5)
            .seed(3)
            .build()
            .unwrap();
        let err = SimulationEngine::new(80.0, 0.3, params).run().unwrap_err();
        assert!(matches!(err, PricingError::EmptySample { .. }));
    }
}
