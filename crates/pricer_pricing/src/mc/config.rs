//! Monte Carlo simulation configuration.
//!
//! [`SimulationParameters`] is the validated, immutable parameter bundle
//! shared by the three simulators. It is only obtainable through
//! [`SimulationParametersBuilder::build`], which rejects out-of-range values
//! before any simulation begins.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{PricingError, PricingResult};

/// Maximum number of trajectories allowed.
pub const MAX_TRAJECTORIES: usize = 10_000_000;

/// Maximum number of time points per trajectory.
pub const MAX_HORIZON_STEPS: usize = 100_000;

/// Maximum number of cells (trajectories × time points) in one path matrix.
pub const MAX_MATRIX_CELLS: usize = 250_000_000;

/// Time points simulated per year of horizon.
pub const STEPS_PER_YEAR: f64 = 1000.0;

/// How stratified sampling assigns trajectories to strata.
///
/// `Reference` reproduces the historical behaviour where the stratum is
/// looked up from the constant reference price, so every trajectory shares
/// one stratum. `Proportional` spreads trajectories evenly across all strata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StratumAllocation {
    /// Every trajectory starts in the stratum that contains S0.
    #[default]
    Reference,
    /// Trajectory `i` starts in stratum `i mod n_strata`.
    Proportional,
}

impl StratumAllocation {
    /// Lowercase configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StratumAllocation::Reference => "reference",
            StratumAllocation::Proportional => "proportional",
        }
    }
}

impl fmt::Display for StratumAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StratumAllocation {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" => Ok(StratumAllocation::Reference),
            "proportional" => Ok(StratumAllocation::Proportional),
            other => Err(PricingError::invalid(
                "stratum_allocation",
                format!("unknown allocation '{}', expected reference or proportional", other),
            )),
        }
    }
}

/// Validated simulation parameters.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationParameters;
///
/// let params = SimulationParameters::builder()
///     .rate(0.03)
///     .horizon(1.0)
///     .n_trajectories(10_000)
///     .seed(42)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.horizon_steps(), 1000);
/// assert_eq!(params.trading_days(), 252);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    rate: f64,
    horizon: f64,
    trading_days: u32,
    n_trajectories: usize,
    n_strata: usize,
    antithetic_proportion: f64,
    seed: Option<u64>,
    stratum_allocation: StratumAllocation,
}

impl SimulationParameters {
    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Annualised continuously-compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Horizon in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Trading days per year.
    #[inline]
    pub fn trading_days(&self) -> u32 {
        self.trading_days
    }

    /// Number of simulated trajectories.
    #[inline]
    pub fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }

    /// Number of strata for stratified sampling.
    #[inline]
    pub fn n_strata(&self) -> usize {
        self.n_strata
    }

    /// Fraction of naive trajectories mirrored by antithetic sampling.
    #[inline]
    pub fn antithetic_proportion(&self) -> f64 {
        self.antithetic_proportion
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Stratum assignment rule for stratified sampling.
    #[inline]
    pub fn stratum_allocation(&self) -> StratumAllocation {
        self.stratum_allocation
    }

    /// Time points per trajectory, `t = 0` included: `round(1000 × horizon)`.
    #[inline]
    pub fn horizon_steps(&self) -> usize {
        horizon_steps_for(self.horizon)
    }

    /// Time increment per step, `1 / trading_days`.
    ///
    /// Fixed per trading day and independent of [`horizon_steps`](Self::horizon_steps).
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.trading_days)
    }

    /// Discount factor `exp(-r × horizon)` applied to every payoff.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.horizon).exp()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> PricingResult<()> {
        if !self.rate.is_finite() {
            return Err(PricingError::invalid(
                "risk_free_rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(PricingError::invalid(
                "horizon",
                format!("must be positive and finite, got {}", self.horizon),
            ));
        }
        let steps = self.horizon_steps();
        if !(2..=MAX_HORIZON_STEPS).contains(&steps) {
            return Err(PricingError::invalid(
                "horizon",
                format!(
                    "yields {} time points, must be in [2, {}]",
                    steps, MAX_HORIZON_STEPS
                ),
            ));
        }
        if self.trading_days == 0 {
            return Err(PricingError::invalid("trading_days", "must be positive, got 0"));
        }
        if self.n_trajectories == 0 || self.n_trajectories > MAX_TRAJECTORIES {
            return Err(PricingError::invalid(
                "n_trajectories",
                format!(
                    "must be in [1, {}], got {}",
                    MAX_TRAJECTORIES, self.n_trajectories
                ),
            ));
        }
        if self.n_trajectories.saturating_mul(steps) > MAX_MATRIX_CELLS {
            return Err(PricingError::invalid(
                "n_trajectories",
                format!(
                    "{} trajectories × {} time points exceeds {} cells",
                    self.n_trajectories, steps, MAX_MATRIX_CELLS
                ),
            ));
        }
        if self.n_strata == 0 {
            return Err(PricingError::invalid("n_strata", "must be positive, got 0"));
        }
        let p = self.antithetic_proportion;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(PricingError::invalid(
                "antithetic_proportion",
                format!("must be in (0, 1], got {}", p),
            ));
        }
        Ok(())
    }
}

/// `round(1000 × horizon)`, saturating for out-of-range horizons.
#[inline]
pub(crate) fn horizon_steps_for(horizon: f64) -> usize {
    let steps = (STEPS_PER_YEAR * horizon).round();
    if steps.is_finite() && steps > 0.0 {
        steps as usize
    } else {
        0
    }
}

/// Builder for [`SimulationParameters`].
///
/// `rate`, `horizon` and `n_trajectories` must be set. Defaults: 252
/// trading days, 10 strata, antithetic proportion 0.5, no seed, reference
/// stratum allocation.
#[derive(Clone, Debug)]
pub struct SimulationParametersBuilder {
    rate: Option<f64>,
    horizon: Option<f64>,
    trading_days: u32,
    n_trajectories: Option<usize>,
    n_strata: usize,
    antithetic_proportion: f64,
    seed: Option<u64>,
    stratum_allocation: StratumAllocation,
}

impl Default for SimulationParametersBuilder {
    fn default() -> Self {
        Self {
            rate: None,
            horizon: None,
            trading_days: 252,
            n_trajectories: None,
            n_strata: 10,
            antithetic_proportion: 0.5,
            seed: None,
            stratum_allocation: StratumAllocation::default(),
        }
    }
}

impl SimulationParametersBuilder {
    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the horizon in years.
    #[inline]
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Sets the trading-days-per-year convention.
    #[inline]
    pub fn trading_days(mut self, trading_days: u32) -> Self {
        self.trading_days = trading_days;
        self
    }

    /// Sets the number of trajectories.
    #[inline]
    pub fn n_trajectories(mut self, n_trajectories: usize) -> Self {
        self.n_trajectories = Some(n_trajectories);
        self
    }

    /// Sets the number of strata.
    #[inline]
    pub fn n_strata(mut self, n_strata: usize) -> Self {
        self.n_strata = n_strata;
        self
    }

    /// Sets the antithetic sampling proportion.
    #[inline]
    pub fn antithetic_proportion(mut self, proportion: f64) -> Self {
        self.antithetic_proportion = proportion;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the stratum allocation rule.
    #[inline]
    pub fn stratum_allocation(mut self, allocation: StratumAllocation) -> Self {
        self.stratum_allocation = allocation;
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if a required field is missing or
    /// any field is out of range.
    pub fn build(self) -> PricingResult<SimulationParameters> {
        let rate = self
            .rate
            .ok_or_else(|| PricingError::invalid("risk_free_rate", "must be specified"))?;
        let horizon = self
            .horizon
            .ok_or_else(|| PricingError::invalid("horizon", "must be specified"))?;
        let n_trajectories = self
            .n_trajectories
            .ok_or_else(|| PricingError::invalid("n_trajectories", "must be specified"))?;

        let params = SimulationParameters {
            rate,
            horizon,
            trading_days: self.trading_days,
            n_trajectories,
            n_strata: self.n_strata,
            antithetic_proportion: self.antithetic_proportion,
            seed: self.seed,
            stratum_allocation: self.stratum_allocation,
        };

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> SimulationParametersBuilder {
        SimulationParameters::builder()
            .rate(0.03)
            .horizon(1.0)
            .n_trajectories(1_000)
    }

    #[test]
    fn test_builder_defaults() {
        let params = base().build().unwrap();
        assert_eq!(params.trading_days(), 252);
        assert_eq!(params.n_strata(), 10);
        assert_eq!(params.antithetic_proportion(), 0.5);
        assert_eq!(params.seed(), None);
        assert_eq!(params.stratum_allocation(), StratumAllocation::Reference);
    }

    #[test]
    fn test_derived_quantities() {
        let params = base().horizon(0.5).trading_days(250).build().unwrap();
        assert_eq!(params.horizon_steps(), 500);
        assert_relative_eq!(params.dt(), 1.0 / 250.0);
        assert_relative_eq!(params.discount_factor(), (-0.015_f64).exp());
    }

    #[test]
    fn test_horizon_steps_rounds() {
        // 1000 × 0.0016 = 1.6 -> 2
        let params = base().horizon(0.0016).build().unwrap();
        assert_eq!(params.horizon_steps(), 2);
    }

    #[test]
    fn test_missing_required_fields() {
        let err = SimulationParameters::builder()
            .horizon(1.0)
            .n_trajectories(10)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "risk_free_rate", .. }
        ));

        let err = SimulationParameters::builder()
            .rate(0.01)
            .horizon(1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "n_trajectories", .. }
        ));
    }

    #[test]
    fn test_invalid_counts() {
        assert!(base().n_trajectories(0).build().is_err());
        assert!(base().n_trajectories(MAX_TRAJECTORIES + 1).build().is_err());
        assert!(base().n_strata(0).build().is_err());
        assert!(base().trading_days(0).build().is_err());
    }

    #[test]
    fn test_invalid_proportion() {
        for p in [0.0, -0.1, 1.01, f64::NAN] {
            let err = base().antithetic_proportion(p).build().unwrap_err();
            assert!(matches!(
                err,
                PricingError::InvalidParameter { name: "antithetic_proportion", .. }
            ));
        }
        assert!(base().antithetic_proportion(1.0).build().is_ok());
    }

    #[test]
    fn test_invalid_horizon() {
        assert!(base().horizon(0.0).build().is_err());
        assert!(base().horizon(-1.0).build().is_err());
        // 1000 × 0.001 = 1 time point: no steps to simulate
        assert!(base().horizon(0.001).build().is_err());
        assert!(base().horizon(f64::INFINITY).build().is_err());
    }

    #[test]
    fn test_too_many_cells() {
        let err = base()
            .horizon(100.0)
            .n_trajectories(5_000)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("cells"));
    }

    #[test]
    fn test_non_finite_rate() {
        assert!(base().rate(f64::NAN).build().is_err());
    }

    #[test]
    fn test_stratum_allocation_parse() {
        assert_eq!(
            "Proportional".parse::<StratumAllocation>().unwrap(),
            StratumAllocation::Proportional
        );
        assert_eq!(
            "reference".parse::<StratumAllocation>().unwrap(),
            StratumAllocation::Reference
        );
        assert!("random".parse::<StratumAllocation>().is_err());
        assert_eq!(StratumAllocation::Proportional.to_string(), "proportional");
    }
}
