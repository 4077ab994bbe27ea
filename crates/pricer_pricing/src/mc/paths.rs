//! Path generation for Monte Carlo simulation.
//!
//! This module implements naive Geometric Brownian Motion (GBM) path
//! generation using the exact log-space solution:
//!
//! ```text
//! S(k) = S(0) × exp(Σ_{j<k} [(r - 0.5σ²)dt + σ√dt × Z_j])
//! ```
//!
//! `dt` is one trading day (`1 / trading_days`) regardless of how many time
//! points the horizon produces.
//!
//! # Algorithm
//!
//! 1. Draw all `n_trajectories × (n_points - 1)` shocks in one batch
//! 2. Build every trajectory from its own shock row, in parallel over rows
//!
//! Because the shock buffer is filled before any row is built, the result is
//! independent of thread scheduling and bit-identical for a fixed seed.

use pricer_core::types::{PricingError, PricingResult};
use rayon::prelude::*;
use tracing::debug;

use super::config::SimulationParameters;
use super::matrix::PathMatrix;
use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.03, 0.2, 1.0 / 252.0);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Time increment per step, in years.
    pub dt: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, dt: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            dt,
        }
    }

    /// `true` if spot and dt are positive, volatility non-negative, all finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.dt > 0.0
            && self.dt.is_finite()
    }

    /// Log drift per step, `(r - 0.5σ²)dt`.
    #[inline]
    pub fn drift_dt(&self) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * self.dt
    }

    /// Diffusion scale per step, `σ√dt`.
    #[inline]
    pub fn vol_sqrt_dt(&self) -> f64 {
        self.volatility * self.dt.sqrt()
    }

    fn validate(&self) -> PricingResult<()> {
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(PricingError::invalid(
                "spot",
                format!("must be positive and finite, got {}", self.spot),
            ));
        }
        if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            return Err(PricingError::invalid(
                "volatility",
                format!("must be non-negative and finite, got {}", self.volatility),
            ));
        }
        if !self.is_valid() {
            return Err(PricingError::invalid(
                "gbm",
                format!("invalid rate {} or dt {}", self.rate, self.dt),
            ));
        }
        Ok(())
    }
}

/// Draws the standard normal shock buffer for a whole batch.
pub(crate) fn draw_shocks(rng: &mut PricerRng, n_trajectories: usize, n_points: usize) -> Vec<f64> {
    let mut shocks = vec![0.0; n_trajectories * (n_points - 1)];
    rng.fill_normal(&mut shocks);
    shocks
}

/// Builds one trajectory per start price from a pre-drawn shock buffer.
///
/// Row `i` starts at `starts[i]` and consumes shock row `i`.
pub(crate) fn build_paths(
    gbm: &GbmParams,
    starts: &[f64],
    shocks: &[f64],
    n_points: usize,
) -> PricingResult<PathMatrix> {
    let n_trajectories = starts.len();
    let n_steps = n_points - 1;
    debug_assert_eq!(shocks.len(), n_trajectories * n_steps);

    let drift_dt = gbm.drift_dt();
    let vol_sqrt_dt = gbm.vol_sqrt_dt();

    let mut values = vec![0.0; n_trajectories * n_points];
    values
        .par_chunks_mut(n_points)
        .zip(starts.par_iter())
        .enumerate()
        .for_each(|(row, (path, &start))| {
            let row_shocks = &shocks[row * n_steps..(row + 1) * n_steps];
            path[0] = start;
            let mut log_sum = 0.0;
            for (slot, z) in path[1..].iter_mut().zip(row_shocks) {
                log_sum += drift_dt + vol_sqrt_dt * z;
                *slot = start * log_sum.exp();
            }
        });

    PathMatrix::from_row_major(values, n_trajectories, n_points)
}

/// Naive Monte Carlo path simulator.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PathSimulator, SimulationParameters};
///
/// let params = SimulationParameters::builder()
///     .rate(0.03)
///     .horizon(0.1)
///     .n_trajectories(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let matrix = PathSimulator::new(100.0, 0.2, &params).unwrap().simulate().unwrap();
/// assert_eq!(matrix.n_trajectories(), 50);
/// assert_eq!(matrix.n_points(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    gbm: GbmParams,
    n_trajectories: usize,
    n_points: usize,
    seed: Option<u64>,
}

impl PathSimulator {
    /// Creates a simulator starting every trajectory at `spot`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] for a non-positive spot or a
    /// negative or non-finite volatility.
    pub fn new(spot: f64, volatility: f64, params: &SimulationParameters) -> PricingResult<Self> {
        let gbm = GbmParams::new(spot, params.rate(), volatility, params.dt());
        gbm.validate()?;
        Ok(Self {
            gbm,
            n_trajectories: params.n_trajectories(),
            n_points: params.horizon_steps(),
            seed: params.seed(),
        })
    }

    /// GBM parameters used by this simulator.
    #[inline]
    pub fn gbm(&self) -> &GbmParams {
        &self.gbm
    }

    /// Simulates with a generator built from the configured seed (or entropy).
    pub fn simulate(&self) -> PricingResult<PathMatrix> {
        let mut rng = PricerRng::from_optional_seed(self.seed);
        self.simulate_with(&mut rng)
    }

    /// Simulates using the supplied generator.
    pub fn simulate_with(&self, rng: &mut PricerRng) -> PricingResult<PathMatrix> {
        debug!(
            trajectories = self.n_trajectories,
            points = self.n_points,
            seed = rng.seed(),
            "generating naive GBM paths"
        );
        let shocks = draw_shocks(rng, self.n_trajectories, self.n_points);
        let starts = vec![self.gbm.spot; self.n_trajectories];
        build_paths(&self.gbm, &starts, &shocks, self.n_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(n: usize, horizon: f64, seed: u64) -> SimulationParameters {
        SimulationParameters::builder()
            .rate(0.05)
            .horizon(horizon)
            .n_trajectories(n)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_gbm_params_validation() {
        assert!(GbmParams::new(100.0, 0.05, 0.2, 1.0 / 252.0).is_valid());
        assert!(!GbmParams::new(0.0, 0.05, 0.2, 0.01).is_valid());
        assert!(!GbmParams::new(-100.0, 0.05, 0.2, 0.01).is_valid());
        assert!(!GbmParams::new(100.0, 0.05, -0.2, 0.01).is_valid());
        assert!(!GbmParams::new(f64::NAN, 0.05, 0.2, 0.01).is_valid());
        // Zero volatility is a valid degenerate model
        assert!(GbmParams::new(100.0, 0.05, 0.0, 0.01).is_valid());
    }

    #[test]
    fn test_simulator_rejects_bad_inputs() {
        let p = params(10, 0.01, 1);
        assert!(matches!(
            PathSimulator::new(-1.0, 0.2, &p),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
        assert!(matches!(
            PathSimulator::new(100.0, f64::NAN, &p),
            Err(PricingError::InvalidParameter { name: "volatility", .. })
        ));
    }

    #[test]
    fn test_path_generation_initial_spot() {
        let matrix = PathSimulator::new(100.0, 0.2, &params(10, 0.006, 42))
            .unwrap()
            .simulate()
            .unwrap();
        assert_eq!(matrix.n_points(), 6);
        for path in matrix.trajectories() {
            assert_eq!(path[0], 100.0);
        }
    }

    #[test]
    fn test_path_generation_positive_prices() {
        let matrix = PathSimulator::new(100.0, 0.8, &params(100, 0.05, 42))
            .unwrap()
            .simulate()
            .unwrap();
        for &price in matrix.as_slice() {
            assert!(price > 0.0, "Price must be positive: {}", price);
            assert!(price.is_finite(), "Price must be finite: {}", price);
        }
    }

    #[test]
    fn test_path_generation_reproducibility() {
        let p = params(25, 0.02, 12345);
        let a = PathSimulator::new(100.0, 0.2, &p).unwrap().simulate().unwrap();
        let b = PathSimulator::new(100.0, 0.2, &p).unwrap().simulate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_path_generation_different_seeds() {
        let a = PathSimulator::new(100.0, 0.2, &params(10, 0.01, 1))
            .unwrap()
            .simulate()
            .unwrap();
        let b = PathSimulator::new(100.0, 0.2, &params(10, 0.01, 2))
            .unwrap()
            .simulate()
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_matches_step_by_step_recursion() {
        let p = params(3, 0.005, 9);
        let sim = PathSimulator::new(50.0, 0.3, &p).unwrap();
        let mut rng = PricerRng::from_seed(9);
        let matrix = sim.simulate_with(&mut rng).unwrap();

        let mut replay = PricerRng::from_seed(9);
        let shocks = draw_shocks(&mut replay, 3, 5);
        let gbm = sim.gbm();
        for row in 0..3 {
            let mut s = 50.0;
            for step in 1..5 {
                let z = shocks[row * 4 + step - 1];
                s *= (gbm.drift_dt() + gbm.vol_sqrt_dt() * z).exp();
                assert_relative_eq!(matrix.trajectory(row)[step], s, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_volatility_is_deterministic_drift() {
        let p = params(4, 0.01, 3);
        let matrix = PathSimulator::new(100.0, 0.0, &p).unwrap().simulate().unwrap();
        let dt = p.dt();
        for path in matrix.trajectories() {
            for (k, &s) in path.iter().enumerate() {
                assert_relative_eq!(s, 100.0 * (0.05 * dt * k as f64).exp(), max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_statistical_mean() {
        // E[S(k)] = S0 × exp(r × k × dt)
        let p = params(20_000, 0.011, 42);
        let matrix = PathSimulator::new(100.0, 0.2, &p).unwrap().simulate().unwrap();
        let last = matrix.n_points() - 1;
        let mean = matrix.column(last).iter().sum::<f64>() / matrix.n_trajectories() as f64;
        let expected = 100.0 * (0.05 * p.dt() * last as f64).exp();
        assert_relative_eq!(mean, expected, max_relative = 0.01);
    }
}
