//! Stratified initial-value sampling.
//!
//! The band `[0.8 × S0, 1.2 × S0]` is split into `n_strata` equal-width
//! strata. Each trajectory draws its starting price uniformly inside one
//! stratum and then follows the same GBM recursion as the naive simulator.
//!
//! Shocks for the whole batch are drawn before the start prices, so a
//! stratified run seeded like a naive run consumes the identical shock matrix.

use pricer_core::types::{PricingError, PricingResult};
use tracing::debug;

use super::config::{SimulationParameters, StratumAllocation};
use super::matrix::PathMatrix;
use super::paths::{build_paths, draw_shocks, GbmParams};
use crate::rng::PricerRng;

/// Lower edge of the stratified band, as a multiple of S0.
pub const BAND_LOWER: f64 = 0.8;

/// Upper edge of the stratified band, as a multiple of S0.
pub const BAND_UPPER: f64 = 1.2;

/// Equal-width partition of the starting-price band.
///
/// Edges are laid out outwards from S0, so with an even count the middle
/// edge is S0 itself and adjacent strata share identical edge values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strata {
    spot: f64,
    width: f64,
    count: usize,
}

impl Strata {
    /// Partitions `[0.8 × spot, 1.2 × spot]` into `count` strata.
    pub fn around(spot: f64, count: usize) -> Self {
        let lower = BAND_LOWER * spot;
        let upper = BAND_UPPER * spot;
        Self {
            spot,
            width: (upper - lower) / count as f64,
            count,
        }
    }

    /// Number of strata.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Width of every stratum.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Edge `index` of the partition, `0..=count`.
    #[inline]
    pub fn edge(&self, index: usize) -> f64 {
        let offset = index as f64 - self.count as f64 / 2.0;
        self.spot + offset * self.width
    }

    /// `[low, high)` bounds of stratum `index`.
    #[inline]
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        (self.edge(index), self.edge(index + 1))
    }

    /// Stratum containing `price`: the last one whose lower edge is at or
    /// below it, clamped to the band.
    pub fn index_of(&self, price: f64) -> usize {
        (1..self.count)
            .take_while(|&index| self.edge(index) <= price)
            .count()
    }
}

/// Simulator with stratified starting prices.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SimulationParameters, StratifiedSampler};
///
/// let params = SimulationParameters::builder()
///     .rate(0.03)
///     .horizon(0.05)
///     .n_trajectories(20)
///     .n_strata(4)
///     .seed(1)
///     .build()
///     .unwrap();
///
/// let matrix = StratifiedSampler::new(100.0, 0.2, &params).unwrap().simulate().unwrap();
/// for path in matrix.trajectories() {
///     assert!((80.0..=120.0).contains(&path[0]));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct StratifiedSampler {
    gbm: GbmParams,
    strata: Strata,
    allocation: StratumAllocation,
    n_trajectories: usize,
    n_points: usize,
    seed: Option<u64>,
}

impl StratifiedSampler {
    /// Creates a stratified sampler around `spot`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] for a non-positive spot or a
    /// negative or non-finite volatility.
    pub fn new(spot: f64, volatility: f64, params: &SimulationParameters) -> PricingResult<Self> {
        let gbm = GbmParams::new(spot, params.rate(), volatility, params.dt());
        if !gbm.is_valid() {
            return Err(PricingError::invalid(
                "stratified",
                format!(
                    "spot must be positive and volatility non-negative, got spot {} and volatility {}",
                    spot, volatility
                ),
            ));
        }
        Ok(Self {
            gbm,
            strata: Strata::around(spot, params.n_strata()),
            allocation: params.stratum_allocation(),
            n_trajectories: params.n_trajectories(),
            n_points: params.horizon_steps(),
            seed: params.seed(),
        })
    }

    /// The starting-price partition.
    #[inline]
    pub fn strata(&self) -> &Strata {
        &self.strata
    }

    /// Stratum trajectory `row` starts in.
    pub fn stratum_for(&self, row: usize) -> usize {
        match self.allocation {
            StratumAllocation::Reference => self.strata.index_of(self.gbm.spot),
            StratumAllocation::Proportional => row % self.strata.count(),
        }
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
            strata = self.strata.count(),
            allocation = %self.allocation,
            "generating stratified GBM paths"
        );
        let shocks = draw_shocks(rng, self.n_trajectories, self.n_points);
        let mut starts = vec![0.0; self.n_trajectories];
        rng.fill_uniform(&mut starts);
        for (row, start) in starts.iter_mut().enumerate() {
            let (low, high) = self.strata.bounds(self.stratum_for(row));
            *start = low + (high - low) * *start;
        }
        build_paths(&self.gbm, &starts, &shocks, self.n_points)
    }
}
