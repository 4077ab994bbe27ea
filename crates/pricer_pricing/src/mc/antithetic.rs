//! Antithetic variates.
//!
//! A random subset of naive trajectories is paired with its reflection about
//! each trajectory's own initial price:
//!
//! ```text
//! S'(t) = 2 × S(0) - S(t)
//! ```
//!
//! Reflections are left unclamped so that `S(t) + S'(t) == 2 × S(0)` holds
//! for every step. Extreme paths can therefore mirror to non-positive prices.

use pricer_core::types::{PricingError, PricingResult};
use tracing::debug;

use super::config::SimulationParameters;
use super::matrix::PathMatrix;
use crate::rng::PricerRng;

/// Builds antithetic batches from a naive path matrix.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{AntitheticSampler, PathMatrix};
///
/// let naive = PathMatrix::from_rows(vec![
///     vec![100.0, 110.0],
///     vec![100.0, 95.0],
/// ])
/// .unwrap();
///
/// let sampler = AntitheticSampler::new(1.0, Some(3)).unwrap();
/// let out = sampler.sample(&naive).unwrap();
/// assert_eq!(out.n_trajectories(), 4);
/// for row in 0..2 {
///     let mirror = out.trajectory(row + 2);
///     assert_eq!(out.trajectory(row)[1] + mirror[1], 200.0);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AntitheticSampler {
    proportion: f64,
    seed: Option<u64>,
}

impl AntitheticSampler {
    /// Creates a sampler mirroring `floor(n × proportion)` trajectories.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] unless `0 < proportion <= 1`.
    pub fn new(proportion: f64, seed: Option<u64>) -> PricingResult<Self> {
        if !proportion.is_finite() || proportion <= 0.0 || proportion > 1.0 {
            return Err(PricingError::invalid(
                "antithetic_proportion",
                format!("must be in (0, 1], got {}", proportion),
            ));
        }
        Ok(Self { proportion, seed })
    }

    /// Sampler configured from validated simulation parameters.
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self {
            proportion: params.antithetic_proportion(),
            seed: params.seed(),
        }
    }

    /// Fraction of trajectories sampled.
    #[inline]
    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    /// Number of originals drawn from a population of `n` trajectories.
    #[inline]
    pub fn sample_size(&self, n: usize) -> usize {
        (n as f64 * self.proportion).floor() as usize
    }

    /// Samples with a generator built from the configured seed (or entropy).
    ///
    /// # Errors
    ///
    /// [`PricingError::EmptySample`] when `floor(n × proportion)` is zero.
    pub fn sample(&self, naive: &PathMatrix) -> PricingResult<PathMatrix> {
        let mut rng = PricerRng::from_optional_seed(self.seed);
        self.sample_with(naive, &mut rng)
    }

    /// Samples using the supplied generator.
    ///
    /// The output holds the `k` sampled originals in sampling order, followed
    /// by their mirrors in the same order.
    pub fn sample_with(&self, naive: &PathMatrix, rng: &mut PricerRng) -> PricingResult<PathMatrix> {
        let population = naive.n_trajectories();
        let k = self.sample_size(population);
        if k == 0 {
            return Err(PricingError::EmptySample {
                proportion: self.proportion,
                population,
            });
        }

        let picked = rng.sample_indices(population, k);
        debug!(population, sampled = k, "drawing antithetic pairs");

        let n_points = naive.n_points();
        let mut values = Vec::with_capacity(2 * k * n_points);
        for &row in &picked {
            values.extend_from_slice(naive.trajectory(row));
        }
        for &row in &picked {
            let path = naive.trajectory(row);
            let twice_start = 2.0 * path[0];
            values.extend(path.iter().map(|s| twice_start - s));
        }

        PathMatrix::from_row_major(values, 2 * k, n_points)
    }
}
