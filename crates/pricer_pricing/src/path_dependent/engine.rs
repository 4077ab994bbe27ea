//! Payoff evaluation over a whole path matrix.

use pricer_core::types::{PricingError, PricingResult};
use rayon::prelude::*;
use tracing::debug;

use super::{OptionParameters, OptionType, PathDependentPayoff, PathObserver};
use crate::mc::PathMatrix;

/// Discounted payoffs of the trajectories that contributed an entry.
///
/// `indices[i]` is the matrix row that produced `values[i]`. Rows without an
/// entry (a barrier that never activated) are absent; `population` is the row
/// count of the source matrix, so the missing rows are known to pay zero.
#[derive(Clone, Debug, PartialEq)]
pub struct PayoffVector {
    values: Vec<f64>,
    indices: Vec<usize>,
    population: usize,
}

impl PayoffVector {
    /// Builds a vector from contributing rows.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if the lengths differ, an index is
    /// not strictly increasing or not below `population`, or a value is
    /// negative or non-finite.
    pub fn new(values: Vec<f64>, indices: Vec<usize>, population: usize) -> PricingResult<Self> {
        if values.len() != indices.len() {
            return Err(PricingError::invalid(
                "payoffs",
                format!(
                    "{} values but {} trajectory indices",
                    values.len(),
                    indices.len()
                ),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(PricingError::invalid(
                "payoffs",
                format!("payoff {} of trajectory {} is not a finite non-negative value", values[pos], indices[pos]),
            ));
        }
        if indices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PricingError::invalid(
                "payoffs",
                "trajectory indices must be strictly increasing",
            ));
        }
        if let Some(&last) = indices.last() {
            if last >= population {
                return Err(PricingError::invalid(
                    "payoffs",
                    format!("trajectory {} outside a population of {}", last, population),
                ));
            }
        }
        Ok(Self {
            values,
            indices,
            population,
        })
    }

    /// One entry per row, rows `0..values.len()`.
    pub fn dense(values: Vec<f64>) -> PricingResult<Self> {
        let population = values.len();
        Self::new(values, (0..population).collect(), population)
    }

    /// Discounted payoff entries.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Source row of each entry.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of trajectories in the source matrix.
    #[inline]
    pub fn population(&self) -> usize {
        self.population
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if no trajectory contributed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One value per population row, zero where no entry exists.
    pub fn to_population(&self) -> Vec<f64> {
        let mut full = vec![0.0; self.population];
        for (&row, &value) in self.indices.iter().zip(&self.values) {
            full[row] = value;
        }
        full
    }
}

/// Evaluates discounted option payoffs over path matrices.
///
/// Strike and barrier levels are anchored on the initial price of the first
/// trajectory, which for stratified matrices differs from the other rows'
/// starting prices.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathMatrix;
/// use pricer_pricing::path_dependent::{OptionParameters, OptionType, PayoffEngine};
///
/// let matrix = PathMatrix::from_rows(vec![
///     vec![100.0, 104.0, 110.0],
///     vec![100.0, 97.0, 95.0],
/// ])
/// .unwrap();
/// let params = OptionParameters::new(1.0, 1.05, 1.05).unwrap();
///
/// let vanilla = PayoffEngine::compute(&matrix, OptionType::Vanilla, &params, 1.0).unwrap();
/// assert_eq!(vanilla.values(), &[10.0, 0.0]);
///
/// let knock_in = PayoffEngine::compute(&matrix, OptionType::KnockIn, &params, 1.0).unwrap();
/// assert_eq!(knock_in.indices(), &[0]);
/// assert_eq!(knock_in.population(), 2);
/// ```
pub struct PayoffEngine;

impl PayoffEngine {
    /// Discounted payoffs of `option` over every trajectory of `matrix`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if `discount` is not positive and
    /// finite.
    pub fn compute(
        matrix: &PathMatrix,
        option: OptionType,
        params: &OptionParameters,
        discount: f64,
    ) -> PricingResult<PayoffVector> {
        if !(discount.is_finite() && discount > 0.0) {
            return Err(PricingError::invalid(
                "discount_factor",
                format!("must be positive and finite, got {}", discount),
            ));
        }
        let Some(s0) = matrix.reference_price() else {
            return PayoffVector::new(Vec::new(), Vec::new(), 0);
        };
        let payoff = option.payoff(params, s0);

        let entries: Vec<(usize, f64)> = (0..matrix.n_trajectories())
            .into_par_iter()
            .filter_map(|row| {
                let observer = PathObserver::from_path(matrix.trajectory(row));
                payoff.compute(&observer).map(|value| (row, discount * value))
            })
            .collect();
        let (indices, values): (Vec<usize>, Vec<f64>) = entries.into_iter().unzip();

        debug!(
            option = %option,
            entries = values.len(),
            population = matrix.n_trajectories(),
            "payoffs computed"
        );
        PayoffVector::new(values, indices, matrix.n_trajectories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix() -> PathMatrix {
        PathMatrix::from_rows(vec![
            vec![100.0, 110.0, 125.0, 118.0],
            vec![100.0, 95.0, 90.0, 85.0],
            vec![100.0, 105.0, 115.0, 120.0],
        ])
        .unwrap()
    }

    fn params() -> OptionParameters {
        OptionParameters::new(1.0, 1.2, 1.2).unwrap()
    }

    #[test]
    fn test_vanilla_discounted() {
        let df = (-0.05_f64).exp();
        let v = PayoffEngine::compute(&matrix(), OptionType::Vanilla, &params(), df).unwrap();
        assert_eq!(v.len(), 3);
        assert_relative_eq!(v.values()[0], 18.0 * df);
        assert_eq!(v.values()[1], 0.0);
        assert_relative_eq!(v.values()[2], 20.0 * df);
    }

    #[test]
    fn test_barrier_partition() {
        let knock_in = PayoffEngine::compute(&matrix(), OptionType::KnockIn, &params(), 1.0).unwrap();
        let knock_out = PayoffEngine::compute(&matrix(), OptionType::KnockOut, &params(), 1.0).unwrap();
        // Row 0 peaks at 125 > 120; row 2 touches 120 exactly and stays out
        assert_eq!(knock_in.indices(), &[0]);
        assert_eq!(knock_out.indices(), &[1, 2]);
        assert_eq!(knock_in.population(), 3);
        assert_eq!(knock_in.to_population(), vec![18.0, 0.0, 0.0]);
    }

    #[test]
    fn test_lookback_and_asians() {
        let m = matrix();
        let p = params();
        let lookback = PayoffEngine::compute(&m, OptionType::Lookback, &p, 1.0).unwrap();
        assert_eq!(lookback.values(), &[18.0, 0.0, 20.0]);

        let arithmetic = PayoffEngine::compute(&m, OptionType::AsianArithmetic, &p, 1.0).unwrap();
        assert_relative_eq!(arithmetic.values()[0], 13.25, epsilon = 1e-12);
        assert_eq!(arithmetic.values()[1], 0.0);

        let geometric = PayoffEngine::compute(&m, OptionType::AsianGeometric, &p, 1.0).unwrap();
        assert!(geometric.values()[0] < arithmetic.values()[0]);
    }

    #[test]
    fn test_strike_anchored_on_first_row() {
        let m = PathMatrix::from_rows(vec![vec![100.0, 100.0], vec![120.0, 110.0]]).unwrap();
        let v = PayoffEngine::compute(&m, OptionType::Vanilla, &params(), 1.0).unwrap();
        // Strike = 100 for both rows even though row 1 starts at 120
        assert_eq!(v.values(), &[0.0, 10.0]);
    }

    #[test]
    fn test_empty_matrix() {
        let v = PayoffEngine::compute(&PathMatrix::empty(3), OptionType::Vanilla, &params(), 1.0)
            .unwrap();
        assert!(v.is_empty());
        assert_eq!(v.population(), 0);
    }

    #[test]
    fn test_rejects_bad_discount() {
        assert!(PayoffEngine::compute(&matrix(), OptionType::Vanilla, &params(), 0.0).is_err());
        assert!(PayoffEngine::compute(&matrix(), OptionType::Vanilla, &params(), f64::NAN).is_err());
    }

    #[test]
    fn test_payoff_vector_validation() {
        assert!(PayoffVector::new(vec![1.0], vec![0, 1], 2).is_err());
        assert!(PayoffVector::new(vec![-1.0], vec![0], 1).is_err());
        assert!(PayoffVector::new(vec![1.0, 2.0], vec![1, 0], 2).is_err());
        assert!(PayoffVector::new(vec![1.0], vec![5], 2).is_err());
        let dense = PayoffVector::dense(vec![1.0, 2.0]).unwrap();
        assert_eq!(dense.indices(), &[0, 1]);
    }
}
