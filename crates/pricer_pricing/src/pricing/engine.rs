//! Aggregation of payoffs into result tables.

use std::collections::BTreeMap;

use pricer_core::types::{PricingError, PricingResult};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::mc::{PathMatrix, SimulationMethod};
use crate::path_dependent::{OptionParameters, OptionType, PayoffEngine};

use super::{PayoffStore, PriceEstimate, ResultTable};

/// Prices every option over every simulated matrix.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SimulationEngine, SimulationParameters};
/// use pricer_pricing::path_dependent::{OptionParameters, OptionType};
/// use pricer_pricing::pricing::{InMemoryPayoffStore, PricingEngine};
///
/// let params = SimulationParameters::builder()
///     .rate(0.03)
///     .horizon(0.05)
///     .n_trajectories(500)
///     .seed(42)
///     .build()
///     .unwrap();
/// let discount = params.discount_factor();
/// let matrices = SimulationEngine::new(100.0, 0.2, params).run().unwrap();
///
/// let engine = PricingEngine::new(OptionParameters::new(1.0, 1.2, 1.2).unwrap(), discount).unwrap();
/// let store = InMemoryPayoffStore::new();
/// let table = engine.price_all(&matrices, &store).unwrap();
///
/// assert_eq!(table.len(), 18);
/// assert_eq!(store.len(), 18);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingEngine {
    params: OptionParameters,
    discount: f64,
}

impl PricingEngine {
    /// Creates an engine discounting every payoff by `discount`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if `discount` is not positive and
    /// finite.
    pub fn new(params: OptionParameters, discount: f64) -> PricingResult<Self> {
        if !(discount.is_finite() && discount > 0.0) {
            return Err(PricingError::invalid(
                "discount_factor",
                format!("must be positive and finite, got {}", discount),
            ));
        }
        Ok(Self { params, discount })
    }

    /// Option parameters.
    #[inline]
    pub fn params(&self) -> &OptionParameters {
        &self.params
    }

    /// Discount factor applied to every payoff.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Estimate for a single option over a single matrix.
    pub fn price(&self, matrix: &PathMatrix, option: OptionType) -> PricingResult<PriceEstimate> {
        let payoffs = PayoffEngine::compute(matrix, option, &self.params, self.discount)?;
        PriceEstimate::from_payoffs(&payoffs)
    }

    /// Prices every (method, option) pair, storing each payoff vector.
    ///
    /// Pairs are independent and evaluated in parallel.
    pub fn price_all<S: PayoffStore>(
        &self,
        matrices: &BTreeMap<SimulationMethod, PathMatrix>,
        store: &S,
    ) -> Result<ResultTable, S::Error> {
        let pairs: Vec<(SimulationMethod, OptionType)> = matrices
            .keys()
            .flat_map(|&method| OptionType::ALL.into_iter().map(move |option| (method, option)))
            .collect();

        let cells: Vec<(SimulationMethod, OptionType, PriceEstimate)> = pairs
            .into_par_iter()
            .map(|(method, option)| -> Result<_, S::Error> {
                let matrix = &matrices[&method];
                let payoffs = PayoffEngine::compute(matrix, option, &self.params, self.discount)?;
                store.store(method, option, &payoffs)?;
                let estimate = PriceEstimate::from_payoffs(&payoffs)?;
                debug!(
                    method = %method,
                    option = %option,
                    price = estimate.mean,
                    "option priced"
                );
                Ok((method, option, estimate))
            })
            .collect::<Result<_, _>>()?;

        let table = collect_table(cells);
        info!(
            methods = matrices.len(),
            cells = table.len(),
            "pricing complete"
        );
        Ok(table)
    }

    /// Recomputes estimates from previously stored payoff vectors.
    ///
    /// # Errors
    ///
    /// The store's error, or [`PricingError::InvalidParameter`] when a
    /// requested vector was never stored.
    pub fn estimate_from_store<S: PayoffStore>(
        store: &S,
        methods: &[SimulationMethod],
        options: &[OptionType],
    ) -> Result<ResultTable, S::Error> {
        let mut cells = Vec::with_capacity(methods.len() * options.len());
        for &method in methods {
            for &option in options {
                let payoffs = store.load(method, option)?.ok_or_else(|| {
                    PricingError::invalid(
                        "payoffs",
                        format!("no stored payoffs for {} {}", method, option),
                    )
                })?;
                cells.push((method, option, PriceEstimate::from_payoffs(&payoffs)?));
            }
        }
        Ok(collect_table(cells))
    }
}

fn collect_table(cells: Vec<(SimulationMethod, OptionType, PriceEstimate)>) -> ResultTable {
    let mut table = ResultTable::new();
    for (method, option, estimate) in cells {
        table.insert(option, method, estimate);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::InMemoryPayoffStore;

    fn matrices() -> BTreeMap<SimulationMethod, PathMatrix> {
        let naive = PathMatrix::from_rows(vec![
            vec![100.0, 110.0, 125.0, 118.0],
            vec![100.0, 95.0, 90.0, 85.0],
            vec![100.0, 105.0, 115.0, 120.0],
        ])
        .unwrap();
        BTreeMap::from([(SimulationMethod::Naive, naive)])
    }

    fn engine() -> PricingEngine {
        PricingEngine::new(OptionParameters::new(1.0, 1.2, 1.2).unwrap(), 1.0).unwrap()
    }

    #[test]
    fn test_price_all_fills_table_and_store() {
        let store = InMemoryPayoffStore::new();
        let table = engine().price_all(&matrices(), &store).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(store.len(), 6);

        let vanilla = table.get(OptionType::Vanilla, SimulationMethod::Naive).unwrap();
        assert_eq!(vanilla.mean, (18.0 + 0.0 + 20.0) / 3.0);
        // Knock-in: only row 0 is active, the other rows count as zero
        let knock_in = table.get(OptionType::KnockIn, SimulationMethod::Naive).unwrap();
        assert_eq!(knock_in.mean, 6.0);
        assert_eq!(knock_in.n, 3);
    }

    #[test]
    fn test_barrier_prices_sum_to_vanilla() {
        let store = InMemoryPayoffStore::new();
        let table = engine().price_all(&matrices(), &store).unwrap();
        let get = |o| table.get(o, SimulationMethod::Naive).unwrap().mean;
        let sum = get(OptionType::KnockIn) + get(OptionType::KnockOut);
        assert!((sum - get(OptionType::Vanilla)).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_from_store_matches() {
        let store = InMemoryPayoffStore::new();
        let table = engine().price_all(&matrices(), &store).unwrap();
        let again = PricingEngine::estimate_from_store(
            &store,
            &[SimulationMethod::Naive],
            &OptionType::ALL,
        )
        .unwrap();
        assert_eq!(table, again);
    }

    #[test]
    fn test_estimate_from_store_missing() {
        let store = InMemoryPayoffStore::new();
        let err = PricingEngine::estimate_from_store(
            &store,
            &[SimulationMethod::Antithetic],
            &[OptionType::Vanilla],
        )
        .unwrap_err();
        assert!(err.to_string().contains("no stored payoffs"));
    }

    #[test]
    fn test_single_trajectory_is_insufficient() {
        let single = PathMatrix::from_rows(vec![vec![100.0, 101.0]]).unwrap();
        let err = engine().price(&single, OptionType::Vanilla).unwrap_err();
        assert_eq!(err, PricingError::InsufficientSamples { got: 1 });
    }

    #[test]
    fn test_rejects_bad_discount() {
        let params = OptionParameters::new(1.0, 1.2, 1.2).unwrap();
        assert!(PricingEngine::new(params, -1.0).is_err());
        assert!(PricingEngine::new(params, f64::INFINITY).is_err());
    }
}
