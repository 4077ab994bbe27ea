//! Property tests for payoffs and price estimates.

use pricer_pricing::mc::{
    PathMatrix, SimulationParameters, StratifiedSampler, StratumAllocation,
};
use pricer_pricing::path_dependent::{OptionParameters, OptionType, PayoffEngine};
use pricer_pricing::pricing::PriceEstimate;
use proptest::prelude::*;

/// Rectangular matrices with prices of either sign.
fn matrices() -> impl Strategy<Value = PathMatrix> {
    (1_usize..20, 2_usize..30).prop_flat_map(|(rows, points)| {
        prop::collection::vec(-50.0_f64..250.0, rows * points)
            .prop_map(move |data| PathMatrix::from_row_major(data, rows, points).unwrap())
    })
}

fn option_params() -> impl Strategy<Value = OptionParameters> {
    (0.5_f64..1.5, 0.8_f64..1.5, 0.8_f64..1.5)
        .prop_map(|(k, b_in, b_out)| OptionParameters::new(k, b_in, b_out).unwrap())
}

proptest! {
    #[test]
    fn reference_allocation_starts_in_upper_stratum(
        cents in 100_u32..100_000,
        half in 1_usize..8,
        seed in any::<u64>(),
    ) {
        let spot = f64::from(cents) / 100.0;
        let count = 2 * half;
        let params = SimulationParameters::builder()
            .rate(0.03)
            .horizon(0.01)
            .n_trajectories(16)
            .n_strata(count)
            .stratum_allocation(StratumAllocation::Reference)
            .seed(seed)
            .build()
            .unwrap();
        let sampler = StratifiedSampler::new(spot, 0.2, &params).unwrap();

        prop_assert_eq!(sampler.stratum_for(0), half);
        let (low, high) = sampler.strata().bounds(half);
        prop_assert_eq!(low, spot);

        let matrix = sampler.simulate().unwrap();
        for start in matrix.column(0) {
            prop_assert!(start >= low && start <= high, "start {} outside [{}, {}]", start, low, high);
        }
    }

    #[test]
    fn payoffs_are_non_negative(
        matrix in matrices(),
        params in option_params(),
        discount in 0.5_f64..1.0,
    ) {
        for option in OptionType::ALL {
            let payoffs = PayoffEngine::compute(&matrix, option, &params, discount).unwrap();
            prop_assert!(payoffs.values().iter().all(|v| *v >= 0.0 && v.is_finite()));
            prop_assert_eq!(payoffs.population(), matrix.n_trajectories());
        }
    }

    #[test]
    fn barrier_legs_partition_the_rows(
        matrix in matrices(),
        barrier in 0.8_f64..1.5,
    ) {
        let params = OptionParameters::new(1.0, barrier, barrier).unwrap();
        let knock_in = PayoffEngine::compute(&matrix, OptionType::KnockIn, &params, 1.0).unwrap();
        let knock_out = PayoffEngine::compute(&matrix, OptionType::KnockOut, &params, 1.0).unwrap();

        prop_assert!(knock_in.indices().iter().all(|i| !knock_out.indices().contains(i)));
        let mut rows: Vec<usize> = knock_in
            .indices()
            .iter()
            .chain(knock_out.indices())
            .copied()
            .collect();
        rows.sort_unstable();
        prop_assert_eq!(rows, (0..matrix.n_trajectories()).collect::<Vec<_>>());
    }

    #[test]
    fn interval_half_width_is_one_standard_error(
        samples in prop::collection::vec(0.0_f64..100.0, 2..300),
    ) {
        let estimate = PriceEstimate::from_samples(&samples).unwrap();
        let se = (estimate.sample_variance / estimate.n as f64).sqrt();
        prop_assert!((estimate.interval.width() - 2.0 * se).abs() <= 1e-9 * (1.0 + se));
        prop_assert!(estimate.interval.contains(estimate.mean));
    }

    #[test]
    fn doubling_a_sample_never_widens_the_interval(
        samples in prop::collection::vec(0.0_f64..100.0, 2..200),
    ) {
        let doubled: Vec<f64> = samples.iter().chain(samples.iter()).copied().collect();
        let single = PriceEstimate::from_samples(&samples).unwrap();
        let twice = PriceEstimate::from_samples(&doubled).unwrap();
        prop_assert!(twice.interval.width() <= single.interval.width() * (1.0 + 1e-9) + 1e-12);
    }
}
