//! Option catalogue and enum-based payoff dispatch.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use pricer_core::types::PricingError;

use super::{
    AsianArithmeticPayoff, AsianGeometricPayoff, BarrierPayoff, BarrierType, LookbackPayoff,
    OptionParameters, PathDependentPayoff, PathObserver, VanillaCallPayoff,
};

/// The six priced option structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionType {
    /// European call on the terminal price.
    Vanilla,
    /// Arithmetic average-price call.
    AsianArithmetic,
    /// Geometric average-price call.
    AsianGeometric,
    /// Up-and-in barrier call.
    KnockIn,
    /// Up-and-out barrier call.
    KnockOut,
    /// Floating-strike lookback call.
    Lookback,
}

impl OptionType {
    /// All option types, in table order.
    pub const ALL: [OptionType; 6] = [
        OptionType::Vanilla,
        OptionType::AsianArithmetic,
        OptionType::AsianGeometric,
        OptionType::KnockIn,
        OptionType::KnockOut,
        OptionType::Lookback,
    ];

    /// Snake-case identifier used in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Vanilla => "vanilla",
            OptionType::AsianArithmetic => "asian_arithmetic",
            OptionType::AsianGeometric => "asian_geometric",
            OptionType::KnockIn => "knock_in",
            OptionType::KnockOut => "knock_out",
            OptionType::Lookback => "lookback",
        }
    }

    /// Row heading in result tables.
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Vanilla => "Vanilla",
            OptionType::AsianArithmetic => "Asian arithmetic",
            OptionType::AsianGeometric => "Asian geometric",
            OptionType::KnockIn => "Knock-in",
            OptionType::KnockOut => "Knock-out",
            OptionType::Lookback => "Lookback",
        }
    }

    /// `true` for the two barrier options, whose payoff vectors may be sparse.
    #[inline]
    pub fn is_barrier(&self) -> bool {
        matches!(self, OptionType::KnockIn | OptionType::KnockOut)
    }

    /// Concrete payoff with levels anchored on the reference price `s0`.
    pub fn payoff<T: Float>(&self, params: &OptionParameters, s0: T) -> PathPayoffType<T> {
        let level = |multiplier: f64| s0 * T::from(multiplier).unwrap_or_else(T::nan);
        let strike = level(params.strike_multiplier());
        match self {
            OptionType::Vanilla => PathPayoffType::Vanilla(VanillaCallPayoff::new(strike)),
            OptionType::AsianArithmetic => {
                PathPayoffType::AsianArithmetic(AsianArithmeticPayoff::new(strike))
            }
            OptionType::AsianGeometric => {
                PathPayoffType::AsianGeometric(AsianGeometricPayoff::new(strike))
            }
            OptionType::KnockIn => PathPayoffType::Barrier(BarrierPayoff::new(
                strike,
                level(params.knock_in_barrier_multiplier()),
                BarrierType::KnockIn,
            )),
            OptionType::KnockOut => PathPayoffType::Barrier(BarrierPayoff::new(
                strike,
                level(params.knock_out_barrier_multiplier()),
                BarrierType::KnockOut,
            )),
            OptionType::Lookback => PathPayoffType::Lookback(LookbackPayoff::new()),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace(&['-', ' '][..], "_");
        OptionType::ALL
            .into_iter()
            .find(|option| option.as_str() == normalised)
            .ok_or_else(|| PricingError::invalid("option", format!("unknown option type '{}'", s)))
    }
}

/// Static dispatch over the concrete payoffs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathPayoffType<T: Float> {
    /// Vanilla call.
    Vanilla(VanillaCallPayoff<T>),
    /// Arithmetic Asian call.
    AsianArithmetic(AsianArithmeticPayoff<T>),
    /// Geometric Asian call.
    AsianGeometric(AsianGeometricPayoff<T>),
    /// Knock-in or knock-out barrier call.
    Barrier(BarrierPayoff<T>),
    /// Floating-strike lookback call.
    Lookback(LookbackPayoff),
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for PathPayoffType<T> {
    #[inline]
    fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
        match self {
            PathPayoffType::Vanilla(p) => p.compute(observer),
            PathPayoffType::AsianArithmetic(p) => p.compute(observer),
            PathPayoffType::AsianGeometric(p) => p.compute(observer),
            PathPayoffType::Barrier(p) => p.compute(observer),
            PathPayoffType::Lookback(p) => p.compute(observer),
        }
    }
}
