//! European call on the terminal price.

use super::payoff::positive_part;
use super::{PathDependentPayoff, PathObserver};
use num_traits::Float;

/// Vanilla call payoff: `max(S_T - K, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VanillaCallPayoff<T: Float> {
    strike: T,
}

impl<T: Float> VanillaCallPayoff<T> {
    /// Creates a call struck at `strike`.
    #[inline]
    pub fn new(strike: T) -> Self {
        Self { strike }
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for VanillaCallPayoff<T> {
    #[inline]
    fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
        Some(positive_part(observer.terminal() - self.strike))
    }
}
