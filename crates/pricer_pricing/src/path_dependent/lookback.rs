//! Floating-strike lookback call.
//!
//! The payoff `max(S_T - S_min, 0)` uses the path minimum, initial price
//! included, as the strike.

use super::payoff::positive_part;
use super::{PathDependentPayoff, PathObserver};
use num_traits::Float;

/// Floating-strike lookback call payoff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookbackPayoff;

impl LookbackPayoff {
    /// Creates a floating-strike lookback call.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T: Float> PathDependentPayoff<T> for LookbackPayoff {
    #[inline]
    fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
        Some(positive_part(observer.terminal() - observer.minimum()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotone_increasing_path() {
        let observer = PathObserver::from_path(&[100.0, 101.0, 104.0, 109.0]);
        assert_eq!(LookbackPayoff.compute(&observer), Some(9.0));
    }

    #[test]
    fn test_terminal_at_minimum_pays_zero() {
        let observer = PathObserver::from_path(&[100.0, 120.0, 80.0]);
        assert_eq!(LookbackPayoff.compute(&observer), Some(0.0));
    }

    #[test]
    fn test_dip_and_recover() {
        let observer = PathObserver::from_path(&[100.0, 70.0, 95.0]);
        assert_eq!(LookbackPayoff.compute(&observer), Some(25.0));
    }
}
