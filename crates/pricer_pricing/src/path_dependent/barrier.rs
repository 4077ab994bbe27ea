//! Barrier option payoff implementations.
//!
//! Both barriers are up barriers monitored on the path maximum, initial price
//! included:
//!
//! - **Knock-in**: pays a vanilla call only if `max(S) > B`
//! - **Knock-out**: pays a vanilla call only if `max(S) <= B`
//!
//! For a shared barrier level the two conditions partition the trajectories.
//! A trajectory whose condition fails contributes no entry.

use super::payoff::positive_part;
use super::{PathDependentPayoff, PathObserver};
use num_traits::Float;

/// Barrier type enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierType {
    /// Activates once the path maximum exceeds the barrier.
    KnockIn,
    /// Deactivated once the path maximum exceeds the barrier.
    KnockOut,
}

impl BarrierType {
    /// Returns true if this is a knock-in barrier.
    #[inline]
    pub fn is_in(&self) -> bool {
        matches!(self, BarrierType::KnockIn)
    }

    /// Whether a path with maximum `path_max` is active against `barrier`.
    #[inline]
    pub fn is_active<T: Float>(&self, path_max: T, barrier: T) -> bool {
        match self {
            BarrierType::KnockIn => path_max > barrier,
            BarrierType::KnockOut => path_max <= barrier,
        }
    }
}

/// Barrier call payoff.
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::{
///     BarrierPayoff, BarrierType, PathDependentPayoff, PathObserver,
/// };
///
/// let observer = PathObserver::from_path(&[100.0, 125.0, 110.0]);
/// let knock_in = BarrierPayoff::new(100.0, 120.0, BarrierType::KnockIn);
/// let knock_out = BarrierPayoff::new(100.0, 120.0, BarrierType::KnockOut);
///
/// assert_eq!(knock_in.compute(&observer), Some(10.0));
/// assert_eq!(knock_out.compute(&observer), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierPayoff<T: Float> {
    strike: T,
    barrier: T,
    barrier_type: BarrierType,
}

impl<T: Float> BarrierPayoff<T> {
    /// Creates a new barrier payoff.
    #[inline]
    pub fn new(strike: T, barrier: T, barrier_type: BarrierType) -> Self {
        Self {
            strike,
            barrier,
            barrier_type,
        }
    }

    /// Barrier level.
    #[inline]
    pub fn barrier(&self) -> T {
        self.barrier
    }

    /// Barrier type.
    #[inline]
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for BarrierPayoff<T> {
    #[inline]
    fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
        if self.barrier_type.is_active(observer.maximum(), self.barrier) {
            Some(positive_part(observer.terminal() - self.strike))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knock_in_requires_strict_crossing() {
        let touching = PathObserver::from_path(&[100.0, 120.0, 115.0]);
        let payoff = BarrierPayoff::new(100.0, 120.0, BarrierType::KnockIn);
        assert_eq!(payoff.compute(&touching), None);

        let crossing = PathObserver::from_path(&[100.0, 120.5, 115.0]);
        assert_eq!(payoff.compute(&crossing), Some(15.0));
    }

    #[test]
    fn test_knock_out_keeps_touching_path() {
        let touching = PathObserver::from_path(&[100.0, 120.0, 115.0]);
        let payoff = BarrierPayoff::new(100.0, 120.0, BarrierType::KnockOut);
        assert_eq!(payoff.compute(&touching), Some(15.0));
    }

    #[test]
    fn test_active_out_of_the_money_pays_zero() {
        let observer = PathObserver::from_path(&[100.0, 130.0, 90.0]);
        let payoff = BarrierPayoff::new(100.0, 120.0, BarrierType::KnockIn);
        assert_eq!(payoff.compute(&observer), Some(0.0));
    }

    #[test]
    fn test_conditions_are_complementary() {
        for max in [90.0, 120.0, 120.0001, 200.0] {
            assert_ne!(
                BarrierType::KnockIn.is_active(max, 120.0),
                BarrierType::KnockOut.is_active(max, 120.0)
            );
        }
    }
}
