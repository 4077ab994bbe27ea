//! Asian option payoff implementations.
//!
//! This module provides average-price calls that use every observed price of
//! the trajectory, initial price included:
//!
//! - **Arithmetic Asian**: `max(A - K, 0)` where `A = (1/n) Σ S_i`
//! - **Geometric Asian**: `max(G - K, 0)` where `G = exp((1/n) Σ ln S_i)`
//!
//! The geometric mean is undefined for a trajectory containing a zero or
//! negative price (possible for antithetic mirrors); such trajectories pay 0.

use super::payoff::positive_part;
use super::{PathDependentPayoff, PathObserver};
use num_traits::Float;

/// Arithmetic average-price call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianArithmeticPayoff<T: Float> {
    strike: T,
}

impl<T: Float> AsianArithmeticPayoff<T> {
    /// Creates a new arithmetic Asian call.
    #[inline]
    pub fn new(strike: T) -> Self {
        Self { strike }
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for AsianArithmeticPayoff<T> {
    #[inline]
    fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
        Some(positive_part(observer.arithmetic_average() - self.strike))
    }
}

/// Geometric average-price call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianGeometricPayoff<T: Float> {
    strike: T,
}

impl<T: Float> AsianGeometricPayoff<T> {
    /// Creates a new geometric Asian call.
    #[inline]
    pub fn new(strike: T) -> Self {
        Self { strike }
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for AsianGeometricPayoff<T> {
    #[inline]
    fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
        let payoff = match observer.geometric_average() {
            Some(average) => positive_part(average - self.strike),
            None => T::zero(),
        };
        Some(payoff)
    }
}
