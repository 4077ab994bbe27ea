//! PathDependentPayoff trait.

use super::PathObserver;
use num_traits::Float;

/// Trait for payoffs computed from a trajectory's streaming statistics.
///
/// Payoffs are undiscounted. `None` means the trajectory does not contribute
/// an entry at all, as for a barrier that was never activated.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so trajectories can be evaluated in
/// parallel.
///
/// # Example
///
/// ```
/// use num_traits::Float;
/// use pricer_pricing::path_dependent::{PathDependentPayoff, PathObserver};
///
/// struct RangePayoff;
///
/// impl<T: Float> PathDependentPayoff<T> for RangePayoff {
///     fn compute(&self, observer: &PathObserver<T>) -> Option<T> {
///         Some(observer.maximum() - observer.minimum())
///     }
/// }
///
/// let observer = PathObserver::from_path(&[100.0, 90.0, 120.0]);
/// assert_eq!(RangePayoff.compute(&observer), Some(30.0));
/// ```
pub trait PathDependentPayoff<T: Float>: Send + Sync {
    /// Computes the payoff from path statistics.
    fn compute(&self, observer: &PathObserver<T>) -> Option<T>;
}

/// `max(x, 0)`.
#[inline]
pub(crate) fn positive_part<T: Float>(x: T) -> T {
    x.max(T::zero())
}
