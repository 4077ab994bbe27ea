//! PathObserver: Streaming statistics accumulation for path-dependent options.
//!
//! Statistics are accumulated incrementally as prices are observed, so a
//! payoff never needs more than one pass over a trajectory.
//!
//! # Streaming Statistics
//!
//! - **Arithmetic average**: Running sum / count
//! - **Geometric average**: exp(running log sum / count), undefined once a
//!   non-positive price has been seen
//! - **Maximum**: Running maximum
//! - **Minimum**: Running minimum

use num_traits::Float;

/// Streaming path observation statistics.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::PathObserver;
///
/// let observer = PathObserver::from_path(&[100.0, 105.0, 110.0, 95.0]);
///
/// assert_eq!(observer.count(), 4);
/// assert_eq!(observer.maximum(), 110.0);
/// assert_eq!(observer.minimum(), 95.0);
/// assert_eq!(observer.terminal(), 95.0);
/// assert_eq!(observer.arithmetic_average(), 102.5);
/// ```
#[derive(Clone, Debug)]
pub struct PathObserver<T: Float> {
    /// Running sum for arithmetic average: Σ S_i
    running_sum: T,
    /// Running log sum for geometric average: Σ ln(S_i), positive prices only
    running_log_sum: T,
    /// Running maximum price observed
    running_max: T,
    /// Running minimum price observed
    running_min: T,
    /// Number of observations
    count: usize,
    /// Number of observations that were zero or negative
    non_positive: usize,
    /// Most recent observation
    terminal: T,
}

impl<T: Float> PathObserver<T> {
    /// Creates a new empty path observer.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_pricing::path_dependent::PathObserver;
    ///
    /// let observer: PathObserver<f64> = PathObserver::new();
    /// assert_eq!(observer.count(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: T::zero(),
            running_log_sum: T::zero(),
            running_max: T::neg_infinity(),
            running_min: T::infinity(),
            count: 0,
            non_positive: 0,
            terminal: T::zero(),
        }
    }

    /// Observes every price of `path` in order.
    pub fn from_path(path: &[T]) -> Self {
        let mut observer = Self::new();
        for &price in path {
            observer.observe(price);
        }
        observer
    }

    /// Observes a new price and updates running statistics.
    ///
    /// The observed price also becomes the terminal price.
    #[inline]
    pub fn observe(&mut self, price: T) {
        self.running_sum = self.running_sum + price;
        if price > T::zero() {
            self.running_log_sum = self.running_log_sum + price.ln();
        } else {
            self.non_positive += 1;
        }
        self.running_max = self.running_max.max(price);
        self.running_min = self.running_min.min(price);
        self.count += 1;
        self.terminal = price;
    }

    #[inline]
    fn count_as_float(&self) -> T {
        T::from(self.count).unwrap_or_else(T::nan)
    }

    /// Returns the arithmetic average of observed prices.
    ///
    /// `Σ S_i / n` if `n > 0`, otherwise `0`.
    #[inline]
    pub fn arithmetic_average(&self) -> T {
        if self.count == 0 {
            T::zero()
        } else {
            self.running_sum / self.count_as_float()
        }
    }

    /// Returns the geometric average `exp(Σ ln(S_i) / n)`.
    ///
    /// `None` when nothing was observed or any observed price was `<= 0`.
    #[inline]
    pub fn geometric_average(&self) -> Option<T> {
        if self.count == 0 || !self.all_positive() {
            None
        } else {
            Some((self.running_log_sum / self.count_as_float()).exp())
        }
    }

    /// `true` if every observed price was strictly positive.
    #[inline]
    pub fn all_positive(&self) -> bool {
        self.non_positive == 0
    }

    /// Maximum observed price, or `-inf` if no observations.
    #[inline]
    pub fn maximum(&self) -> T {
        self.running_max
    }

    /// Minimum observed price, or `+inf` if no observations.
    #[inline]
    pub fn minimum(&self) -> T {
        self.running_min
    }

    /// Returns the terminal price.
    #[inline]
    pub fn terminal(&self) -> T {
        self.terminal
    }

    /// Returns the number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<T: Float> Default for PathObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}
