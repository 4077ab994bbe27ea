//! Error types for structured error handling.
//!
//! This module provides [`PricingError`], the single error taxonomy shared by
//! the simulation and pricing layers. Every variant is raised eagerly at the
//! boundary of the offending operation; no variant is ever recovered from by
//! substituting a default parameter value.

use thiserror::Error;

/// Convenience alias for results produced by the pricing stack.
pub type PricingResult<T> = Result<T, PricingError>;

/// Categorised pricing errors.
///
/// # Variants
/// - `InsufficientData`: Too few historical observations to estimate volatility
/// - `InvalidParameter`: A count, proportion, multiplier or input value is out of range
/// - `EmptySample`: Antithetic sampling selected zero trajectories
/// - `InsufficientSamples`: Fewer than two payoffs available for variance estimation
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InsufficientData {
///     got: 2,
///     need: 3,
///     context: "one return has no sample standard deviation",
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient data: got 2 observations, need at least 3 (one return has no sample standard deviation)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Not enough historical observations.
    #[error("Insufficient data: got {got} observations, need at least {need} ({context})")]
    InsufficientData {
        /// Number of observations provided
        got: usize,
        /// Minimum number of observations required
        need: usize,
        /// What the minimum is needed for
        context: &'static str,
    },

    /// Parameter outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the violated constraint
        reason: String,
    },

    /// Sampling proportion produced an empty sample.
    #[error("Empty sample: proportion {proportion} of {population} trajectories selects none")]
    EmptySample {
        /// Configured sampling proportion
        proportion: f64,
        /// Number of trajectories available for sampling
        population: usize,
    },

    /// Too few payoffs to estimate a variance.
    #[error("Insufficient samples: got {got}, need at least 2")]
    InsufficientSamples {
        /// Number of payoffs available
        got: usize,
    },
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
