//! Option contract parameters, expressed relative to the reference price.

use pricer_core::types::{PricingError, PricingResult};

/// Strike and barrier levels as multiples of the reference price S0.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::path_dependent::OptionParameters;
///
/// let params = OptionParameters::new(1.0, 1.2, 1.2).unwrap();
/// assert_eq!(params.strike(100.0), 100.0);
/// assert!(OptionParameters::new(0.0, 1.2, 1.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    strike_multiplier: f64,
    knock_in_barrier_multiplier: f64,
    knock_out_barrier_multiplier: f64,
}

impl OptionParameters {
    /// Validates and bundles the three multipliers.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if any multiplier is not positive
    /// and finite.
    pub fn new(
        strike_multiplier: f64,
        knock_in_barrier_multiplier: f64,
        knock_out_barrier_multiplier: f64,
    ) -> PricingResult<Self> {
        check_multiplier("strike_multiplier", strike_multiplier)?;
        check_multiplier("knock_in_barrier_multiplier", knock_in_barrier_multiplier)?;
        check_multiplier("knock_out_barrier_multiplier", knock_out_barrier_multiplier)?;
        Ok(Self {
            strike_multiplier,
            knock_in_barrier_multiplier,
            knock_out_barrier_multiplier,
        })
    }

    /// Strike as a multiple of S0.
    #[inline]
    pub fn strike_multiplier(&self) -> f64 {
        self.strike_multiplier
    }

    /// Knock-in barrier as a multiple of S0.
    #[inline]
    pub fn knock_in_barrier_multiplier(&self) -> f64 {
        self.knock_in_barrier_multiplier
    }

    /// Knock-out barrier as a multiple of S0.
    #[inline]
    pub fn knock_out_barrier_multiplier(&self) -> f64 {
        self.knock_out_barrier_multiplier
    }

    /// Absolute strike for reference price `s0`.
    #[inline]
    pub fn strike(&self, s0: f64) -> f64 {
        s0 * self.strike_multiplier
    }

    /// Absolute knock-in barrier for reference price `s0`.
    #[inline]
    pub fn knock_in_barrier(&self, s0: f64) -> f64 {
        s0 * self.knock_in_barrier_multiplier
    }

    /// Absolute knock-out barrier for reference price `s0`.
    #[inline]
    pub fn knock_out_barrier(&self, s0: f64) -> f64 {
        s0 * self.knock_out_barrier_multiplier
    }
}

fn check_multiplier(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_levels_scale_with_reference() {
        let params = OptionParameters::new(1.1, 1.3, 1.25).unwrap();
        assert_relative_eq!(params.strike(200.0), 220.0, epsilon = 1e-12);
        assert_relative_eq!(params.knock_in_barrier(100.0), 130.0, epsilon = 1e-12);
        assert_relative_eq!(params.knock_out_barrier(100.0), 125.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_multipliers_named() {
        let err = OptionParameters::new(1.0, -1.0, 1.2).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "knock_in_barrier_multiplier", .. }
        ));
        let err = OptionParameters::new(1.0, 1.2, f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "knock_out_barrier_multiplier", .. }
        ));
    }
}
