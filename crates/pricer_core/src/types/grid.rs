//! Time discretisation shared by the lattice and Monte Carlo engines.

use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Year fraction to expiry and recommended step count.
///
/// Produced once per valuation/expiry/calendar triple by
/// [`TimeGrid`](crate::time_grid::TimeGrid). Engines read it and may pick
/// their own step refinement of the same `expiry` through [`TimeSpec::refine`].
///
/// # Examples
/// ```
/// use pricer_core::types::TimeSpec;
///
/// let spec = TimeSpec::new(0.25, 1200).unwrap();
/// assert!((spec.dt() - 0.25 / 1200.0).abs() < 1e-18);
///
/// let coarse = spec.refine(120).unwrap();
/// assert_eq!(coarse.expiry, spec.expiry);
/// assert_eq!(coarse.steps, 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpec {
    /// Year fraction to expiry (T >= 0)
    pub expiry: f64,
    /// Number of time steps (>= 1)
    pub steps: usize,
}

impl TimeSpec {
    /// Creates a validated time specification.
    ///
    /// # Errors
    /// - `PricingError::InvalidExpiry` if `expiry` is negative or not finite
    /// - `PricingError::InvalidStepCount` if `steps == 0`
    pub fn new(expiry: f64, steps: usize) -> Result<Self, PricingError> {
        validate_expiry(expiry)?;
        validate_steps(steps)?;
        Ok(Self { expiry, steps })
    }

    /// Same expiry with a different step count.
    pub fn refine(&self, steps: usize) -> Result<Self, PricingError> {
        Self::new(self.expiry, steps)
    }

    /// Step length `T / steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.expiry / self.steps as f64
    }

    /// True when the contract has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expiry == 0.0
    }
}

/// Rejects negative or non-finite year fractions.
#[inline]
pub fn validate_expiry(expiry: f64) -> Result<(), PricingError> {
    if expiry >= 0.0 && expiry.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidExpiry(expiry))
    }
}

/// Rejects zero step counts.
#[inline]
pub fn validate_steps(steps: usize) -> Result<(), PricingError> {
    if steps >= 1 {
        Ok(())
    } else {
        Err(PricingError::InvalidStepCount(steps))
    }
}
