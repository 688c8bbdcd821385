//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: the single error taxonomy shared by every pricing engine
//! - `DateError`: Errors from date construction and parsing
//!
//! Every variant is an input-validation or numerical-degeneracy condition.
//! They are detected before the bulk of a computation runs and are
//! deterministic given the same inputs, so none of them is retried.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidDateRange`: expiry is not strictly after valuation
/// - `UnknownCalendar`: calendar identifier is not registered
/// - `InvalidVolatility`: non-positive volatility with time remaining
/// - `InvalidStepCount`: fewer than one time step
/// - `InvalidPathCount`: fewer than one Monte Carlo path
/// - `DegenerateLattice`: up and down factors are numerically equal
/// - `RegressionSingularity`: too few in-the-money paths to fit the basis
/// - `InvalidContract`: non-positive forward/strike or non-finite rate
/// - `InvalidExpiry`: negative or non-finite year fraction
/// - `Config`: configuration failed validation
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidStepCount(0);
/// assert_eq!(format!("{}", err), "Invalid step count 0: must be at least 1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Expiry date on or before valuation date.
    #[error("Invalid date range: expiry {expiry} must be after valuation {valuation}")]
    InvalidDateRange {
        /// Valuation date (ISO 8601)
        valuation: String,
        /// Expiry date (ISO 8601)
        expiry: String,
    },

    /// Calendar identifier not present in the registry.
    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),

    /// Volatility is not strictly positive.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Step count below one.
    #[error("Invalid step count {0}: must be at least 1")]
    InvalidStepCount(usize),

    /// Path count below one.
    #[error("Invalid path count {0}: must be at least 1")]
    InvalidPathCount(usize),

    /// Up and down factors cannot be told apart, so the branch probability is undefined.
    #[error("Degenerate lattice: u = {up}, d = {down}")]
    DegenerateLattice {
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
    },

    /// Regression at an exercise date has fewer points than degrees of freedom.
    ///
    /// The LSM engine records this and falls back to the mean continuation
    /// value; it is never returned from a pricing call.
    #[error(
        "Regression singularity at step {step}: {itm_paths} in-the-money paths for {basis_dim} basis functions"
    )]
    RegressionSingularity {
        /// Exercise date index
        step: usize,
        /// Number of in-the-money paths at that date
        itm_paths: usize,
        /// Number of basis functions
        basis_dim: usize,
    },

    /// Contract field outside its domain.
    #[error("Invalid contract: {field} = {value}")]
    InvalidContract {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Year fraction negative or non-finite.
    #[error("Invalid expiry: T = {0}")]
    InvalidExpiry(f64),

    /// Configuration validation failure.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PricingError {
    /// Returns true for the recoverable regression condition.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PricingError::RegressionSingularity { .. })
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_display() {
        let err = PricingError::InvalidDateRange {
            valuation: "2024-06-01".to_string(),
            expiry: "2024-05-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: expiry 2024-05-01 must be after valuation 2024-06-01"
        );
    }

    #[test]
    fn test_unknown_calendar_display() {
        let err = PricingError::UnknownCalendar("MARS".to_string());
        assert_eq!(err.to_string(), "Unknown calendar: MARS");
    }

    #[test]
    fn test_volatility_display() {
        let err = PricingError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(err.to_string(), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_counts_display() {
        assert!(PricingError::InvalidStepCount(0)
            .to_string()
            .contains("step count 0"));
        assert!(PricingError::InvalidPathCount(0)
            .to_string()
            .contains("path count 0"));
    }

    #[test]
    fn test_only_regression_singularity_is_recoverable() {
        let singular = PricingError::RegressionSingularity {
            step: 3,
            itm_paths: 2,
            basis_dim: 3,
        };
        assert!(singular.is_recoverable());
        assert!(!PricingError::InvalidStepCount(0).is_recoverable());
        assert!(!PricingError::DegenerateLattice { up: 1.0, down: 1.0 }.is_recoverable());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidExpiry(-1.0);
        let _: &dyn std::error::Error = &err;

        let err = DateError::ParseError("bad".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
