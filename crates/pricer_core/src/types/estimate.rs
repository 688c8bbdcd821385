//! Uniform engine result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price estimate returned by every engine.
///
/// Deterministic engines leave `stderr` empty; Monte Carlo engines
/// populate it with the standard error of the path-level estimator.
///
/// # Examples
/// ```
/// use pricer_core::types::PriceEstimate;
///
/// let mc = PriceEstimate::with_stderr(10.5, 0.05);
/// assert!((mc.confidence_95() - 0.098).abs() < 1e-12);
///
/// let exact = PriceEstimate::exact(10.4);
/// assert_eq!(exact.confidence_95(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Present value
    pub value: f64,
    /// Standard error, if the engine is statistical
    pub stderr: Option<f64>,
}

impl PriceEstimate {
    /// Estimate without sampling error.
    #[inline]
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            stderr: None,
        }
    }

    /// Estimate with a standard error.
    #[inline]
    pub fn with_stderr(value: f64, stderr: f64) -> Self {
        Self {
            value,
            stderr: Some(stderr),
        }
    }

    /// Standard error, zero for deterministic engines.
    #[inline]
    pub fn stderr_or_zero(&self) -> f64 {
        self.stderr.unwrap_or(0.0)
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.stderr_or_zero()
    }
}

impl fmt::Display for PriceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stderr {
            Some(se) => write!(f, "{:.6} ± {:.6}", self.value, se),
            None => write!(f, "{:.6}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PriceEstimate::exact(1.5).to_string(), "1.500000");
        assert_eq!(
            PriceEstimate::with_stderr(1.5, 0.25).to_string(),
            "1.500000 ± 0.250000"
        );
    }

    #[test]
    fn test_stderr_or_zero() {
        assert_eq!(PriceEstimate::exact(3.0).stderr_or_zero(), 0.0);
        assert_eq!(PriceEstimate::with_stderr(3.0, 0.1).stderr_or_zero(), 0.1);
    }
}
