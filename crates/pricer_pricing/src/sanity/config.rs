//! Sanity-layer tolerances.

use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};

/// Tolerances for the sanity checks.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `agreement_tolerance` | 0.01 | Relative tolerance for pairwise engine agreement |
/// | `vol_bump` | 0.01 | Relative volatility bump ε for the monotonicity probe |
/// | `oracle_tolerance` | 0.02 | Relative tolerance against the American oracle |
/// | `bound_slack` | 1e-9 | Slack on bounds, relative to `max(F, K)` |
/// | `stderr_multiplier` | 3.0 | Standard errors granted to Monte Carlo estimates |
///
/// # Examples
/// ```
/// use pricer_pricing::sanity::SanityConfig;
///
/// let config = SanityConfig::new().with_agreement_tolerance(0.005);
/// assert!(config.validate().is_ok());
/// assert!(SanityConfig::new().with_vol_bump(0.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    /// Relative tolerance for pairwise agreement between American engines.
    pub agreement_tolerance: f64,
    /// Relative volatility bump used by the monotonicity probe.
    pub vol_bump: f64,
    /// Relative tolerance against the registered American oracle.
    pub oracle_tolerance: f64,
    /// Slack on no-arbitrage bounds, as a fraction of `max(F, K)`.
    pub bound_slack: f64,
    /// Number of standard errors allowed for statistical estimates.
    pub stderr_multiplier: f64,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            agreement_tolerance: 0.01,
            vol_bump: 0.01,
            oracle_tolerance: 0.02,
            bound_slack: 1e-9,
            stderr_multiplier: 3.0,
        }
    }
}

impl SanityConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the agreement tolerance.
    pub fn with_agreement_tolerance(mut self, tolerance: f64) -> Self {
        self.agreement_tolerance = tolerance;
        self
    }

    /// Sets the volatility bump.
    pub fn with_vol_bump(mut self, bump: f64) -> Self {
        self.vol_bump = bump;
        self
    }

    /// Sets the oracle tolerance.
    pub fn with_oracle_tolerance(mut self, tolerance: f64) -> Self {
        self.oracle_tolerance = tolerance;
        self
    }

    /// Sets the bound slack.
    pub fn with_bound_slack(mut self, slack: f64) -> Self {
        self.bound_slack = slack;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PricingError> {
        let positive = [
            ("agreement_tolerance", self.agreement_tolerance),
            ("vol_bump", self.vol_bump),
            ("oracle_tolerance", self.oracle_tolerance),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(PricingError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("bound_slack", self.bound_slack),
            ("stderr_multiplier", self.stderr_multiplier),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PricingError::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
