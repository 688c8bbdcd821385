//! Longstaff-Schwartz simulation configuration.
//!
//! This module provides [`LsmConfig`] and its builder. Configurations are
//! plain values: the seed is explicit, and nothing is read from ambient
//! state.

use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};

use super::basis::RegressionBasis;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of stored path points `paths × (steps + 1)` (2 GB of `f64`).
pub const MAX_PATH_POINTS: usize = 250_000_000;

/// Longstaff-Schwartz configuration.
///
/// Use [`LsmConfigBuilder`] to construct validated instances, or deserialise
/// from TOML and call [`validate`](Self::validate).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsm::LsmConfig;
///
/// let config = LsmConfig::builder()
///     .paths(40_000)
///     .steps(120)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.paths, 40_000);
/// assert_eq!(config.basis.dim(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsmConfig {
    /// Number of simulated paths.
    pub paths: usize,
    /// Number of time steps per path (exercise dates are steps `1..steps`).
    pub steps: usize,
    /// Seed of the path generator.
    pub seed: u64,
    /// Continuation-value regression basis.
    pub basis: RegressionBasis,
}

impl Default for LsmConfig {
    fn default() -> Self {
        Self {
            paths: 40_000,
            steps: 120,
            seed: 42,
            basis: RegressionBasis::default(),
        }
    }
}

impl LsmConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LsmConfigBuilder {
        LsmConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidStepCount` if `steps` is 0 or greater than 10,000
    /// - `PricingError::InvalidPathCount` if `paths` is 0 or greater than 10,000,000
    /// - `PricingError::Config` if the path bundle would exceed
    ///   [`MAX_PATH_POINTS`], or for an unsupported basis
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(PricingError::InvalidStepCount(self.steps));
        }
        if self.paths == 0 || self.paths > MAX_PATHS {
            return Err(PricingError::InvalidPathCount(self.paths));
        }
        let points = self.paths.saturating_mul(self.steps + 1);
        if points > MAX_PATH_POINTS {
            return Err(PricingError::Config(format!(
                "{} paths of {} steps need {} points, limit is {}",
                self.paths, self.steps, points, MAX_PATH_POINTS
            )));
        }
        self.basis.validate()
    }
}

/// Builder for [`LsmConfig`].
///
/// Paths and steps must be set explicitly; the seed defaults to 42 and the
/// basis to a quadratic polynomial.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsm::{LsmConfig, RegressionBasis};
///
/// let config = LsmConfig::builder()
///     .paths(10_000)
///     .steps(50)
///     .basis(RegressionBasis::Polynomial { degree: 3 })
///     .build()
///     .unwrap();
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LsmConfigBuilder {
    paths: Option<usize>,
    steps: Option<usize>,
    seed: Option<u64>,
    basis: Option<RegressionBasis>,
}

impl LsmConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn paths(mut self, paths: usize) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the regression basis.
    #[inline]
    pub fn basis(mut self, basis: RegressionBasis) -> Self {
        self.basis = Some(basis);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - `PricingError::Config` if `paths` or `steps` was not set
    /// - any error of [`LsmConfig::validate`]
    pub fn build(self) -> Result<LsmConfig, PricingError> {
        let defaults = LsmConfig::default();
        let config = LsmConfig {
            paths: self
                .paths
                .ok_or_else(|| PricingError::Config("paths must be specified".to_string()))?,
            steps: self
                .steps
                .ok_or_else(|| PricingError::Config("steps must be specified".to_string()))?,
            seed: self.seed.unwrap_or(defaults.seed),
            basis: self.basis.unwrap_or(defaults.basis),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid() {
        let config = LsmConfig::builder()
            .paths(10_000)
            .steps(252)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(config.paths, 10_000);
        assert_eq!(config.steps, 252);
        assert_eq!(config.seed, 7);
        assert_eq!(config.basis, RegressionBasis::Polynomial { degree: 2 });
    }

    #[test]
    fn test_invalid_zero_paths() {
        let result = LsmConfig::builder().paths(0).steps(100).build();
        assert_eq!(result, Err(PricingError::InvalidPathCount(0)));
    }

    #[test]
    fn test_invalid_zero_steps() {
        let result = LsmConfig::builder().paths(1000).steps(0).build();
        assert_eq!(result, Err(PricingError::InvalidStepCount(0)));
    }

    #[test]
    fn test_invalid_too_many_paths() {
        let result = LsmConfig::builder().paths(MAX_PATHS + 1).steps(10).build();
        assert!(matches!(result, Err(PricingError::InvalidPathCount(_))));
    }

    #[test]
    fn test_bundle_size_capped() {
        // Each count is within its own limit, the product is not
        let result = LsmConfig::builder().paths(MAX_PATHS).steps(MAX_STEPS).build();
        assert!(matches!(result, Err(PricingError::Config(msg)) if msg.contains("points")));

        let config = LsmConfig {
            paths: 1_000_000,
            steps: 249,
            ..LsmConfig::default()
        };
        assert!(config.validate().is_ok());
        let config = LsmConfig { steps: 250, ..config };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_steps() {
        let result = LsmConfig::builder().paths(1000).build();
        assert!(matches!(result, Err(PricingError::Config(msg)) if msg.contains("steps")));
    }

    #[test]
    fn test_invalid_basis() {
        let result = LsmConfig::builder()
            .paths(1000)
            .steps(10)
            .basis(RegressionBasis::Polynomial { degree: 5 })
            .build();
        assert!(matches!(result, Err(PricingError::Config(_))));
    }

    #[test]
    fn test_deserialise_partial() {
        let config: LsmConfig = toml::from_str(
            "paths = 5000\n[basis]\nkind = \"polynomial\"\ndegree = 3\n",
        )
        .unwrap();
        assert_eq!(config.paths, 5000);
        assert_eq!(config.steps, 120);
        assert_eq!(config.basis.dim(), 4);
        config.validate().unwrap();
    }
}
