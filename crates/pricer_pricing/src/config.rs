//! Explicit pricing configuration.
//!
//! Every recognised option is a field of [`PricingConfig`]; nothing is
//! inferred from global state. Configurations load from TOML, where any
//! omitted section or field takes its default, and are validated before
//! they are handed back.
//!
//! ```toml
//! richardson_pairing = "odd-doubling"
//!
//! [time_grid]
//! calendar = "US"
//! step_floor = 1200
//!
//! [lsm]
//! paths = 40000
//! steps = 120
//! seed = 42
//! basis = { kind = "polynomial", degree = 2 }
//!
//! [sanity]
//! agreement_tolerance = 0.01
//! vol_bump = 0.01
//! ```

use pricer_core::time_grid::{TimeGrid, TimeGridConfig};
use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::{BinomialEngine, Black76Engine, LsmEngine, PricingEngine, RichardsonEngine};
use crate::lattice::RichardsonPairing;
use crate::lsm::LsmConfig;
use crate::sanity::{SanityConfig, SanityLayer};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid TOML for this schema.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its domain.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] PricingError),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(inner) => inner,
            other => PricingError::Config(other.to_string()),
        }
    }
}

/// Complete engine configuration.
///
/// # Examples
/// ```
/// use pricer_pricing::config::PricingConfig;
/// use pricer_pricing::lattice::RichardsonPairing;
///
/// let config = PricingConfig::from_toml_str(
///     r#"
///     richardson_pairing = "even-doubling"
///
///     [lsm]
///     paths = 10000
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.richardson_pairing, RichardsonPairing::EvenDoubling);
/// assert_eq!(config.lsm.paths, 10_000);
/// assert_eq!(config.lsm.steps, 120);
/// assert_eq!(config.time_grid.step_floor, 1200);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Calendar and step-floor policy
    pub time_grid: TimeGridConfig,
    /// Step pairing used by Richardson extrapolation
    pub richardson_pairing: RichardsonPairing,
    /// Longstaff-Schwartz simulation settings
    pub lsm: LsmConfig,
    /// Sanity-layer tolerances
    pub sanity: SanityConfig,
}

impl PricingConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "pricing configuration loaded");
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.time_grid.validate()?;
        self.lsm.validate()?;
        self.sanity.validate()
    }

    /// Time grid using the built-in calendars.
    pub fn time_grid(&self) -> Result<TimeGrid, PricingError> {
        TimeGrid::new(self.time_grid)
    }

    /// One engine of each kind, configured from this document.
    ///
    /// Lattice engines take their step count from the time grid.
    pub fn engines(&self) -> Vec<Box<dyn PricingEngine>> {
        vec![
            Box::new(Black76Engine),
            Box::new(BinomialEngine::default()),
            Box::new(RichardsonEngine {
                steps: None,
                pairing: self.richardson_pairing,
            }),
            Box::new(LsmEngine::new(self.lsm)),
        ]
    }

    /// Sanity layer with these tolerances and the default probes.
    pub fn sanity_layer(&self) -> SanityLayer {
        SanityLayer::new(self.sanity)
    }
}
