//! Uniform engine interface.
//!
//! Every engine prices a [`ContractSpec`] over a [`TimeSpec`] and returns a
//! [`PriceEstimate`], so results can be compared directly by the sanity
//! layer. Engines are stateless values; each call is independent.

use pricer_core::types::{ContractSpec, PriceEstimate, PricingError, TimeSpec};
use pricer_models::analytical::black76_price;
use pricer_models::instruments::ExerciseStyle;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lattice::{price_binomial, price_richardson, RichardsonPairing};
use crate::lsm::{price_lsm, LsmConfig};

/// Identifier of a pricing engine in sanity-check result maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineId {
    /// Black-76 closed form (European reference)
    Black76,
    /// CRR binomial lattice with European exercise
    #[serde(rename = "binomial-european")]
    BinomialEuropean,
    /// CRR binomial lattice
    Binomial,
    /// Richardson-extrapolated lattice
    Richardson,
    /// Longstaff-Schwartz Monte Carlo
    Lsm,
    /// External closed-form American approximation
    Oracle,
}

impl EngineId {
    /// Returns true for engines that value early exercise.
    #[inline]
    pub fn is_american(&self) -> bool {
        !matches!(self, EngineId::Black76 | EngineId::BinomialEuropean)
    }

    /// Returns true for engines whose estimates carry sampling error.
    #[inline]
    pub fn is_statistical(&self) -> bool {
        matches!(self, EngineId::Lsm)
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            EngineId::Black76 => "black76",
            EngineId::BinomialEuropean => "binomial-european",
            EngineId::Binomial => "binomial",
            EngineId::Richardson => "richardson",
            EngineId::Lsm => "lsm",
            EngineId::Oracle => "oracle",
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pricing engine.
///
/// Implementations must be pure: the same inputs always give the same
/// estimate, and no state survives between calls.
///
/// # Examples
/// ```
/// use pricer_core::types::{ContractSpec, TimeSpec};
/// use pricer_pricing::engine::{BinomialEngine, Black76Engine, PricingEngine};
///
/// let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let time = TimeSpec::new(1.0, 200).unwrap();
///
/// let engines: Vec<Box<dyn PricingEngine>> =
///     vec![Box::new(Black76Engine), Box::new(BinomialEngine::default())];
/// let european = engines[0].price(&put, &time).unwrap();
/// let american = engines[1].price(&put, &time).unwrap();
/// assert!(american.value >= european.value);
/// ```
pub trait PricingEngine: Send + Sync {
    /// Engine identifier.
    fn id(&self) -> EngineId;

    /// Prices a contract over a time grid.
    fn price(&self, contract: &ContractSpec, time: &TimeSpec) -> Result<PriceEstimate, PricingError>;
}

/// Black-76 European reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Black76Engine;

impl PricingEngine for Black76Engine {
    fn id(&self) -> EngineId {
        EngineId::Black76
    }

    fn price(&self, contract: &ContractSpec, time: &TimeSpec) -> Result<PriceEstimate, PricingError> {
        black76_price(contract, time.expiry)
    }
}

/// CRR lattice.
///
/// Uses `steps` when set, otherwise the step count of the time grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinomialEngine {
    /// Step override
    pub steps: Option<usize>,
    /// Exercise style
    pub style: ExerciseStyle,
}

impl BinomialEngine {
    /// American lattice with a fixed step count.
    pub fn with_steps(steps: usize) -> Self {
        Self {
            steps: Some(steps),
            style: ExerciseStyle::American,
        }
    }

    /// Same engine with European exercise.
    pub fn european(self) -> Self {
        Self {
            style: ExerciseStyle::European,
            ..self
        }
    }
}

impl PricingEngine for BinomialEngine {
    fn id(&self) -> EngineId {
        if self.style.allows_early_exercise() {
            EngineId::Binomial
        } else {
            EngineId::BinomialEuropean
        }
    }

    fn price(&self, contract: &ContractSpec, time: &TimeSpec) -> Result<PriceEstimate, PricingError> {
        price_binomial(
            contract,
            time.expiry,
            self.steps.unwrap_or(time.steps),
            self.style,
        )
    }
}

/// Richardson-extrapolated American lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RichardsonEngine {
    /// Base step override
    pub steps: Option<usize>,
    /// Step-count pairing
    pub pairing: RichardsonPairing,
}

impl RichardsonEngine {
    /// Engine with a fixed base step count.
    pub fn with_steps(steps: usize, pairing: RichardsonPairing) -> Self {
        Self {
            steps: Some(steps),
            pairing,
        }
    }
}

impl PricingEngine for RichardsonEngine {
    fn id(&self) -> EngineId {
        EngineId::Richardson
    }

    fn price(&self, contract: &ContractSpec, time: &TimeSpec) -> Result<PriceEstimate, PricingError> {
        price_richardson(
            contract,
            time.expiry,
            self.steps.unwrap_or(time.steps),
            self.pairing,
        )
    }
}

/// Longstaff-Schwartz Monte Carlo.
///
/// Paths, steps and seed come from the configuration; only the expiry is
/// taken from the time grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LsmEngine {
    /// Simulation configuration
    pub config: LsmConfig,
}

impl LsmEngine {
    /// Engine with the given configuration.
    pub fn new(config: LsmConfig) -> Self {
        Self { config }
    }
}

impl PricingEngine for LsmEngine {
    fn id(&self) -> EngineId {
        EngineId::Lsm
    }

    fn price(&self, contract: &ContractSpec, time: &TimeSpec) -> Result<PriceEstimate, PricingError> {
        price_lsm(contract, time.expiry, &self.config)
    }
}
