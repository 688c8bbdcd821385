//! Futures option contract terms.
//!
//! [`ContractSpec`] is the immutable value object every engine prices.
//! It carries no time information; the year fraction and step grid
//! live in [`TimeSpec`](super::grid::TimeSpec).

use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::PricingError;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy the futures contract at the strike.
    Call,
    /// Right to sell the futures contract at the strike.
    Put,
}

impl OptionType {
    /// Maps the boolean flag used by the primitive pricing surface.
    #[inline]
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    /// Returns true for calls.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Immediate exercise value `max(F-K, 0)` or `max(K-F, 0)`.
///
/// # Examples
/// ```
/// use pricer_core::types::intrinsic_value;
///
/// assert_eq!(intrinsic_value(110.0_f64, 100.0, true), 10.0);
/// assert_eq!(intrinsic_value(110.0_f64, 100.0, false), 0.0);
/// ```
#[inline]
pub fn intrinsic_value<T: Float>(forward: T, strike: T, is_call: bool) -> T {
    let payoff = if is_call {
        forward - strike
    } else {
        strike - forward
    };
    payoff.max(T::zero())
}

/// Option on a futures price.
///
/// # Invariants
/// `forward > 0`, `strike > 0`, `volatility > 0`, `rate` finite.
/// [`ContractSpec::new`] enforces them; the struct fields stay public so
/// probes can build bumped copies through [`ContractSpec::with_volatility`].
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
///
/// let spec = ContractSpec::new(5000.0, 5000.0, 0.04, 0.20, true).unwrap();
/// assert_eq!(spec.intrinsic(), 0.0);
///
/// assert!(ContractSpec::new(-1.0, 100.0, 0.0, 0.2, true).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractSpec {
    /// Futures price (F)
    pub forward: f64,
    /// Strike (K)
    pub strike: f64,
    /// Continuously-compounded risk-free rate (r)
    pub rate: f64,
    /// Annualised volatility (σ)
    pub volatility: f64,
    /// Call if true, put otherwise
    pub is_call: bool,
}

impl ContractSpec {
    /// Creates a validated contract.
    ///
    /// # Errors
    /// - `PricingError::InvalidContract` if forward or strike is not a positive finite number,
    ///   or the rate is not finite
    /// - `PricingError::InvalidVolatility` if volatility is not positive
    pub fn new(
        forward: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        is_call: bool,
    ) -> Result<Self, PricingError> {
        let spec = Self {
            forward,
            strike,
            rate,
            volatility,
            is_call,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks the contract invariants.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.validate_terms()?;
        if !(self.volatility > 0.0 && self.volatility.is_finite()) {
            return Err(PricingError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        Ok(())
    }

    /// Checks forward, strike and rate only.
    ///
    /// Expired contracts are priced at intrinsic without reference to
    /// volatility, so engines validate volatility separately once `T > 0`.
    pub fn validate_terms(&self) -> Result<(), PricingError> {
        if !(self.forward > 0.0 && self.forward.is_finite()) {
            return Err(PricingError::InvalidContract {
                field: "forward",
                value: self.forward,
            });
        }
        if !(self.strike > 0.0 && self.strike.is_finite()) {
            return Err(PricingError::InvalidContract {
                field: "strike",
                value: self.strike,
            });
        }
        if !self.rate.is_finite() {
            return Err(PricingError::InvalidContract {
                field: "rate",
                value: self.rate,
            });
        }
        Ok(())
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        OptionType::from_is_call(self.is_call)
    }

    /// Intrinsic value at the current futures price.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.payoff(self.forward)
    }

    /// Exercise value at an arbitrary futures level.
    #[inline]
    pub fn payoff(&self, forward: f64) -> f64 {
        intrinsic_value(forward, self.strike, self.is_call)
    }

    /// Copy with a different volatility.
    #[inline]
    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    /// Copy with the other option type.
    #[inline]
    pub fn with_is_call(&self, is_call: bool) -> Self {
        Self { is_call, ..*self }
    }
}
