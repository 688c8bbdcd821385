//! Black-76 model for European options on futures.
//!
//! The futures price is driftless under the pricing measure, so the
//! formula is Black-Scholes with the forward in place of the spot and
//! the carry term removed.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = e^(-rT)·(F·N(d₁) - K·N(d₂))
//! **Put Price**: P = e^(-rT)·(K·N(-d₂) - F·N(-d₁))
//!
//! Where:
//! - d₁ = (ln(F/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::types::{ContractSpec, PriceEstimate, PricingError};

use super::distributions::{lit, norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Black-76 model for European futures options.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::Black76;
///
/// let model = Black76::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = model.price_call(100.0, 1.0);
/// let put = model.price_put(100.0, 1.0);
///
/// // Put-call parity on futures: C - P = e^(-rT)(F - K)
/// assert!((call - put).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Black76<T: Float> {
    /// Futures price (F)
    forward: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> Black76<T> {
    /// Creates a new Black-76 model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidForward` if forward <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(forward: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if forward.is_nan() || forward <= zero {
            return Err(AnalyticalError::InvalidForward {
                forward: forward.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility.is_nan() || volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            forward,
            rate,
            volatility,
        })
    }

    /// Returns the futures price.
    #[inline]
    pub fn forward(&self) -> T {
        self.forward
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes d₁ = (ln(F/K) + σ²T/2) / (σ√T).
    ///
    /// Requires `expiry > 0`.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        ((self.forward / strike).ln() + lit::<T>(0.5) * self.volatility * self.volatility * expiry)
            / vol_sqrt_t
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount(&self, expiry: T) -> T {
        (-self.rate * expiry).exp()
    }

    /// European call price. Returns intrinsic value at `expiry <= 0`.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.price(strike, expiry, true)
    }

    /// European put price. Returns intrinsic value at `expiry <= 0`.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.price(strike, expiry, false)
    }

    /// European price for either option type.
    ///
    /// # Arguments
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to expiration in years (T)
    /// * `is_call` - True for call, false for put
    pub fn price(&self, strike: T, expiry: T, is_call: bool) -> T {
        let zero = T::zero();
        if expiry <= zero {
            let payoff = if is_call {
                self.forward - strike
            } else {
                strike - self.forward
            };
            return payoff.max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = self.discount(expiry);

        if is_call {
            discount * (self.forward * norm_cdf(d1) - strike * norm_cdf(d2))
        } else {
            discount * (strike * norm_cdf(-d2) - self.forward * norm_cdf(-d1))
        }
    }

    /// Computes Vega (∂V/∂σ) = e^(-rT)·F·√T·φ(d₁).
    ///
    /// Identical for calls and puts; zero at expiry.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        self.discount(expiry) * self.forward * expiry.sqrt() * norm_pdf(self.d1(strike, expiry))
    }
}

/// Closed-form European value of a futures option.
///
/// At `expiry == 0` returns the intrinsic value exactly, without reference
/// to volatility.
///
/// # Errors
/// - `PricingError::InvalidContract` for non-positive forward or strike
/// - `PricingError::InvalidExpiry` for negative or non-finite `expiry`
/// - `PricingError::InvalidVolatility` when `volatility <= 0` and `expiry > 0`
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
/// use pricer_models::analytical::black76_price;
///
/// let contract = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let estimate = black76_price(&contract, 1.0).unwrap();
/// assert!((estimate.value - 9.653647626602913).abs() < 1e-10);
/// assert!(estimate.stderr.is_none());
/// ```
pub fn black76_price(contract: &ContractSpec, expiry: f64) -> Result<PriceEstimate, PricingError> {
    contract.validate_terms()?;
    pricer_core::types::validate_expiry(expiry)?;

    if expiry == 0.0 {
        return Ok(PriceEstimate::exact(contract.intrinsic()));
    }

    let model = Black76::new(contract.forward, contract.rate, contract.volatility)?;
    let value = model.price(contract.strike, expiry, contract.is_call);

    tracing::debug!(
        forward = contract.forward,
        strike = contract.strike,
        rate = contract.rate,
        volatility = contract.volatility,
        expiry,
        is_call = contract.is_call,
        value,
        "black-76 price"
    );

    Ok(PriceEstimate::exact(value))
}
