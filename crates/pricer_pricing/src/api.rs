//! Primitive-argument pricing surface.
//!
//! Thin wrappers taking plain numbers, dates and flags. Contract fields are
//! validated by the engines themselves, so an expired contract prices at
//! intrinsic value whatever the volatility.
//!
//! # Examples
//!
//! ```
//! use pricer_pricing::api;
//!
//! let european = api::price_black76(100.0, 100.0, 0.03, 0.25, 1.0, false).unwrap();
//! let american = api::price_richardson(100.0, 100.0, 0.03, 0.25, 1.0, false, 200).unwrap();
//! assert!(american.value > european.value);
//! ```

use pricer_core::time_grid::TimeGrid;
use pricer_core::types::{ContractSpec, Date, PriceEstimate, PricingError, TimeSpec};
use pricer_models::analytical::black76_price;
use pricer_models::instruments::ExerciseStyle;
use std::collections::BTreeMap;

use crate::engine::EngineId;
use crate::lattice::{self, RichardsonPairing};
use crate::lsm::{self, LsmConfig};
use crate::sanity::{SanityLayer, Violation};

fn contract(forward: f64, strike: f64, rate: f64, volatility: f64, is_call: bool) -> ContractSpec {
    ContractSpec {
        forward,
        strike,
        rate,
        volatility,
        is_call,
    }
}

/// Year fraction and step count on the built-in calendars with the default floor.
///
/// # Errors
/// - `PricingError::InvalidDateRange` if `expiry <= valuation`
/// - `PricingError::UnknownCalendar` for an unregistered identifier
pub fn time_grid(valuation: Date, expiry: Date, calendar_id: &str) -> Result<TimeSpec, PricingError> {
    TimeGrid::default().compute(valuation, expiry, calendar_id)
}

/// Black-76 European value.
pub fn price_black76(
    forward: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    is_call: bool,
) -> Result<PriceEstimate, PricingError> {
    black76_price(&contract(forward, strike, rate, volatility, is_call), expiry)
}

/// American value on a CRR lattice with `steps` steps.
pub fn price_binomial(
    forward: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    is_call: bool,
    steps: usize,
) -> Result<PriceEstimate, PricingError> {
    lattice::price_binomial(
        &contract(forward, strike, rate, volatility, is_call),
        expiry,
        steps,
        ExerciseStyle::American,
    )
}

/// Richardson-extrapolated American value with the default odd pairing.
pub fn price_richardson(
    forward: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    is_call: bool,
    steps: usize,
) -> Result<PriceEstimate, PricingError> {
    lattice::price_richardson(
        &contract(forward, strike, rate, volatility, is_call),
        expiry,
        steps,
        RichardsonPairing::default(),
    )
}

/// Longstaff-Schwartz American value with a quadratic basis.
///
/// # Errors
/// `InvalidStepCount` and `InvalidPathCount` are checked before the
/// contract terms.
#[allow(clippy::too_many_arguments)]
pub fn price_lsm(
    forward: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    is_call: bool,
    steps: usize,
    paths: usize,
    seed: u64,
) -> Result<PriceEstimate, PricingError> {
    let config = LsmConfig {
        paths,
        steps,
        seed,
        ..LsmConfig::default()
    };
    lsm::price_lsm(
        &contract(forward, strike, rate, volatility, is_call),
        expiry,
        &config,
    )
}

/// Runs the default sanity layer over a set of engine results.
///
/// # Errors
/// Fails only when the contract or time inputs are invalid; findings are
/// returned as data.
#[allow(clippy::too_many_arguments)]
pub fn sanity_checks(
    forward: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    is_call: bool,
    steps: usize,
    results: &BTreeMap<EngineId, PriceEstimate>,
) -> Result<Vec<Violation>, PricingError> {
    let contract = contract(forward, strike, rate, volatility, is_call);
    let time = TimeSpec::new(expiry, steps)?;
    if time.is_expired() {
        contract.validate_terms()?;
    } else {
        contract.validate()?;
    }
    Ok(SanityLayer::default().check(&contract, &time, results))
}
