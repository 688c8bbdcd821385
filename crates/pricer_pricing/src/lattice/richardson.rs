//! Richardson extrapolation of the binomial price.
//!
//! CRR prices carry a leading discretisation error of order 1/N, but at-the-money
//! strikes also oscillate between odd and even step counts. Extrapolating across
//! two runs of the same parity cancels the first-order term without mixing the
//! two branches of the sawtooth.

use pricer_core::types::{validate_expiry, validate_steps, ContractSpec, PriceEstimate, PricingError};
use pricer_models::instruments::ExerciseStyle;
use serde::{Deserialize, Serialize};

use super::binomial::backward_induction;
use super::params::LatticeParams;

/// Step-count pairing for the two Richardson runs.
///
/// # Variants
/// - `EvenDoubling`: `n1` = N rounded up to even, `n2 = 2·n1`
/// - `OddDoubling`: `n1` = N rounded up to odd, `n2 = 2·n1 + 1`
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::RichardsonPairing;
///
/// assert_eq!(RichardsonPairing::OddDoubling.step_pair(100), (101, 203));
/// assert_eq!(RichardsonPairing::EvenDoubling.step_pair(101), (102, 204));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RichardsonPairing {
    /// Two even step counts, the second double the first.
    EvenDoubling,
    /// Two odd step counts, the second `2·n1 + 1`.
    #[default]
    OddDoubling,
}

impl RichardsonPairing {
    /// Step counts `(n1, n2)` of the two runs for a requested base `steps`.
    #[inline]
    pub fn step_pair(&self, steps: usize) -> (usize, usize) {
        match self {
            RichardsonPairing::EvenDoubling => {
                let n1 = steps + steps % 2;
                (n1, 2 * n1)
            }
            RichardsonPairing::OddDoubling => {
                let n1 = steps + (1 - steps % 2);
                (n1, 2 * n1 + 1)
            }
        }
    }
}

/// Combines two first-order-biased prices at step counts `n1 < n2`.
///
/// Weights `(n2·P(n2) - n1·P(n1)) / (n2 - n1)` reduce to `2·P(2N) - P(N)` when
/// `n2 = 2·n1`.
#[inline]
pub fn extrapolate(n1: usize, price_n1: f64, n2: usize, price_n2: f64) -> f64 {
    let (n1, n2) = (n1 as f64, n2 as f64);
    (n2 * price_n2 - n1 * price_n1) / (n2 - n1)
}

/// Richardson-accelerated American lattice price.
///
/// Both runs are built from scratch from the same contract; nothing is shared
/// between the two backward passes.
///
/// # Errors
/// As [`price_binomial`](super::price_binomial).
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
/// use pricer_pricing::lattice::{price_richardson, RichardsonPairing};
///
/// let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let estimate = price_richardson(&put, 1.0, 100, RichardsonPairing::OddDoubling).unwrap();
/// assert!((estimate.value - 9.712).abs() < 2e-3);
/// ```
pub fn price_richardson(
    contract: &ContractSpec,
    expiry: f64,
    steps: usize,
    pairing: RichardsonPairing,
) -> Result<PriceEstimate, PricingError> {
    validate_steps(steps)?;
    contract.validate_terms()?;
    validate_expiry(expiry)?;

    if expiry == 0.0 {
        return Ok(PriceEstimate::exact(contract.intrinsic()));
    }

    let (n1, n2) = pairing.step_pair(steps);
    let coarse_params = LatticeParams::derive(contract, expiry, n1)?;
    let fine_params = LatticeParams::derive(contract, expiry, n2)?;

    let coarse = backward_induction(contract, &coarse_params, n1, ExerciseStyle::American);
    let fine = backward_induction(contract, &fine_params, n2, ExerciseStyle::American);
    let value = extrapolate(n1, coarse, n2, fine);

    tracing::debug!(
        steps,
        n1,
        n2,
        coarse,
        fine,
        value,
        ?pairing,
        "richardson price"
    );

    Ok(PriceEstimate::exact(value))
}
