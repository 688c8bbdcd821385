//! Cox-Ross-Rubinstein lattice parameters under the futures measure.

use pricer_core::types::{ContractSpec, PricingError};
use serde::{Deserialize, Serialize};

/// Smallest `u - d` accepted before the branch probability is treated as undefined.
pub const MIN_BRANCH_SPREAD: f64 = 1e-12;

/// Per-step parameters of a recombining binomial lattice.
///
/// Derived under the recombination condition `u·d = 1` with the zero-drift
/// branch probability `p = (1 - d) / (u - d)`: the futures price is a
/// martingale on the tree, so no cost-of-carry term enters `p`.
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
/// use pricer_pricing::lattice::LatticeParams;
///
/// let contract = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let params = LatticeParams::derive(&contract, 1.0, 100).unwrap();
///
/// assert!((params.up * params.down - 1.0).abs() < 1e-15);
/// assert!(params.prob > 0.0 && params.prob < 1.0);
/// // Martingale condition: p·u + (1-p)·d = 1
/// let drift = params.prob * params.up + (1.0 - params.prob) * params.down;
/// assert!((drift - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    /// Up factor `u = e^(σ√dt)`
    pub up: f64,
    /// Down factor `d = 1/u`
    pub down: f64,
    /// Risk-neutral up probability
    pub prob: f64,
    /// Step length `T / steps`
    pub dt: f64,
    /// One-step discount factor `e^(-r·dt)`
    pub discount: f64,
}

impl LatticeParams {
    /// Derives the lattice parameters for a contract and step grid.
    ///
    /// Requires `expiry > 0`; expired contracts never reach the lattice.
    ///
    /// # Errors
    /// - `PricingError::InvalidStepCount` if `steps == 0`
    /// - `PricingError::InvalidVolatility` if volatility is not positive
    /// - `PricingError::DegenerateLattice` if `u - d` is not distinguishable
    ///   from zero, `p` falls outside `(0, 1)`, or the extreme terminal nodes
    ///   `F·u^N` and `F·d^N` are not representable (see [`max_log_spread`])
    pub fn derive(contract: &ContractSpec, expiry: f64, steps: usize) -> Result<Self, PricingError> {
        pricer_core::types::validate_steps(steps)?;
        let volatility = contract.volatility;
        if volatility.is_nan() || volatility <= 0.0 {
            return Err(PricingError::InvalidVolatility { volatility });
        }

        let dt = expiry / steps as f64;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let spread = up - down;

        if spread.is_nan() || spread <= MIN_BRANCH_SPREAD || !spread.is_finite() {
            return Err(PricingError::DegenerateLattice { up, down });
        }

        let prob = (1.0 - down) / spread;
        if !(prob > 0.0 && prob < 1.0) {
            return Err(PricingError::DegenerateLattice { up, down });
        }

        // Terminal nodes span F·e^(±σ√(T·N))
        let log_spread = volatility * (expiry * steps as f64).sqrt();
        if !(log_spread <= max_log_spread(contract, expiry)) {
            return Err(PricingError::DegenerateLattice { up, down });
        }

        Ok(Self {
            up,
            down,
            prob,
            dt,
            discount: (-contract.rate * dt).exp(),
        })
    }

    /// Discounted up-branch weight `e^(-r·dt)·p`.
    #[inline]
    pub fn weight_up(&self) -> f64 {
        self.discount * self.prob
    }

    /// Discounted down-branch weight `e^(-r·dt)·(1-p)`.
    #[inline]
    pub fn weight_down(&self) -> f64 {
        self.discount * (1.0 - self.prob)
    }
}

/// Largest terminal log-spread `σ√(T·N)` the lattice can carry in `f64`.
///
/// The top node `F·u^N` and the values rolled back from it, inflated by
/// `e^(-r·T)` when rates are negative, must stay below `f64::MAX`. The bottom
/// node `F·d^N` and `d^N` itself must stay normal, otherwise the node
/// recurrence collapses to zero.
pub fn max_log_spread(contract: &ContractSpec, expiry: f64) -> f64 {
    let scale = contract.forward.max(contract.strike);
    let growth = (-contract.rate * expiry).max(0.0);
    let overflow = (f64::MAX / scale).ln() - growth;
    let underflow = (contract.forward.min(1.0) / f64::MIN_POSITIVE).ln();
    overflow.min(underflow)
}
