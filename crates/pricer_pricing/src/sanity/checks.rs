//! Cross-engine sanity checks.

use pricer_core::types::{ContractSpec, PriceEstimate, TimeSpec};
use std::collections::BTreeMap;

use super::config::SanityConfig;
use super::oracle::{AmericanOracle, Capabilities};
use super::violation::Violation;
use crate::engine::{BinomialEngine, Black76Engine, EngineId, PricingEngine};

/// Advisory cross-checks over a set of engine results.
///
/// Checks performed by [`check`](Self::check):
/// - no-arbitrage bounds on every estimate
/// - American ≥ European against the Black-76 result, when present
/// - pairwise agreement between early-exercise engines
/// - agreement with the registered American oracle, when one exists
/// - monotonicity in volatility, by re-pricing through each probe engine
///
/// Monte Carlo estimates are granted `stderr_multiplier` standard errors
/// in every comparison.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use pricer_core::types::{ContractSpec, TimeSpec};
/// use pricer_pricing::engine::{BinomialEngine, Black76Engine, EngineId, PricingEngine};
/// use pricer_pricing::sanity::SanityLayer;
///
/// let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let time = TimeSpec::new(1.0, 200).unwrap();
///
/// let mut results = BTreeMap::new();
/// results.insert(EngineId::Black76, Black76Engine.price(&put, &time).unwrap());
/// results.insert(EngineId::Binomial, BinomialEngine::default().price(&put, &time).unwrap());
///
/// assert!(SanityLayer::default().check(&put, &time, &results).is_empty());
/// ```
pub struct SanityLayer {
    config: SanityConfig,
    capabilities: Capabilities,
    probes: Vec<Box<dyn PricingEngine>>,
}

impl Default for SanityLayer {
    fn default() -> Self {
        Self::new(SanityConfig::default())
    }
}

impl SanityLayer {
    /// Layer probing Black-76 and the American lattice.
    pub fn new(config: SanityConfig) -> Self {
        Self {
            config,
            capabilities: Capabilities::new(),
            probes: vec![Box::new(Black76Engine), Box::new(BinomialEngine::default())],
        }
    }

    /// Replaces the optional providers.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replaces the volatility probe engines.
    pub fn with_probes(mut self, probes: Vec<Box<dyn PricingEngine>>) -> Self {
        self.probes = probes;
        self
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    /// Mutable access to the optional providers.
    pub fn capabilities_mut(&mut self) -> &mut Capabilities {
        &mut self.capabilities
    }

    /// Runs every check and returns the findings.
    ///
    /// Never fails: errors raised by probe evaluations are reported as
    /// [`Violation::ProbeFailed`].
    pub fn check(
        &self,
        contract: &ContractSpec,
        time: &TimeSpec,
        results: &BTreeMap<EngineId, PriceEstimate>,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        self.check_bounds(contract, time, results, &mut violations);
        self.check_early_exercise_premium(contract, results, &mut violations);
        self.check_agreement(contract, results, &mut violations);
        match self.capabilities.american_oracle() {
            Some(oracle) => self.check_oracle(oracle, contract, time, results, &mut violations),
            None => tracing::debug!("no american oracle registered, skipping oracle comparison"),
        }
        self.check_volatility_monotonicity(contract, time, &mut violations);

        for violation in &violations {
            tracing::warn!(engine = %violation.engine(), %violation, "sanity violation");
        }
        violations
    }

    fn slack(&self, contract: &ContractSpec) -> f64 {
        self.config.bound_slack * contract.forward.max(contract.strike)
    }

    fn allowance(&self, estimate: &PriceEstimate) -> f64 {
        self.config.stderr_multiplier * estimate.stderr_or_zero()
    }

    fn check_bounds(
        &self,
        contract: &ContractSpec,
        time: &TimeSpec,
        results: &BTreeMap<EngineId, PriceEstimate>,
        violations: &mut Vec<Violation>,
    ) {
        let discount = (-contract.rate * time.expiry).exp();
        let slack = self.slack(contract);

        for (&engine, estimate) in results {
            // European values carry the discount on both bounds; early exercise
            // lifts the floor to intrinsic and the cap to the undiscounted level.
            let (lower, upper) = if engine.is_american() {
                let cap = discount.max(1.0);
                if contract.is_call {
                    (contract.intrinsic(), contract.forward * cap)
                } else {
                    (contract.intrinsic(), contract.strike * cap)
                }
            } else if contract.is_call {
                (
                    discount * (contract.forward - contract.strike).max(0.0),
                    discount * contract.forward,
                )
            } else {
                (
                    discount * (contract.strike - contract.forward).max(0.0),
                    discount * contract.strike,
                )
            };

            let allowance = slack + self.allowance(estimate);
            if estimate.value < lower - allowance {
                violations.push(Violation::BelowIntrinsic {
                    engine,
                    value: estimate.value,
                    bound: lower,
                });
            }
            if estimate.value > upper + allowance {
                violations.push(Violation::AboveUpperBound {
                    engine,
                    value: estimate.value,
                    bound: upper,
                });
            }
        }
    }

    fn check_early_exercise_premium(
        &self,
        contract: &ContractSpec,
        results: &BTreeMap<EngineId, PriceEstimate>,
        violations: &mut Vec<Violation>,
    ) {
        let Some(european) = results.get(&EngineId::Black76) else {
            return;
        };
        let slack = self.slack(contract);

        for (&engine, estimate) in results.iter().filter(|(id, _)| id.is_american()) {
            let allowance = slack + self.allowance(estimate);
            if estimate.value + allowance < european.value {
                violations.push(Violation::AmericanBelowEuropean {
                    engine,
                    american: estimate.value,
                    european: european.value,
                });
            }
        }
    }

    fn check_agreement(
        &self,
        contract: &ContractSpec,
        results: &BTreeMap<EngineId, PriceEstimate>,
        violations: &mut Vec<Violation>,
    ) {
        let american: Vec<(EngineId, &PriceEstimate)> = results
            .iter()
            .filter(|(id, _)| id.is_american())
            .map(|(&id, estimate)| (id, estimate))
            .collect();
        let slack = self.slack(contract);

        for (i, &(left, a)) in american.iter().enumerate() {
            for &(right, b) in &american[i + 1..] {
                let relative = self.config.agreement_tolerance * a.value.abs().max(b.value.abs());
                let statistical = self.config.stderr_multiplier
                    * a.stderr_or_zero().hypot(b.stderr_or_zero());
                let allowance = relative.max(statistical) + slack;

                if (a.value - b.value).abs() > allowance {
                    violations.push(Violation::EngineDisagreement {
                        left,
                        right,
                        left_value: a.value,
                        right_value: b.value,
                        allowance,
                    });
                }
            }
        }
    }

    fn check_oracle(
        &self,
        oracle: &dyn AmericanOracle,
        contract: &ContractSpec,
        time: &TimeSpec,
        results: &BTreeMap<EngineId, PriceEstimate>,
        violations: &mut Vec<Violation>,
    ) {
        let reference = oracle.price(contract, time.expiry);
        if !reference.is_finite() {
            violations.push(Violation::ProbeFailed {
                engine: EngineId::Oracle,
                reason: format!("{} returned {reference}", oracle.name()),
            });
            return;
        }
        let slack = self.slack(contract);

        for (&engine, estimate) in results
            .iter()
            .filter(|(id, _)| id.is_american() && **id != EngineId::Oracle)
        {
            let allowance = (self.config.oracle_tolerance * reference.abs())
                .max(self.allowance(estimate))
                + slack;
            if (estimate.value - reference).abs() > allowance {
                violations.push(Violation::OracleDisagreement {
                    engine,
                    value: estimate.value,
                    oracle: reference,
                });
            }
        }
    }

    fn check_volatility_monotonicity(
        &self,
        contract: &ContractSpec,
        time: &TimeSpec,
        violations: &mut Vec<Violation>,
    ) {
        if time.is_expired() {
            return;
        }
        let bumped_contract = contract.with_volatility(contract.volatility * (1.0 + self.config.vol_bump));
        let slack = self.slack(contract);

        for probe in &self.probes {
            let engine = probe.id();
            let evaluated = probe
                .price(contract, time)
                .and_then(|base| probe.price(&bumped_contract, time).map(|bumped| (base, bumped)));

            match evaluated {
                Ok((base, bumped)) => {
                    let allowance = slack + self.allowance(&base) + self.allowance(&bumped);
                    if bumped.value + allowance < base.value {
                        violations.push(Violation::NonMonotoneInVolatility {
                            engine,
                            base_volatility: contract.volatility,
                            bumped_volatility: bumped_contract.volatility,
                            base_value: base.value,
                            bumped_value: bumped.value,
                        });
                    }
                }
                Err(err) => violations.push(Violation::ProbeFailed {
                    engine,
                    reason: err.to_string(),
                }),
            }
        }
    }
}
