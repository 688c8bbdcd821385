//! Longstaff-Schwartz backward induction.
//!
//! # Algorithm
//!
//! 1. Simulate the path bundle and record each path's terminal payoff as its
//!    exercise cash flow, with exercise step `N`.
//! 2. For each date `t = N-1, ..., 1`:
//!    - select the paths with strictly positive intrinsic value
//!    - regress their recorded cash flows, discounted back to `t`, on the
//!      basis evaluated at `F_t / K`
//!    - overwrite the cash flow and exercise step of every in-the-money path
//!      whose intrinsic value is at least the fitted continuation
//! 3. Discount each path's cash flow from its exercise step to time 0 and
//!    average; the standard error is the sample deviation over `√paths`.
//!
//! Time 0 is never an exercise date. Decisions at `t` use only `F_t` and the
//! fit at `t`, so no future information leaks into the exercise rule.
//!
//! When a date has fewer in-the-money paths than basis functions, or its
//! normal equations are singular, the continuation value of every
//! in-the-money path is the mean discounted cash flow over that subset. The
//! fallback is recorded in [`LsmDiagnostics::fallbacks`] and logged.

use pricer_core::types::{validate_expiry, ContractSpec, PriceEstimate, PricingError};
use rayon::prelude::*;

use super::basis::{NormalEquations, RegressionBasis, MAX_DEGREE};
use super::config::LsmConfig;
use super::paths::{PathBundle, PATH_BLOCK_SIZE};

/// Per-date record of a Longstaff-Schwartz run.
///
/// Vectors are indexed by time step `0..=steps`; entry 0 is always zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LsmDiagnostics {
    /// In-the-money paths at each step.
    pub itm_paths: Vec<usize>,
    /// Paths whose exercise decision was set at each step.
    pub exercised: Vec<usize>,
    /// Dates where the regression fell back to the mean continuation value.
    ///
    /// Each entry is a `PricingError::RegressionSingularity`.
    pub fallbacks: Vec<PricingError>,
}

impl LsmDiagnostics {
    fn new(steps: usize) -> Self {
        Self {
            itm_paths: vec![0; steps + 1],
            exercised: vec![0; steps + 1],
            fallbacks: Vec::new(),
        }
    }

    /// Number of dates that used the fallback.
    #[inline]
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.len()
    }
}

/// Estimate plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LsmResult {
    /// Price and standard error
    pub estimate: PriceEstimate,
    /// Per-date diagnostics
    pub diagnostics: LsmDiagnostics,
}

/// Continuation estimate used at one exercise date.
enum ContinuationRule {
    Fitted([f64; MAX_DEGREE + 1]),
    Mean(f64),
}

impl ContinuationRule {
    #[inline]
    fn value(&self, basis: &RegressionBasis, moneyness: f64) -> f64 {
        match self {
            ContinuationRule::Fitted(beta) => basis.fitted(beta, moneyness),
            ContinuationRule::Mean(mean) => *mean,
        }
    }
}

/// American futures option price by Longstaff-Schwartz.
///
/// See [`price_lsm_detailed`].
///
/// # Examples
/// ```
/// use pricer_core::types::ContractSpec;
/// use pricer_pricing::lsm::{price_lsm, LsmConfig};
///
/// let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
/// let config = LsmConfig::builder().paths(4_000).steps(25).seed(1).build().unwrap();
///
/// let a = price_lsm(&put, 1.0, &config).unwrap();
/// let b = price_lsm(&put, 1.0, &config).unwrap();
/// assert_eq!(a, b);
/// assert!(a.stderr.unwrap() > 0.0);
/// ```
pub fn price_lsm(
    contract: &ContractSpec,
    expiry: f64,
    config: &LsmConfig,
) -> Result<PriceEstimate, PricingError> {
    price_lsm_detailed(contract, expiry, config).map(|result| result.estimate)
}

/// American futures option price by Longstaff-Schwartz, with diagnostics.
///
/// At `expiry == 0` returns the intrinsic value with zero standard error
/// after validating the configuration.
///
/// # Errors
/// - `PricingError::InvalidStepCount` / `InvalidPathCount` for bad counts
/// - `PricingError::InvalidContract` / `InvalidExpiry` for bad terms
/// - `PricingError::InvalidVolatility` for non-positive volatility with `expiry > 0`
///
/// Regression singularities are never returned; see [`LsmDiagnostics::fallbacks`].
pub fn price_lsm_detailed(
    contract: &ContractSpec,
    expiry: f64,
    config: &LsmConfig,
) -> Result<LsmResult, PricingError> {
    config.validate()?;
    contract.validate_terms()?;
    validate_expiry(expiry)?;

    let steps = config.steps;
    if expiry == 0.0 {
        return Ok(LsmResult {
            estimate: PriceEstimate::with_stderr(contract.intrinsic(), 0.0),
            diagnostics: LsmDiagnostics::new(steps),
        });
    }
    contract.validate()?;

    let dt = expiry / steps as f64;
    let bundle = PathBundle::simulate(
        contract.forward,
        contract.volatility,
        dt,
        config.paths,
        steps,
        config.seed,
    );
    let discount: Vec<f64> = (0..=steps)
        .map(|k| (-contract.rate * k as f64 * dt).exp())
        .collect();

    let mut diagnostics = LsmDiagnostics::new(steps);
    let mut cash: Vec<f64> = (0..config.paths)
        .map(|p| contract.payoff(bundle.price(p, steps)))
        .collect();
    let mut exercise_step = vec![steps; config.paths];

    let terminal_itm = cash.iter().filter(|&&c| c > 0.0).count();
    diagnostics.itm_paths[steps] = terminal_itm;
    diagnostics.exercised[steps] = terminal_itm;

    for step in (1..steps).rev() {
        let equations = accumulate(
            contract,
            &config.basis,
            &bundle,
            &cash,
            &exercise_step,
            &discount,
            step,
        );
        let itm = equations.count();
        diagnostics.itm_paths[step] = itm;
        if itm == 0 {
            tracing::trace!(step, "no in-the-money paths");
            continue;
        }

        let rule = match fit(&equations) {
            Some(rule) => rule,
            None => {
                let singularity = PricingError::RegressionSingularity {
                    step,
                    itm_paths: itm,
                    basis_dim: config.basis.dim(),
                };
                tracing::warn!(%singularity, "falling back to mean continuation value");
                diagnostics.fallbacks.push(singularity);
                ContinuationRule::Mean(equations.mean_response().unwrap_or(0.0))
            }
        };

        let exercised: usize = cash
            .par_iter_mut()
            .zip(exercise_step.par_iter_mut())
            .enumerate()
            .map(|(path, (cash_flow, exercised_at))| {
                let forward = bundle.price(path, step);
                let intrinsic = contract.payoff(forward);
                if intrinsic > 0.0
                    && intrinsic >= rule.value(&config.basis, forward / contract.strike)
                {
                    *cash_flow = intrinsic;
                    *exercised_at = step;
                    1
                } else {
                    0
                }
            })
            .sum();
        diagnostics.exercised[step] = exercised;

        tracing::trace!(step, itm, exercised, "exercise date processed");
    }

    let discounted: Vec<f64> = cash
        .iter()
        .zip(&exercise_step)
        .map(|(&c, &k)| c * discount[k])
        .collect();
    let (value, stderr) = mean_and_stderr(&discounted);

    tracing::debug!(
        forward = contract.forward,
        strike = contract.strike,
        volatility = contract.volatility,
        expiry,
        paths = config.paths,
        steps,
        seed = config.seed,
        value,
        stderr,
        fallbacks = diagnostics.fallbacks.len(),
        "lsm price"
    );

    Ok(LsmResult {
        estimate: PriceEstimate::with_stderr(value, stderr),
        diagnostics,
    })
}

/// Builds the normal equations at `step` from in-the-money paths.
///
/// Blocks are accumulated in parallel and merged in block order.
fn accumulate(
    contract: &ContractSpec,
    basis: &RegressionBasis,
    bundle: &PathBundle,
    cash: &[f64],
    exercise_step: &[usize],
    discount: &[f64],
    step: usize,
) -> NormalEquations {
    let dim = basis.dim();
    let n_paths = bundle.n_paths();

    let partials: Vec<NormalEquations> = (0..bundle.n_blocks())
        .into_par_iter()
        .map(|block| {
            let mut equations = NormalEquations::new(dim);
            let mut row = [0.0; MAX_DEGREE + 1];
            let end = ((block + 1) * PATH_BLOCK_SIZE).min(n_paths);
            for path in block * PATH_BLOCK_SIZE..end {
                let forward = bundle.price(path, step);
                if contract.payoff(forward) > 0.0 {
                    let y = cash[path] * discount[exercise_step[path] - step];
                    basis.evaluate(forward / contract.strike, &mut row);
                    equations.add(&row[..dim], y);
                }
            }
            equations
        })
        .collect();

    partials
        .iter()
        .fold(NormalEquations::new(dim), |acc, partial| acc.merge(partial))
}

fn fit(equations: &NormalEquations) -> Option<ContinuationRule> {
    let beta = equations.solve()?;
    let mut coefficients = [0.0; MAX_DEGREE + 1];
    coefficients[..beta.len()].copy_from_slice(&beta);
    Some(ContinuationRule::Fitted(coefficients))
}

/// Sample mean and standard error (n - 1 denominator) in a fixed summation order.
fn mean_and_stderr(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = blockwise_sum(values, |v| v) / n as f64;
    if n == 1 {
        return (mean, 0.0);
    }
    let sum_sq = blockwise_sum(values, |v| (v - mean) * (v - mean));
    let variance = sum_sq / (n - 1) as f64;
    (mean, (variance / n as f64).sqrt())
}

fn blockwise_sum(values: &[f64], f: impl Fn(f64) -> f64 + Sync) -> f64 {
    let partials: Vec<f64> = values
        .par_chunks(PATH_BLOCK_SIZE)
        .map(|chunk| chunk.iter().map(|&v| f(v)).sum::<f64>())
        .collect();
    partials.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::black76_price;
    use tracing_test::traced_test;

    fn config(paths: usize, steps: usize, seed: u64) -> LsmConfig {
        LsmConfig::builder()
            .paths(paths)
            .steps(steps)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_mean_and_stderr() {
        let (mean, se) = mean_and_stderr(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(mean, 2.5);
        // sample variance 5/3, se = sqrt(5/3 / 4)
        assert_relative_eq!(se, (5.0_f64 / 12.0).sqrt(), epsilon = 1e-15);
        assert_eq!(mean_and_stderr(&[7.0]), (7.0, 0.0));
    }

    #[test]
    fn test_expired_returns_intrinsic_with_zero_stderr() {
        let put = ContractSpec::new(90.0, 100.0, 0.05, 0.3, false).unwrap();
        let result = price_lsm(&put, 0.0, &config(100, 10, 1)).unwrap();
        assert_eq!(result, PriceEstimate::with_stderr(10.0, 0.0));
    }

    #[test]
    fn test_zero_steps_and_paths_rejected() {
        let put = ContractSpec::new(100.0, 100.0, 0.05, 0.3, false).unwrap();
        let mut bad = LsmConfig::default();
        bad.steps = 0;
        assert_eq!(
            price_lsm(&put, 1.0, &bad),
            Err(PricingError::InvalidStepCount(0))
        );
        bad.steps = 10;
        bad.paths = 0;
        assert_eq!(
            price_lsm(&put, 1.0, &bad),
            Err(PricingError::InvalidPathCount(0))
        );
    }

    #[test]
    fn test_single_step_is_european_monte_carlo() {
        // No exercise dates between 0 and T: plain discounted payoff average
        let call = ContractSpec::new(100.0, 100.0, 0.02, 0.2, true).unwrap();
        let result = price_lsm_detailed(&call, 0.5, &config(50_000, 1, 9)).unwrap();
        let reference = black76_price(&call, 0.5).unwrap().value;
        let se = result.estimate.stderr.unwrap();
        assert!((result.estimate.value - reference).abs() < 4.0 * se);
        assert!(result.diagnostics.fallbacks.is_empty());
    }

    #[test]
    fn test_tiny_bundle_uses_fallback() {
        // Two paths can never support a quadratic fit
        let put = ContractSpec::new(90.0, 100.0, 0.05, 0.4, false).unwrap();
        let result = price_lsm_detailed(&put, 1.0, &config(2, 20, 3)).unwrap();
        assert!(result.diagnostics.fallback_count() > 0);
        for fallback in &result.diagnostics.fallbacks {
            assert!(fallback.is_recoverable());
            match fallback {
                PricingError::RegressionSingularity { itm_paths, basis_dim, .. } => {
                    assert!(*itm_paths >= 1);
                    assert!(*itm_paths <= 2);
                    assert_eq!(*basis_dim, 3);
                }
                other => panic!("unexpected diagnostic {:?}", other),
            }
        }
        assert!(result.estimate.value.is_finite());
    }

    #[test]
    #[traced_test]
    fn test_fallback_is_logged() {
        let put = ContractSpec::new(90.0, 100.0, 0.05, 0.4, false).unwrap();
        let result = price_lsm_detailed(&put, 1.0, &config(2, 5, 3)).unwrap();
        assert!(result.diagnostics.fallback_count() > 0);
        assert!(logs_contain("falling back to mean continuation value"));
    }

    #[test]
    fn test_diagnostics_shape() {
        let put = ContractSpec::new(100.0, 100.0, 0.05, 0.3, false).unwrap();
        let result = price_lsm_detailed(&put, 1.0, &config(2_000, 10, 5)).unwrap();
        let d = &result.diagnostics;
        assert_eq!(d.itm_paths.len(), 11);
        assert_eq!(d.exercised[0], 0);
        for step in 1..=10 {
            assert!(d.exercised[step] <= d.itm_paths[step]);
        }
    }

    #[test]
    fn test_deep_itm_put_close_to_intrinsic() {
        let put = ContractSpec::new(50.0, 100.0, 0.08, 0.2, false).unwrap();
        let result = price_lsm(&put, 1.0, &config(5_000, 50, 17)).unwrap();
        // Exercised at the first date on essentially every path
        assert!(result.value > 49.0 && result.value < 50.5, "value {}", result.value);
    }
}
