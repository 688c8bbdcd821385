//! Longstaff-Schwartz engine against the lattice and Black-76.
//!
//! Monte Carlo comparisons grant three standard errors, and agreement with
//! the lattice is checked at `max(1% relative, 3·stderr)`.

use pricer_core::types::ContractSpec;
use pricer_models::analytical::black76_price;
use pricer_models::instruments::ExerciseStyle;
use pricer_pricing::api;
use pricer_pricing::lattice::price_binomial;
use pricer_pricing::lsm::{price_lsm, price_lsm_detailed, LsmConfig, RegressionBasis};

fn config(paths: usize, steps: usize, seed: u64) -> LsmConfig {
    LsmConfig::builder()
        .paths(paths)
        .steps(steps)
        .seed(seed)
        .build()
        .unwrap()
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_identical_inputs_reproduce_identical_prices() {
    let a = api::price_lsm(100.0, 100.0, 0.03, 0.25, 1.0, false, 50, 8_000, 2024).unwrap();
    let b = api::price_lsm(100.0, 100.0, 0.03, 0.25, 1.0, false, 50, 8_000, 2024).unwrap();
    assert_eq!(a.value.to_bits(), b.value.to_bits());
    assert_eq!(a.stderr, b.stderr);

    let c = api::price_lsm(100.0, 100.0, 0.03, 0.25, 1.0, false, 50, 8_000, 2025).unwrap();
    assert_ne!(a.value, c.value);
}

#[test]
fn test_thread_count_does_not_change_price() {
    let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
    let config = config(10_000, 30, 77);

    let price_with = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| price_lsm_detailed(&put, 1.0, &config).unwrap())
    };

    let single = price_with(1);
    let many = price_with(4);
    assert_eq!(single.estimate.value.to_bits(), many.estimate.value.to_bits());
    assert_eq!(single.estimate.stderr, many.estimate.stderr);
    assert_eq!(single.diagnostics, many.diagnostics);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_stderr_shrinks_with_paths() {
    let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
    let seeds = [1_u64, 2, 3];

    let mean_stderr = |paths: usize| {
        seeds
            .iter()
            .map(|&seed| {
                price_lsm(&put, 1.0, &config(paths, 25, seed))
                    .unwrap()
                    .stderr
                    .unwrap()
            })
            .sum::<f64>()
            / seeds.len() as f64
    };

    let coarse = mean_stderr(10_000);
    let fine = mean_stderr(160_000);
    assert!(fine < coarse, "stderr {} at 160k vs {} at 10k", fine, coarse);
    // Sixteen times the paths: roughly a quarter of the error
    assert!(fine < 0.5 * coarse);
}

#[test]
fn test_reference_put_agrees_with_lattice() {
    let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
    let lattice = price_binomial(&put, 1.0, 1200, ExerciseStyle::American)
        .unwrap()
        .value;
    let european = black76_price(&put, 1.0).unwrap().value;

    let mc = price_lsm(&put, 1.0, &config(40_000, 50, 42)).unwrap();
    let se = mc.stderr.unwrap();
    assert!(mc.value + 3.0 * se >= european);
    assert!(
        (mc.value - lattice).abs() <= (0.01 * lattice).max(3.0 * se),
        "lsm {} ± {} vs lattice {}",
        mc.value,
        se,
        lattice
    );
}

#[test]
fn test_index_futures_call_cross_check() {
    // F = K = 5000, r = 4%, σ = 20%, T = 0.25
    let call = ContractSpec::new(5000.0, 5000.0, 0.04, 0.20, true).unwrap();
    let european = black76_price(&call, 0.25).unwrap().value;
    let lattice = price_binomial(&call, 0.25, 1200, ExerciseStyle::American)
        .unwrap()
        .value;
    assert!(lattice >= european);

    let mc = price_lsm(&call, 0.25, &config(40_000, 120, 42)).unwrap();
    let se = mc.stderr.unwrap();
    assert!(mc.value + 3.0 * se >= european, "lsm {} ± {} vs European {}", mc.value, se, european);
    assert!(
        (mc.value - lattice).abs() <= (0.01 * lattice).max(3.0 * se),
        "lsm {} ± {} vs lattice {}",
        mc.value,
        se,
        lattice
    );
}

// ============================================================================
// Basis and diagnostics
// ============================================================================

#[test]
fn test_basis_degrees_agree() {
    let put = ContractSpec::new(100.0, 110.0, 0.05, 0.3, false).unwrap();
    let estimates: Vec<_> = (1..=3)
        .map(|degree| {
            let config = LsmConfig::builder()
                .paths(20_000)
                .steps(40)
                .seed(5)
                .basis(RegressionBasis::Polynomial { degree })
                .build()
                .unwrap();
            price_lsm(&put, 1.0, &config).unwrap()
        })
        .collect();

    for pair in estimates.windows(2) {
        let se = pair[0].stderr.unwrap().max(pair[1].stderr.unwrap());
        assert!((pair[0].value - pair[1].value).abs() < 0.02 * pair[1].value + 3.0 * se);
    }
}

#[test]
fn test_regular_bundle_needs_no_fallback() {
    let put = ContractSpec::new(100.0, 100.0, 0.03, 0.25, false).unwrap();
    let result = price_lsm_detailed(&put, 1.0, &config(20_000, 20, 8)).unwrap();
    assert_eq!(result.diagnostics.fallback_count(), 0);
    assert!(result.diagnostics.exercised.iter().sum::<usize>() > 0);
}
