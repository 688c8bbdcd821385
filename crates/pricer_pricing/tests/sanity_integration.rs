//! End-to-end: calendar dates to time grid, every engine, then the sanity layer.

use std::collections::BTreeMap;

use pricer_core::types::{ContractSpec, Date, PriceEstimate, TimeSpec};
use pricer_models::instruments::ExerciseStyle;
use pricer_pricing::api;
use pricer_pricing::config::PricingConfig;
use pricer_pricing::engine::{BinomialEngine, EngineId, PricingEngine};
use pricer_pricing::lattice::price_binomial;
use pricer_pricing::sanity::{Capabilities, SanityLayer, Violation};

fn index_call() -> ContractSpec {
    ContractSpec::new(5000.0, 5000.0, 0.04, 0.20, true).unwrap()
}

fn run_all(contract: &ContractSpec, time: &TimeSpec) -> BTreeMap<EngineId, PriceEstimate> {
    PricingConfig::default()
        .engines()
        .iter()
        .map(|engine| (engine.id(), engine.price(contract, time).unwrap()))
        .collect()
}

#[test]
fn test_full_pipeline_is_clean() {
    let config = PricingConfig::default();
    let valuation = Date::from_ymd(2024, 3, 15).unwrap();
    let expiry = Date::from_ymd(2024, 6, 14).unwrap();
    let time = config.time_grid().unwrap().compute_default(valuation, expiry).unwrap();
    assert_eq!(time.steps, 1200);

    let call = index_call();
    let results = run_all(&call, &time);
    assert_eq!(results.len(), 4);
    assert!(results[&EngineId::Lsm].stderr.is_some());
    assert!(results[&EngineId::Richardson].stderr.is_none());

    let violations = config.sanity_layer().check(&call, &time, &results);
    assert!(violations.is_empty(), "unexpected violations: {:?}", violations);
}

#[test]
fn test_oracle_comparison_when_registered() {
    let call = index_call();
    let time = TimeSpec::new(0.25, 400).unwrap();
    let mut results = BTreeMap::new();
    results.insert(
        EngineId::Binomial,
        BinomialEngine::default().price(&call, &time).unwrap(),
    );

    // A fine lattice stands in for a closed-form approximation
    let mut capabilities = Capabilities::new();
    capabilities.register_american_oracle(Box::new(|c: &ContractSpec, t: f64| {
        price_binomial(c, t, 800, ExerciseStyle::American)
            .map(|estimate| estimate.value)
            .unwrap_or(f64::NAN)
    }));
    let layer = SanityLayer::default().with_capabilities(capabilities);
    assert!(layer.check(&call, &time, &results).is_empty());

    let mut capabilities = Capabilities::new();
    capabilities.register_american_oracle(Box::new(|c: &ContractSpec, _: f64| 0.5 * c.forward));
    let layer = SanityLayer::default().with_capabilities(capabilities);
    let violations = layer.check(&call, &time, &results);
    assert!(matches!(
        violations.as_slice(),
        [Violation::OracleDisagreement {
            engine: EngineId::Binomial,
            ..
        }]
    ));
}

#[test]
fn test_misbehaving_oracle_reported_not_raised() {
    let call = index_call();
    let time = TimeSpec::new(0.25, 100).unwrap();

    let mut layer = SanityLayer::default().with_probes(Vec::new());
    layer
        .capabilities_mut()
        .register_american_oracle(Box::new(|_: &ContractSpec, _: f64| f64::NAN));

    let violations = layer.check(&call, &time, &BTreeMap::new());
    assert!(matches!(
        violations.as_slice(),
        [Violation::ProbeFailed {
            engine: EngineId::Oracle,
            ..
        }]
    ));
}

#[test]
fn test_primitive_sanity_surface() {
    let (forward, strike, rate, vol, expiry, is_call) = (100.0, 100.0, 0.03, 0.25, 1.0, false);

    let mut results = BTreeMap::new();
    results.insert(
        EngineId::Black76,
        api::price_black76(forward, strike, rate, vol, expiry, is_call).unwrap(),
    );
    results.insert(
        EngineId::Richardson,
        api::price_richardson(forward, strike, rate, vol, expiry, is_call, 200).unwrap(),
    );
    results.insert(
        EngineId::Lsm,
        api::price_lsm(forward, strike, rate, vol, expiry, is_call, 50, 20_000, 42).unwrap(),
    );

    let violations =
        api::sanity_checks(forward, strike, rate, vol, expiry, is_call, 200, &results).unwrap();
    assert!(violations.is_empty(), "unexpected violations: {:?}", violations);

    // A European figure above every American estimate is flagged per engine
    results.insert(EngineId::Black76, PriceEstimate::exact(12.0));
    let violations =
        api::sanity_checks(forward, strike, rate, vol, expiry, is_call, 200, &results).unwrap();
    let flagged: Vec<EngineId> = violations
        .iter()
        .filter_map(|v| match v {
            Violation::AmericanBelowEuropean { engine, .. } => Some(*engine),
            _ => None,
        })
        .collect();
    assert_eq!(flagged, vec![EngineId::Richardson, EngineId::Lsm]);
}

#[test]
fn test_time_grid_surface() {
    let valuation = Date::from_ymd(2024, 1, 2).unwrap();
    let expiry = Date::from_ymd(2029, 12, 31).unwrap();
    let time = api::time_grid(valuation, expiry, "US").unwrap();
    assert_eq!(time.steps, 1506);
    assert!((time.expiry - 6.0).abs() < 1e-12);
}
