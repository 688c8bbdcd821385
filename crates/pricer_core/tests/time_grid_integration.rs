//! Integration tests for the calendar service and time grid.
//!
//! Exercises the public surface through absolute paths: calendar lookup,
//! step-floor policy, configuration loading and error reporting.

use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::calendar::{BuiltinCalendars, CalendarId, CalendarService};
use pricer_core::time_grid::{TimeGrid, TimeGridConfig, DEFAULT_STEP_FLOOR};
use pricer_core::types::{Date, PricingError};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// ============================================================================
// Calendar service
// ============================================================================

#[test]
fn test_us_business_days_multi_year() {
    let count = BuiltinCalendars
        .business_day_count(date(2024, 1, 1), date(2030, 1, 1), "US")
        .unwrap();
    assert_eq!(count, 1507);
}

#[test]
fn test_calendar_lookup_is_case_insensitive() {
    let a = BuiltinCalendars
        .business_day_count(date(2024, 1, 1), date(2024, 2, 1), "us")
        .unwrap();
    let b = BuiltinCalendars
        .business_day_count(date(2024, 1, 1), date(2024, 2, 1), "US")
        .unwrap();
    assert_eq!(a, b);
}

/// Calendar stub returning fixed answers, injected into the grid.
struct FixedCalendar {
    business_days: usize,
}

impl CalendarService for FixedCalendar {
    fn year_fraction(&self, start: Date, end: Date, _calendar_id: &str) -> Result<f64, PricingError> {
        Ok((end - start) as f64 / 365.0)
    }

    fn business_day_count(
        &self,
        _start: Date,
        _end: Date,
        calendar_id: &str,
    ) -> Result<usize, PricingError> {
        if calendar_id == "FIXED" {
            Ok(self.business_days)
        } else {
            Err(PricingError::UnknownCalendar(calendar_id.to_string()))
        }
    }
}

#[test]
fn test_injected_service() {
    let grid = TimeGrid::with_service(
        TimeGridConfig::default(),
        Arc::new(FixedCalendar { business_days: 5000 }),
    )
    .unwrap();

    let spec = grid.compute(date(2024, 1, 1), date(2025, 1, 1), "FIXED").unwrap();
    assert_eq!(spec.steps, 5000);
    assert_relative_eq!(spec.expiry, 366.0 / 365.0, epsilon = 1e-15);

    assert!(matches!(
        grid.compute(date(2024, 1, 1), date(2025, 1, 1), "US"),
        Err(PricingError::UnknownCalendar(_))
    ));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_toml_defaults() {
    let config: TimeGridConfig = toml::from_str("").unwrap();
    assert_eq!(config, TimeGridConfig::default());
    assert_eq!(config.calendar, CalendarId::Us);
    assert_eq!(config.step_floor, DEFAULT_STEP_FLOOR);
}

#[test]
fn test_config_unknown_calendar_rejected() {
    let result = toml::from_str::<TimeGridConfig>("calendar = \"TARGET\"");
    assert!(result.is_err(), "unknown calendar must not deserialise");
}

// ============================================================================
// Step-floor policy
// ============================================================================

proptest! {
    #[test]
    fn prop_steps_at_least_floor_and_business_days(
        offset in 1i64..4000,
        floor in 1usize..2000,
    ) {
        let valuation = date(2024, 1, 2);
        let expiry = Date::from(valuation.into_inner() + chrono::Duration::days(offset));
        let grid = TimeGrid::new(TimeGridConfig { calendar: CalendarId::Us, step_floor: floor }).unwrap();

        let spec = grid.compute_default(valuation, expiry).unwrap();
        let business = BuiltinCalendars.business_day_count(valuation, expiry, "US").unwrap();

        prop_assert_eq!(spec.steps, floor.max(business));
        prop_assert!((spec.expiry - offset as f64 / 365.0).abs() < 1e-12);
    }
}
