//! Integration tests for module exports.
//!
//! Verifies that the public types are reachable through their absolute
//! paths and through the module-level re-exports.

use chrono::NaiveDate;

/// Value types are re-exported from `types`.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::contract::{ContractSpec, OptionType};
    use pricer_core::types::error::PricingError;
    use pricer_core::types::estimate::PriceEstimate;
    use pricer_core::types::grid::TimeSpec;

    let contract = ContractSpec::new(100.0, 95.0, 0.02, 0.3, true).unwrap();
    assert_eq!(contract.option_type(), OptionType::Call);
    assert_eq!(PriceEstimate::exact(contract.intrinsic()).value, 5.0);
    assert_eq!(TimeSpec::new(1.0, 0), Err(PricingError::InvalidStepCount(0)));
}

/// Calendars are usable as trait objects.
#[test]
fn test_calendar_module_exports() {
    use pricer_core::calendar::{
        BuiltinCalendars, BusinessCalendar, CalendarId, CalendarService, UnitedStates,
    };

    let calendars: [&dyn BusinessCalendar; 2] = [&UnitedStates, CalendarId::WeekendsOnly.calendar()];
    let independence_day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
    assert!(!calendars[0].is_business_day(independence_day));
    assert!(calendars[1].is_business_day(independence_day));

    let service: &dyn CalendarService = &BuiltinCalendars;
    let start = pricer_core::types::Date::from(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    let end = pricer_core::types::Date::from(independence_day);
    assert_eq!(service.business_day_count(start, end, "US").unwrap(), 2);
    assert_eq!(service.business_day_count(start, end, "WEEKENDS").unwrap(), 3);
}

/// Time-grid items are reachable from the crate root module.
#[test]
fn test_time_grid_module_exports() {
    use pricer_core::time_grid::{TimeGrid, TimeGridConfig, DEFAULT_STEP_FLOOR};

    let grid = TimeGrid::new(TimeGridConfig::default()).unwrap();
    assert_eq!(grid.config().step_floor, DEFAULT_STEP_FLOOR);
}
