//! Business-day calendars and the calendar service.
//!
//! This module provides:
//! - `CalendarId`: the closed registry of recognised calendars
//! - `holidays`: `BusinessCalendar` implementations (`UnitedStates`, `WeekendsOnly`)
//! - `service`: the `CalendarService` trait consumed by `TimeGrid` and its
//!   default implementation `BuiltinCalendars`
//!
//! # Examples
//!
//! ```
//! use pricer_core::calendar::{BuiltinCalendars, CalendarService};
//! use pricer_core::types::Date;
//!
//! let service = BuiltinCalendars;
//! let start = Date::from_ymd(2023, 12, 31).unwrap();
//! let end = Date::from_ymd(2024, 12, 31).unwrap();
//!
//! assert_eq!(service.business_day_count(start, end, "US").unwrap(), 252);
//! assert!(service.business_day_count(start, end, "TARGET").is_err());
//! ```

pub mod holidays;
pub mod service;

pub use holidays::{BusinessCalendar, UnitedStates, WeekendsOnly};
pub use service::{BuiltinCalendars, CalendarService};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::PricingError;

/// Identifier of a registered business-day calendar.
///
/// Parsing is case-insensitive; unrecognised identifiers fail with
/// `PricingError::UnknownCalendar`.
///
/// # Examples
/// ```
/// use pricer_core::calendar::CalendarId;
///
/// assert_eq!("us".parse::<CalendarId>().unwrap(), CalendarId::Us);
/// assert_eq!(CalendarId::WeekendsOnly.code(), "WEEKENDS");
/// assert!("LON".parse::<CalendarId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarId {
    /// United States exchange calendar.
    #[default]
    Us,
    /// Saturday/Sunday weekends only.
    WeekendsOnly,
}

impl CalendarId {
    /// All registered calendars.
    pub const ALL: [CalendarId; 2] = [CalendarId::Us, CalendarId::WeekendsOnly];

    /// Canonical identifier.
    pub fn code(&self) -> &'static str {
        match self {
            CalendarId::Us => "US",
            CalendarId::WeekendsOnly => "WEEKENDS",
        }
    }

    /// Calendar implementation for this identifier.
    pub fn calendar(&self) -> &'static dyn BusinessCalendar {
        match self {
            CalendarId::Us => &UnitedStates,
            CalendarId::WeekendsOnly => &WeekendsOnly,
        }
    }
}

impl FromStr for CalendarId {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" | "NYSE" => Ok(CalendarId::Us),
            "WEEKENDS" | "WEEKENDS_ONLY" | "WEEKENDSONLY" => Ok(CalendarId::WeekendsOnly),
            _ => Err(PricingError::UnknownCalendar(s.to_string())),
        }
    }
}

impl TryFrom<String> for CalendarId {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarId> for String {
    fn from(id: CalendarId) -> Self {
        id.code().to_string()
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_codes() {
        for id in CalendarId::ALL {
            assert_eq!(id.code().parse::<CalendarId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_calendar() {
        assert_eq!(
            "TARGET".parse::<CalendarId>(),
            Err(PricingError::UnknownCalendar("TARGET".to_string()))
        );
    }

    #[test]
    fn test_serde_rejects_unknown() {
        #[derive(Deserialize)]
        struct Holder {
            calendar: CalendarId,
        }

        let ok: Holder = toml::from_str("calendar = \"weekends\"").unwrap();
        assert_eq!(ok.calendar, CalendarId::WeekendsOnly);
        assert!(toml::from_str::<Holder>("calendar = \"XYZ\"").is_err());
    }
}
