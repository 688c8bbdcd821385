//! Calendar service consumed by the time grid.

use crate::types::{Date, DayCountConvention, PricingError};

use super::CalendarId;

/// Year fractions and business-day counts by calendar identifier.
///
/// Lookups are synchronous and deterministic. Unknown identifiers fail with
/// `PricingError::UnknownCalendar`.
pub trait CalendarService: Send + Sync {
    /// Actual/365 Fixed year fraction from `start` to `end`.
    fn year_fraction(&self, start: Date, end: Date, calendar_id: &str) -> Result<f64, PricingError>;

    /// Business days in `(start, end]` under the named calendar.
    fn business_day_count(
        &self,
        start: Date,
        end: Date,
        calendar_id: &str,
    ) -> Result<usize, PricingError>;
}

/// Default service backed by the built-in calendar registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCalendars;

impl BuiltinCalendars {
    /// Resolves an identifier against the registry.
    pub fn resolve(&self, calendar_id: &str) -> Result<CalendarId, PricingError> {
        calendar_id.parse()
    }
}

impl CalendarService for BuiltinCalendars {
    fn year_fraction(&self, start: Date, end: Date, calendar_id: &str) -> Result<f64, PricingError> {
        self.resolve(calendar_id)?;
        Ok(DayCountConvention::ActualFixed365.year_fraction(start, end))
    }

    fn business_day_count(
        &self,
        start: Date,
        end: Date,
        calendar_id: &str,
    ) -> Result<usize, PricingError> {
        let id = self.resolve(calendar_id)?;
        Ok(id
            .calendar()
            .business_days_between(start.into_inner(), end.into_inner()))
    }
}
