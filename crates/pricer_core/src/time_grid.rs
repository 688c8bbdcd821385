//! Calendar-aware time discretisation.
//!
//! [`TimeGrid`] turns a valuation/expiry date pair and a calendar identifier
//! into a [`TimeSpec`]: the Actual/365 Fixed year fraction and a recommended
//! step count. The step count is the configured floor unless the number of
//! business days to expiry exceeds it, so long-dated contracts still get at
//! least one step per trading day.
//!
//! # Examples
//!
//! ```
//! use pricer_core::time_grid::TimeGrid;
//! use pricer_core::types::Date;
//!
//! let grid = TimeGrid::default();
//! let valuation = Date::from_ymd(2024, 1, 2).unwrap();
//! let expiry = Date::from_ymd(2024, 4, 1).unwrap();
//!
//! let spec = grid.compute(valuation, expiry, "US").unwrap();
//! assert_eq!(spec.steps, 1200);
//! assert!((spec.expiry - 90.0 / 365.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::calendar::{BuiltinCalendars, CalendarId, CalendarService};
use crate::types::{Date, PricingError, TimeSpec};

/// Default minimum number of steps.
pub const DEFAULT_STEP_FLOOR: usize = 1200;

/// Explicit time-grid configuration.
///
/// # Examples
/// ```
/// use pricer_core::calendar::CalendarId;
/// use pricer_core::time_grid::TimeGridConfig;
///
/// let config: TimeGridConfig = toml::from_str("calendar = \"WEEKENDS\"\nstep_floor = 500").unwrap();
/// assert_eq!(config.calendar, CalendarId::WeekendsOnly);
/// assert_eq!(config.step_floor, 500);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGridConfig {
    /// Default calendar
    pub calendar: CalendarId,
    /// Minimum number of steps
    pub step_floor: usize,
}

impl Default for TimeGridConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarId::Us,
            step_floor: DEFAULT_STEP_FLOOR,
        }
    }
}

impl TimeGridConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// `PricingError::InvalidStepCount` if the floor is zero.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.step_floor == 0 {
            return Err(PricingError::InvalidStepCount(self.step_floor));
        }
        Ok(())
    }
}

/// Time-grid façade over a calendar service.
#[derive(Clone)]
pub struct TimeGrid {
    config: TimeGridConfig,
    service: Arc<dyn CalendarService>,
}

impl std::fmt::Debug for TimeGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeGrid")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            config: TimeGridConfig::default(),
            service: Arc::new(BuiltinCalendars),
        }
    }
}

impl TimeGrid {
    /// Grid with the built-in calendars and a validated configuration.
    pub fn new(config: TimeGridConfig) -> Result<Self, PricingError> {
        Self::with_service(config, Arc::new(BuiltinCalendars))
    }

    /// Grid backed by an injected calendar service.
    pub fn with_service(
        config: TimeGridConfig,
        service: Arc<dyn CalendarService>,
    ) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config, service })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &TimeGridConfig {
        &self.config
    }

    /// Year fraction and step count between two dates.
    ///
    /// # Errors
    /// - `PricingError::InvalidDateRange` if `expiry <= valuation`
    /// - `PricingError::UnknownCalendar` if the calendar is not registered
    pub fn compute(
        &self,
        valuation: Date,
        expiry: Date,
        calendar_id: &str,
    ) -> Result<TimeSpec, PricingError> {
        if expiry <= valuation {
            return Err(PricingError::InvalidDateRange {
                valuation: valuation.to_string(),
                expiry: expiry.to_string(),
            });
        }

        let year_fraction = self.service.year_fraction(valuation, expiry, calendar_id)?;
        let business_days = self
            .service
            .business_day_count(valuation, expiry, calendar_id)?;
        let steps = self.config.step_floor.max(business_days);

        tracing::debug!(
            %valuation,
            %expiry,
            calendar = calendar_id,
            year_fraction,
            business_days,
            steps,
            "time grid computed"
        );

        TimeSpec::new(year_fraction, steps)
    }

    /// [`compute`](Self::compute) on the configured default calendar.
    pub fn compute_default(&self, valuation: Date, expiry: Date) -> Result<TimeSpec, PricingError> {
        self.compute(valuation, expiry, self.config.calendar.code())
    }
}
