//! Core value types.
//!
//! This module provides:
//! - `contract`: `ContractSpec` and `OptionType`
//! - `grid`: `TimeSpec`, the year fraction and step count consumed by the engines
//! - `estimate`: `PriceEstimate`, the uniform engine result
//! - `time`: `Date` and `DayCountConvention`
//! - `error`: the `PricingError` taxonomy and `DateError`
//!
//! All of them are immutable values created per pricing call.

pub mod contract;
pub mod error;
pub mod estimate;
pub mod grid;
pub mod time;

// Re-export commonly used types at module level
pub use contract::{intrinsic_value, ContractSpec, OptionType};
pub use error::{DateError, PricingError};
pub use estimate::PriceEstimate;
pub use grid::{validate_expiry, validate_steps, TimeSpec};
pub use time::{Date, DayCountConvention};
