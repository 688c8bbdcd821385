//! # pricer_core: Foundation Types for Futures Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-layer workspace, providing:
//! - Contract and result value types: `ContractSpec`, `TimeSpec`, `PriceEstimate` (`types`)
//! - The shared error taxonomy: `PricingError`, `DateError` (`types::error`)
//! - Dates and day counts: `Date`, `DayCountConvention` (`types::time`)
//! - Business-day calendars and the `CalendarService` trait (`calendar`)
//! - Calendar-aware discretisation: `TimeGrid`, `TimeGridConfig` (`time_grid`)
//!
//! ## Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Generic float helpers shared with the analytical models
//! - chrono: Date arithmetic
//! - serde: Configuration and value serialisation
//! - thiserror: Error derivation
//! - tracing: Structured diagnostics
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::time_grid::TimeGrid;
//! use pricer_core::types::{ContractSpec, Date};
//!
//! let contract = ContractSpec::new(5000.0, 5000.0, 0.04, 0.20, true).unwrap();
//! assert_eq!(contract.intrinsic(), 0.0);
//!
//! let valuation = Date::from_ymd(2024, 3, 15).unwrap();
//! let expiry = Date::from_ymd(2024, 6, 14).unwrap();
//! let time = TimeGrid::default().compute(valuation, expiry, "US").unwrap();
//! assert_eq!(time.steps, 1200);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calendar;
pub mod time_grid;
pub mod types;
