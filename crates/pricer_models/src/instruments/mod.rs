//! Instrument definitions.
//!
//! Contract terms live in `pricer_core::types::ContractSpec`; this module
//! adds the exercise rights the engines need to distinguish.

mod exercise;

pub use exercise::ExerciseStyle;
