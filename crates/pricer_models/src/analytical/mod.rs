//! Analytical pricing formulas for European options on futures.
//!
//! This module provides:
//! - Black-76 closed form (`Black76`, `black76_price`)
//! - Standard normal distribution functions
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: formulas work for `f64` and `f32`
//! - **Exact expiry handling**: `T == 0` returns intrinsic value without division
//! - **Numerical Stability**: double-precision rational CDF

pub mod black76;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black76::{black76_price, Black76};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
