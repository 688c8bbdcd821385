//! # Longstaff-Schwartz Monte Carlo Engine
//!
//! Regression-based valuation of American futures options on simulated
//! driftless lognormal paths.
//!
//! ## Module Structure
//!
//! - [`config`]: `LsmConfig` and its builder
//! - [`paths`]: `PathBundle` simulation in independently seeded blocks
//! - [`basis`]: `RegressionBasis` and the block-mergeable `NormalEquations`
//! - [`pricer`]: backward induction (`price_lsm`, `price_lsm_detailed`)
//!
//! ## Parallelism
//!
//! Path simulation, regression accumulation and exercise decisions run
//! across rayon worker threads within a date; dates are processed strictly
//! backwards. Floating-point reductions are combined in block order, so a
//! given seed yields bit-identical prices on any number of threads.

pub mod basis;
pub mod config;
pub mod paths;
pub mod pricer;

pub use basis::{NormalEquations, RegressionBasis, MAX_DEGREE};
pub use config::{LsmConfig, LsmConfigBuilder, MAX_PATHS, MAX_PATH_POINTS, MAX_STEPS};
pub use paths::{PathBundle, PATH_BLOCK_SIZE};
pub use pricer::{price_lsm, price_lsm_detailed, LsmDiagnostics, LsmResult};
