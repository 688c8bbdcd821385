//! # Binomial Lattice Engine
//!
//! Cox-Ross-Rubinstein recombining tree calibrated to the driftless futures
//! measure, with early exercise tested at every node and a Richardson
//! accelerated estimate.
//!
//! ## Module Structure
//!
//! - [`params`]: `LatticeParams` derivation and degeneracy checks
//! - [`binomial`]: backward induction (`price_binomial`)
//! - [`richardson`]: two-run extrapolation (`price_richardson`, `RichardsonPairing`)
//!
//! ## Complexity
//!
//! O(steps²) time and O(steps) memory per backward pass.

pub mod binomial;
pub mod params;
pub mod richardson;

pub use binomial::price_binomial;
pub use params::{max_log_spread, LatticeParams, MIN_BRANCH_SPREAD};
pub use richardson::{extrapolate, price_richardson, RichardsonPairing};
