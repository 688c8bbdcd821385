//! # Pricer Models (L2: Models)
//!
//! Closed-form futures option models and exercise definitions.
//!
//! This crate provides:
//! - Black-76 European reference pricing (`analytical::black76`)
//! - Standard normal distribution functions (`analytical::distributions`)
//! - Exercise styles consumed by the lattice engine (`instruments`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the closed-form formulas
//! - **Model-local errors** (`AnalyticalError`) converting into
//!   `pricer_core::types::PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
