//! # Sanity Layer
//!
//! Advisory cross-validation of engine results against each other and
//! against theoretical bounds. Findings are returned as [`Violation`]
//! values; nothing in this module fails a pricing call.
//!
//! ## Module Structure
//!
//! - [`checks`]: `SanityLayer` and the individual checks
//! - [`config`]: `SanityConfig` tolerances
//! - [`oracle`]: optional `AmericanOracle` provider and the `Capabilities` registry
//! - [`violation`]: the `Violation` data type

pub mod checks;
pub mod config;
pub mod oracle;
pub mod violation;

pub use checks::SanityLayer;
pub use config::SanityConfig;
pub use oracle::{AmericanOracle, Capabilities};
pub use violation::Violation;
