//! # pricer_pricing: American Futures Option Engines (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing holds the numerical engines of the workspace:
//! - CRR binomial lattice with early exercise at every node, plus a
//!   Richardson-accelerated estimate (`lattice`)
//! - Longstaff-Schwartz Monte Carlo with in-the-money regression (`lsm`)
//! - Seeded, stream-splittable random numbers for reproducible simulation (`rng`)
//! - A uniform `PricingEngine` trait over every engine (`engine`)
//! - Advisory cross-engine sanity checks (`sanity`)
//! - Explicit TOML-loadable configuration (`config`)
//! - A primitive-argument public surface (`api`)
//!
//! The Black-76 European reference lives in Layer 2 (`pricer_models`), and
//! calendars and the time grid in Layer 1 (`pricer_core`).
//!
//! ## Usage Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use pricer_core::types::{ContractSpec, TimeSpec};
//! use pricer_pricing::engine::{Black76Engine, EngineId, PricingEngine, RichardsonEngine};
//! use pricer_pricing::sanity::SanityLayer;
//!
//! let call = ContractSpec::new(5000.0, 5000.0, 0.04, 0.20, true).unwrap();
//! let time = TimeSpec::new(0.25, 400).unwrap();
//!
//! let mut results = BTreeMap::new();
//! results.insert(EngineId::Black76, Black76Engine.price(&call, &time).unwrap());
//! results.insert(EngineId::Richardson, RichardsonEngine::default().price(&call, &time).unwrap());
//!
//! assert!(results[&EngineId::Richardson].value >= results[&EngineId::Black76].value);
//! assert!(SanityLayer::default().check(&call, &time, &results).is_empty());
//! ```
//!
//! ## Determinism
//!
//! Every engine is a pure function of its inputs. The Monte Carlo engine
//! draws from an explicitly seeded generator per call and combines parallel
//! partial results in a fixed order, so a seed reproduces a price exactly
//! regardless of the rayon thread count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

pub mod api;
pub mod config;
pub mod engine;
pub mod lattice;
pub mod lsm;
pub mod rng;
pub mod sanity;

// Re-export commonly used items for convenience
pub use config::{ConfigError, PricingConfig};
pub use engine::{
    BinomialEngine, Black76Engine, EngineId, LsmEngine, PricingEngine, RichardsonEngine,
};
pub use sanity::{SanityLayer, Violation};
