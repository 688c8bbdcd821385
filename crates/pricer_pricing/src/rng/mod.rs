//! # Random Number Generation Infrastructure
//!
//! Seeded pseudo-random number generation for the Longstaff-Schwartz engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is created from an explicit seed;
//!   there is no process-wide random state
//! - **Call-local state**: a generator lives for one pricing call only
//! - **Streams**: parallel path blocks draw from independent streams derived
//!   from `(seed, stream)`, so results do not depend on thread scheduling
//! - **Efficiency**: zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//! let normal_value = rng.gen_normal();
//!
//! // Independent stream for block 3 of the same simulation
//! let mut block_rng = PricerRng::for_stream(12345, 3);
//! let mut buffer = vec![0.0; 1000];
//! block_rng.fill_normal(&mut buffer);
//! ```

mod prng;

// Public re-exports
pub use prng::{derive_stream_seed, PricerRng};
