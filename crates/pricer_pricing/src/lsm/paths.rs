//! Futures path simulation for the Longstaff-Schwartz engine.
//!
//! Paths follow the driftless lognormal process of a futures price under
//! the pricing measure, simulated exactly in log space:
//! ```text
//! F(t+dt) = F(t) × exp(-0.5σ²dt + σ√dt × Z)
//! ```
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `data[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial futures price.
//!
//! # Reproducibility
//!
//! Paths are generated in blocks of [`PATH_BLOCK_SIZE`]. Block `b` draws from
//! the random stream `(seed, b)`, so the bundle is identical for a given seed
//! whatever the number of worker threads.

use rayon::prelude::*;

use crate::rng::PricerRng;

/// Number of paths sharing one random stream and one regression partial sum.
pub const PATH_BLOCK_SIZE: usize = 1024;

/// Simulated futures trajectories owned by one pricing call.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsm::PathBundle;
///
/// let bundle = PathBundle::simulate(100.0, 0.2, 1.0 / 50.0, 1_000, 50, 7);
/// assert_eq!(bundle.n_paths(), 1_000);
/// assert_eq!(bundle.path(0).len(), 51);
/// assert_eq!(bundle.price(42, 0), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathBundle {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
    seed: u64,
}

impl PathBundle {
    /// Simulates `n_paths` trajectories of `n_steps` steps of length `dt`.
    ///
    /// Inputs are assumed validated by the caller.
    pub fn simulate(
        forward: f64,
        volatility: f64,
        dt: f64,
        n_paths: usize,
        n_steps: usize,
        seed: u64,
    ) -> Self {
        let stride = n_steps + 1;
        let mut data = vec![0.0; n_paths * stride];

        let drift_dt = -0.5 * volatility * volatility * dt;
        let vol_sqrt_dt = volatility * dt.sqrt();

        data.par_chunks_mut(PATH_BLOCK_SIZE * stride)
            .enumerate()
            .for_each(|(block, chunk)| {
                let mut rng = PricerRng::for_stream(seed, block as u64);
                for row in chunk.chunks_mut(stride) {
                    // Normals first, then turned into prices in place
                    rng.fill_normal(&mut row[1..]);
                    row[0] = forward;
                    for step in 1..stride {
                        row[step] = row[step - 1] * (drift_dt + vol_sqrt_dt * row[step]).exp();
                    }
                }
            });

        Self {
            data,
            n_paths,
            n_steps,
            seed,
        }
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed the bundle was generated from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of path blocks.
    #[inline]
    pub fn n_blocks(&self) -> usize {
        self.n_paths.div_ceil(PATH_BLOCK_SIZE)
    }

    /// Futures price of path `path` at step `step`.
    #[inline]
    pub fn price(&self, path: usize, step: usize) -> f64 {
        self.data[path * (self.n_steps + 1) + step]
    }

    /// Full trajectory of one path.
    #[inline]
    pub fn path(&self, path: usize) -> &[f64] {
        let stride = self.n_steps + 1;
        &self.data[path * stride..(path + 1) * stride]
    }
}
