//! Monte Carlo path simulation.
//!
//! This module generates trajectories of a single underlying under Geometric
//! Brownian Motion with three sampling strategies:
//!
//! - [`PathSimulator`]: plain Monte Carlo
//! - [`AntitheticSampler`]: reflections of a sample of the naive batch
//! - [`StratifiedSampler`]: starting prices drawn across strata of `[0.8 S0, 1.2 S0]`
//!
//! # Architecture
//!
//! ```text
//! SimulationEngine
//! ├── SimulationParameters  (validated inputs)
//! ├── PricerRng             (one generator per simulation call)
//! └── Methods, in order
//!     ├── PathSimulator      -> naive PathMatrix
//!     ├── AntitheticSampler  -> antithetic PathMatrix (from naive)
//!     └── StratifiedSampler  -> stratified PathMatrix
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{PathSimulator, SimulationParameters};
//!
//! let params = SimulationParameters::builder()
//!     .rate(0.03)
//!     .horizon(0.25)
//!     .n_trajectories(1_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let matrix = PathSimulator::new(100.0, 0.2, &params).unwrap().simulate().unwrap();
//! assert_eq!(matrix.n_points(), 250);
//! ```

mod antithetic;
mod config;
mod engine;
mod matrix;
mod paths;
mod stratified;

pub use antithetic::AntitheticSampler;
pub use config::{
    SimulationParameters, SimulationParametersBuilder, StratumAllocation, MAX_HORIZON_STEPS,
    MAX_MATRIX_CELLS, MAX_TRAJECTORIES, STEPS_PER_YEAR,
};
pub use engine::{SimulationEngine, SimulationMethod};
pub use matrix::PathMatrix;
pub use paths::{GbmParams, PathSimulator};
pub use stratified::{Strata, StratifiedSampler, BAND_LOWER, BAND_UPPER};
