//! # Random Number Generation Infrastructure
//!
//! Seeded pseudo-random number generation for the simulators.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators support seeding for deterministic sequences
//! - **Scoping**: A generator is created per simulation call and never shared
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//!
//! let uniform_value = rng.gen_uniform();
//! let normal_value = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```
//!
//! Normals come from the Ziggurat algorithm (`rand_distr::StandardNormal`)
//! over `rand::rngs::StdRng`.

mod prng;

pub use prng::PricerRng;
