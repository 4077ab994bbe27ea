//! # Pricer Pricing (Monte Carlo Engine)
//!
//! ## Role
//!
//! pricer_pricing is the simulation and pricing kernel of the workspace:
//! - Seeded random number generation ([`rng`])
//! - GBM path simulation with naive, antithetic and stratified sampling ([`mc`])
//! - Path-dependent payoffs over simulated matrices ([`path_dependent`])
//! - Price estimates with one-standard-error intervals ([`pricing`])
//! - Closed-form reference prices ([`analytical`])
//!
//! It depends only on `pricer_core` for the error taxonomy and sample
//! statistics. Reading price history, configuration and persistence are left
//! to the service layer.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::{SimulationEngine, SimulationMethod, SimulationParameters};
//! use pricer_pricing::path_dependent::{OptionParameters, OptionType};
//! use pricer_pricing::pricing::{InMemoryPayoffStore, PricingEngine};
//!
//! let params = SimulationParameters::builder()
//!     .rate(0.03)
//!     .horizon(0.1)
//!     .n_trajectories(2_000)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let discount = params.discount_factor();
//!
//! let matrices = SimulationEngine::new(100.0, 0.25, params).run().unwrap();
//! let engine = PricingEngine::new(OptionParameters::new(1.0, 1.1, 1.1).unwrap(), discount).unwrap();
//! let table = engine.price_all(&matrices, &InMemoryPayoffStore::new()).unwrap();
//!
//! let vanilla = table.get(OptionType::Vanilla, SimulationMethod::Naive).unwrap();
//! assert!(vanilla.mean > 0.0);
//! println!("{}", table);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

pub mod analytical;
pub mod mc;
pub mod path_dependent;
pub mod pricing;
pub mod rng;

pub use mc::{PathMatrix, SimulationEngine, SimulationMethod, SimulationParameters};
pub use path_dependent::{OptionParameters, OptionType, PayoffEngine, PayoffVector};
pub use pricing::{PriceEstimate, PricingEngine, ResultTable};
