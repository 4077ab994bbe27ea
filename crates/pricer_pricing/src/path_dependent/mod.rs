//! Path-dependent payoff infrastructure.
//!
//! This module evaluates the six option structures over simulated path
//! matrices: vanilla, arithmetic and geometric Asian, knock-in and knock-out
//! barrier, and floating-strike lookback calls.
//!
//! # Key Components
//!
//! - [`PathObserver`]: Streaming statistics accumulation for path observations
//! - [`PathDependentPayoff`]: Trait for payoff computation from statistics
//! - [`OptionType`]: The option catalogue, dispatching to [`PathPayoffType`]
//! - [`PayoffEngine`]: Discounted payoffs over a whole [`PathMatrix`](crate::mc::PathMatrix)

mod asian;
mod barrier;
mod engine;
mod lookback;
mod observer;
mod params;
mod payoff;
mod payoff_type;
mod vanilla;

pub use asian::{AsianArithmeticPayoff, AsianGeometricPayoff};
pub use barrier::{BarrierPayoff, BarrierType};
pub use engine::{PayoffEngine, PayoffVector};
pub use lookback::LookbackPayoff;
pub use observer::PathObserver;
pub use params::OptionParameters;
pub use payoff::PathDependentPayoff;
pub use payoff_type::{OptionType, PathPayoffType};
pub use vanilla::VanillaCallPayoff;
