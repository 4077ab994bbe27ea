//! # mcprice service layer
//!
//! Command line glue around `pricer_pricing`:
//! - [`config`]: TOML configuration with `MCPRICE_*` environment overrides
//! - [`input`]: `date,close` price history files
//! - [`output`]: simulation, payoff and result files, stdout rendering
//! - [`commands`]: `simulate`, `price`, `run` and `check`
//! - [`logging`]: tracing subscriber with a reloadable level filter
//!
//! # Commands
//!
//! - `mcprice simulate` - History to simulated trajectories on disk
//! - `mcprice price` - Simulated trajectories to payoffs and price tables
//! - `mcprice run` - Both in one pass
//! - `mcprice check` - Validate configuration and history

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;

pub use error::{CliError, Result};
