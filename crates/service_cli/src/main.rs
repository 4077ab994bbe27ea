//! mcprice - Monte Carlo exotic option pricing from the command line
//!
//! # Commands
//!
//! - `mcprice simulate` - Simulate trajectories from a price history
//! - `mcprice price` - Price all options over saved simulations
//! - `mcprice run` - Simulate and price
//! - `mcprice check` - Validate configuration and inputs

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::config::PricingConfig;
use service_cli::logging::LogFilter;
use service_cli::output::OutputFormat;
use service_cli::{commands, CliError, Result};
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "mcprice.toml";

/// Monte Carlo exotic option pricer
#[derive(Parser)]
#[command(name = "mcprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults apply when mcprice.toml is absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Result output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Underlying symbol, overrides [general].ticker
    #[arg(short, long, global = true)]
    ticker: Option<String>,

    /// Price history CSV, overrides [general].history_file
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Output directory, overrides [general].output_dir
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate trajectories for every sampling method
    Simulate,

    /// Price every option over previously simulated trajectories
    Price {
        /// Re-estimate from stored payoff files instead of simulations
        #[arg(long)]
        from_payoffs: bool,
    },

    /// Simulate and price in one pass
    Run,

    /// Check configuration and price history
    Check,
}

fn load_config(cli: &Cli) -> Result<PricingConfig> {
    let mut config = match &cli.config {
        Some(path) => PricingConfig::from_file(path)?,
        None if PathBuf::from(DEFAULT_CONFIG).exists() => {
            PricingConfig::from_file(&PathBuf::from(DEFAULT_CONFIG))?
        }
        None => PricingConfig::default(),
    };
    config.apply_env()?;

    if let Some(ticker) = &cli.ticker {
        config.general.ticker = ticker.clone();
    }
    if let Some(history) = &cli.history {
        config.general.history_file = history.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.general.output_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over both --verbose and the configured level
    let log_filter = LogFilter::init(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    load_config(&cli)
        .and_then(|config| {
            log_filter.apply(config.general.log_level);
            execute(&cli, &config)
        })
        .map_err(|err: CliError| {
            error!("{}", err);
            err
        })
}

fn execute(cli: &Cli, config: &PricingConfig) -> Result<()> {
    match &cli.command {
        Commands::Simulate => commands::simulate::run(config).map(|_| ()),
        Commands::Price { from_payoffs } => {
            commands::price::run(config, cli.format, *from_payoffs).map(|_| ())
        }
        Commands::Run => commands::run::run(config, cli.format).map(|_| ()),
        Commands::Check => commands::check::run(config).map(|_| ()),
    }
}
