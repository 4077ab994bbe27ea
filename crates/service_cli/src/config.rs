//! Pricing run configuration
//!
//! Loaded from a TOML file with `[general]`, `[simulation]` and `[option]`
//! sections, then overridden by `MCPRICE_*` environment variables and finally
//! by command line flags.
//!
//! ```toml
//! [general]
//! ticker = "AAPL"
//! history_file = "data/AAPL.csv"
//! output_dir = "data"
//! log_level = "info"
//!
//! [simulation]
//! risk_free_rate = 0.03
//! horizon = 1.0
//! n_trajectories = 1000
//! use_seed = true
//! seed = 42
//!
//! [option]
//! strike_multiplier = 1.0
//! knock_in_barrier_multiplier = 1.1
//! knock_out_barrier_multiplier = 1.1
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_pricing::mc::{
    SimulationParameters, StratumAllocation, MAX_HORIZON_STEPS, MAX_TRAJECTORIES, STEPS_PER_YEAR,
};
use pricer_pricing::path_dependent::OptionParameters;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Environment variable overriding the seed (implies `use_seed = true`)
pub const ENV_SEED: &str = "MCPRICE_SEED";
/// Environment variable overriding the trajectory count
pub const ENV_TRAJECTORIES: &str = "MCPRICE_TRAJECTORIES";
/// Environment variable overriding the output directory
pub const ENV_OUTPUT_DIR: &str = "MCPRICE_OUTPUT_DIR";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "MCPRICE_LOG_LEVEL";
/// Environment variable overriding the history file
pub const ENV_HISTORY_FILE: &str = "MCPRICE_HISTORY_FILE";

/// Log levels accepted in `[general]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Per-payoff and per-matrix detail
    Debug,
    /// One line per simulation method and pricing run
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "invalid log level '{}', expected one of: trace, debug, info, warn, error",
                s
            )),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_allocation<'de, D>(
    deserializer: D,
) -> std::result::Result<StratumAllocation, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    StratumAllocation::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[general]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Underlying symbol, used to label reports
    pub ticker: String,
    /// CSV of `date,close` observations
    pub history_file: PathBuf,
    /// Root of `simulations/`, `payoffs/` and the result tables
    pub output_dir: PathBuf,
    /// Default log level when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            ticker: "AAPL".to_string(),
            history_file: PathBuf::from("data/history.csv"),
            output_dir: PathBuf::from("data"),
            log_level: LogLevel::Info,
        }
    }
}

/// `[simulation]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Continuously compounded annual rate
    pub risk_free_rate: f64,
    /// Horizon in years
    pub horizon: f64,
    /// Trading days per year
    pub trading_days: u32,
    /// Trajectories per method
    pub n_trajectories: usize,
    /// Strata for stratified sampling
    pub n_strata: usize,
    /// Share of naive trajectories mirrored by antithetic sampling
    pub antithetic_proportion: f64,
    /// When `false`, `seed` is ignored and runs draw from entropy
    pub use_seed: bool,
    /// Seed for reproducible runs
    pub seed: u64,
    /// Starting stratum rule for stratified sampling
    #[serde(deserialize_with = "deserialize_allocation")]
    pub stratum_allocation: StratumAllocation,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.03,
            horizon: 1.0,
            trading_days: 252,
            n_trajectories: 1_000,
            n_strata: 10,
            antithetic_proportion: 0.5,
            use_seed: true,
            seed: 42,
            stratum_allocation: StratumAllocation::Reference,
        }
    }
}

/// `[option]` section, all levels as multiples of the reference price
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionConfig {
    /// Strike multiplier
    pub strike_multiplier: f64,
    /// Knock-in barrier multiplier
    pub knock_in_barrier_multiplier: f64,
    /// Knock-out barrier multiplier
    pub knock_out_barrier_multiplier: f64,
}

impl Default for OptionConfig {
    fn default() -> Self {
        Self {
            strike_multiplier: 1.0,
            knock_in_barrier_multiplier: 1.1,
            knock_out_barrier_multiplier: 1.1,
        }
    }
}

/// Complete configuration of a pricing run
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// `[general]`
    pub general: GeneralConfig,
    /// `[simulation]`
    pub simulation: SimulationConfig,
    /// `[option]`
    pub option: OptionConfig,
}

impl PricingConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `MCPRICE_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `MCPRICE_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();

        if let Some(seed) = lookup(ENV_SEED) {
            match seed.trim().parse() {
                Ok(seed) => {
                    self.simulation.seed = seed;
                    self.simulation.use_seed = true;
                }
                Err(_) => problems.push(format!("{} must be an unsigned integer, got '{}'", ENV_SEED, seed)),
            }
        }
        if let Some(n) = lookup(ENV_TRAJECTORIES) {
            match n.trim().parse() {
                Ok(n) => self.simulation.n_trajectories = n,
                Err(_) => problems.push(format!(
                    "{} must be an unsigned integer, got '{}'",
                    ENV_TRAJECTORIES, n
                )),
            }
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.general.output_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            match LogLevel::from_str(&level) {
                Ok(level) => self.general.log_level = level,
                Err(reason) => problems.push(format!("{}: {}", ENV_LOG_LEVEL, reason)),
            }
        }
        if let Some(path) = lookup(ENV_HISTORY_FILE) {
            self.general.history_file = PathBuf::from(path);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(problems))
        }
    }

    /// Seed used by the run, `None` when seeding is disabled
    pub fn seed(&self) -> Option<u64> {
        self.simulation.use_seed.then_some(self.simulation.seed)
    }

    /// Check every field, reporting all problems at once
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        let opt = &self.option;
        let mut problems = Vec::new();

        if self.general.ticker.trim().is_empty() {
            problems.push("general.ticker must not be empty".to_string());
        }
        if !sim.risk_free_rate.is_finite() {
            problems.push(format!("simulation.risk_free_rate must be finite, got {}", sim.risk_free_rate));
        }
        if !(sim.horizon.is_finite() && sim.horizon > 0.0) {
            problems.push(format!("simulation.horizon must be positive, got {}", sim.horizon));
        } else if sim.horizon * STEPS_PER_YEAR > MAX_HORIZON_STEPS as f64 {
            problems.push(format!("simulation.horizon {} exceeds {} steps", sim.horizon, MAX_HORIZON_STEPS));
        }
        if sim.trading_days == 0 {
            problems.push("simulation.trading_days must be positive".to_string());
        }
        if sim.n_trajectories == 0 || sim.n_trajectories > MAX_TRAJECTORIES {
            problems.push(format!(
                "simulation.n_trajectories must be in 1..={}, got {}",
                MAX_TRAJECTORIES, sim.n_trajectories
            ));
        }
        if sim.n_strata == 0 {
            problems.push("simulation.n_strata must be positive".to_string());
        }
        if !(sim.antithetic_proportion > 0.0 && sim.antithetic_proportion <= 1.0) {
            problems.push(format!(
                "simulation.antithetic_proportion must be in (0, 1], got {}",
                sim.antithetic_proportion
            ));
        }
        for (name, value) in [
            ("option.strike_multiplier", opt.strike_multiplier),
            ("option.knock_in_barrier_multiplier", opt.knock_in_barrier_multiplier),
            ("option.knock_out_barrier_multiplier", opt.knock_out_barrier_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{} must be positive, got {}", name, value));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(problems))
        }
    }

    /// Validated simulation parameters
    pub fn simulation_parameters(&self) -> Result<SimulationParameters> {
        let sim = &self.simulation;
        Ok(SimulationParameters::builder()
            .rate(sim.risk_free_rate)
            .horizon(sim.horizon)
            .trading_days(sim.trading_days)
            .n_trajectories(sim.n_trajectories)
            .n_strata(sim.n_strata)
            .antithetic_proportion(sim.antithetic_proportion)
            .maybe_seed(self.seed())
            .stratum_allocation(sim.stratum_allocation)
            .build()?)
    }

    /// Validated option parameters
    pub fn option_parameters(&self) -> Result<OptionParameters> {
        Ok(OptionParameters::new(
            self.option.strike_multiplier,
            self.option.knock_in_barrier_multiplier,
            self.option.knock_out_barrier_multiplier,
        )?)
    }

    /// `<output_dir>/simulations`
    pub fn simulations_dir(&self) -> PathBuf {
        self.general.output_dir.join("simulations")
    }

    /// `<output_dir>/payoffs`
    pub fn payoffs_dir(&self) -> PathBuf {
        self.general.output_dir.join("payoffs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.general.log_level, LogLevel::Info);
        let params = config.simulation_parameters().unwrap();
        assert_eq!(params.horizon_steps(), 1000);
    }

    #[test]
    fn test_parse_sections() {
        let config = PricingConfig::from_toml_str(
            r#"
            [general]
            ticker = "MSFT"
            output_dir = "out"
            log_level = "DEBUG"

            [simulation]
            risk_free_rate = 0.05
            horizon = 0.5
            n_trajectories = 250
            use_seed = false
            stratum_allocation = "proportional"

            [option]
            strike_multiplier = 0.95
            "#,
        )
        .unwrap();

        assert_eq!(config.general.ticker, "MSFT");
        assert_eq!(config.general.output_dir, PathBuf::from("out"));
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.simulation.n_trajectories, 250);
        assert_eq!(config.simulation.stratum_allocation, StratumAllocation::Proportional);
        assert_eq!(config.seed(), None);
        // Unset fields keep their defaults
        assert_eq!(config.simulation.trading_days, 252);
        assert_eq!(config.option.knock_in_barrier_multiplier, 1.1);
        assert_eq!(config.option.strike_multiplier, 0.95);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = PricingConfig::from_toml_str("[simulation]\nn_paths = 10\n").unwrap_err();
        assert!(matches!(err, CliError::Toml(_)));
    }

    #[test]
    fn test_bad_allocation_rejected() {
        let err = PricingConfig::from_toml_str("[simulation]\nstratum_allocation = \"random\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("random"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PricingConfig::default();
        config.simulation.use_seed = false;
        config
            .apply_overrides(lookup(&[
                (ENV_SEED, "7"),
                (ENV_TRAJECTORIES, "64"),
                (ENV_OUTPUT_DIR, "/tmp/mc"),
                (ENV_LOG_LEVEL, "warn"),
                (ENV_HISTORY_FILE, "prices.csv"),
            ]))
            .unwrap();

        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.simulation.n_trajectories, 64);
        assert_eq!(config.general.output_dir, PathBuf::from("/tmp/mc"));
        assert_eq!(config.general.log_level, LogLevel::Warn);
        assert_eq!(config.general.history_file, PathBuf::from("prices.csv"));
    }

    #[test]
    fn test_env_overrides_report_every_problem() {
        let mut config = PricingConfig::default();
        let err = config
            .apply_overrides(lookup(&[(ENV_SEED, "abc"), (ENV_LOG_LEVEL, "loud")]))
            .unwrap_err();
        match err {
            CliError::Validation(problems) => assert_eq!(problems.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let mut config = PricingConfig::default();
        config.simulation.horizon = 0.0;
        config.simulation.n_trajectories = 0;
        config.simulation.antithetic_proportion = 1.5;
        config.option.strike_multiplier = -1.0;

        match config.validate().unwrap_err() {
            CliError::Validation(problems) => {
                assert_eq!(problems.len(), 4);
                assert!(problems[0].contains("horizon"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PricingConfig::from_file(Path::new("/nonexistent/mcprice.toml")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
