//! On-disk layout of a pricing run.
//!
//! ```text
//! <output_dir>/
//!   simulations/<method>.csv          one column per trajectory, one row per step
//!   payoffs/<method>_<option>.csv     trajectory,payoff (+ population comment)
//!   prices.csv                        option type × method point estimates
//!   intervals.csv                     option type × method [lower, upper]
//!   prices.json                       full report, with --format json
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use pricer_pricing::mc::{PathMatrix, SimulationMethod};
use pricer_pricing::path_dependent::{OptionType, PayoffVector};
use pricer_pricing::pricing::{ConfidenceInterval, PayoffStore, ResultTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Point estimate table
pub const PRICES_FILE: &str = "prices.csv";
/// Interval table
pub const INTERVALS_FILE: &str = "intervals.csv";
/// JSON report
pub const REPORT_FILE: &str = "prices.json";

const POPULATION_PREFIX: &str = "# population=";

/// Result rendering on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables
    #[default]
    Table,
    /// Comma separated rows
    Csv,
    /// Pretty-printed JSON report (also written to `prices.json`)
    Json,
}

/// Column headers for a simulation file.
///
/// Antithetic matrices hold `k` originals followed by their `k` mirrors; the
/// mirror of `trajectory_i` is `antithetic_trajectory_i`.
pub fn trajectory_headers(method: SimulationMethod, n_trajectories: usize) -> Vec<String> {
    match method {
        SimulationMethod::Antithetic => {
            let k = n_trajectories / 2;
            (0..k)
                .map(|i| format!("trajectory_{}", i))
                .chain((0..k).map(|i| format!("antithetic_trajectory_{}", i)))
                .collect()
        }
        _ => (0..n_trajectories).map(|i| format!("trajectory_{}", i)).collect(),
    }
}

/// Path of the simulation file for `method`
pub fn simulation_path(dir: &Path, method: SimulationMethod) -> PathBuf {
    dir.join(format!("{}.csv", method.as_str()))
}

/// Writes `matrix` with one column per trajectory and one row per time step
pub fn write_matrix(path: &Path, method: SimulationMethod, matrix: &PathMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(trajectory_headers(method, matrix.n_trajectories()))?;
    for step in 0..matrix.n_points() {
        writer.write_record(matrix.trajectories().map(|row| row[step].to_string()))?;
    }
    writer.flush()?;
    debug!(
        path = %path.display(),
        trajectories = matrix.n_trajectories(),
        points = matrix.n_points(),
        "simulation written"
    );
    Ok(())
}

/// Reads a simulation file written by [`write_matrix`]
pub fn read_matrix(path: &Path) -> Result<PathMatrix> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let n_trajectories = reader.headers()?.len();

    let mut rows: Vec<Vec<f64>> = vec![Vec::new(); n_trajectories];
    for (step, record) in reader.records().enumerate() {
        let record = record?;
        for (column, field) in record.iter().enumerate() {
            let value: f64 = field.trim().parse().map_err(|_| {
                CliError::invalid_input(
                    path.display(),
                    format!("step {} column {}: '{}' is not a number", step, column, field),
                )
            })?;
            rows[column].push(value);
        }
    }
    Ok(PathMatrix::from_rows(rows)?)
}

/// Writes every matrix into `dir`, creating it if needed
pub fn write_matrices(dir: &Path, matrices: &BTreeMap<SimulationMethod, PathMatrix>) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for (&method, matrix) in matrices {
        write_matrix(&simulation_path(dir, method), method, matrix)?;
    }
    info!(dir = %dir.display(), methods = matrices.len(), "simulations saved");
    Ok(())
}

/// Reads the simulation files of `methods` from `dir`
pub fn read_matrices(
    dir: &Path,
    methods: &[SimulationMethod],
) -> Result<BTreeMap<SimulationMethod, PathMatrix>> {
    methods
        .iter()
        .map(|&method| Ok((method, read_matrix(&simulation_path(dir, method))?)))
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
struct PayoffRecord {
    trajectory: usize,
    payoff: f64,
}

/// Payoff vectors persisted as `<method>_<option>.csv` files.
///
/// The first line records the population so that trajectories without an
/// entry (barrier payoffs) still count in later estimates.
#[derive(Debug, Clone)]
pub struct FilePayoffStore {
    dir: PathBuf,
}

impl FilePayoffStore {
    /// Opens a store rooted at `dir`, creating the directory
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens an existing store
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CliError::FileNotFound(dir.display().to_string()));
        }
        Ok(Self { dir })
    }

    /// File holding the vector for `method` and `option`
    pub fn path_for(&self, method: SimulationMethod, option: OptionType) -> PathBuf {
        self.dir
            .join(format!("{}_{}.csv", method.as_str(), option.as_str()))
    }
}

impl PayoffStore for FilePayoffStore {
    type Error = CliError;

    fn store(
        &self,
        method: SimulationMethod,
        option: OptionType,
        payoffs: &PayoffVector,
    ) -> Result<()> {
        let path = self.path_for(method, option);
        let mut file = File::create(&path)?;
        writeln!(file, "{}{}", POPULATION_PREFIX, payoffs.population())?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(["trajectory", "payoff"])?;
        for (&trajectory, &payoff) in payoffs.indices().iter().zip(payoffs.values()) {
            writer.serialize(PayoffRecord { trajectory, payoff })?;
        }
        writer.flush()?;
        Ok(())
    }

    fn load(&self, method: SimulationMethod, option: OptionType) -> Result<Option<PayoffVector>> {
        let path = self.path_for(method, option);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let population = content
            .lines()
            .next()
            .and_then(|line| line.strip_prefix(POPULATION_PREFIX))
            .and_then(|n| n.trim().parse::<usize>().ok())
            .ok_or_else(|| {
                CliError::invalid_input(path.display(), "missing population header line")
            })?;

        let mut reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .from_reader(content.as_bytes());
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for record in reader.deserialize::<PayoffRecord>() {
            let record = record?;
            indices.push(record.trajectory);
            values.push(record.payoff);
        }
        Ok(Some(PayoffVector::new(values, indices, population)?))
    }
}

/// One cell of the JSON report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCell {
    /// Option type
    pub option: OptionType,
    /// Simulation method
    pub method: SimulationMethod,
    /// Discounted mean payoff
    pub price: f64,
    /// `sqrt(sample_variance / n)`
    pub standard_error: f64,
    /// One-standard-error interval
    pub interval: ConfidenceInterval,
    /// Population size
    pub n: usize,
}

/// JSON report of a pricing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    /// Underlying symbol
    pub ticker: String,
    /// Report creation time
    pub generated_at: DateTime<Utc>,
    /// Every filled table cell, row by row
    pub cells: Vec<PriceCell>,
}

impl PriceReport {
    /// Report stamped with the current time
    pub fn new(ticker: &str, table: &ResultTable) -> Self {
        Self::at(ticker, table, Utc::now())
    }

    /// Report stamped with `generated_at`
    pub fn at(ticker: &str, table: &ResultTable, generated_at: DateTime<Utc>) -> Self {
        let cells = table
            .iter()
            .map(|(option, method, estimate)| PriceCell {
                option,
                method,
                price: estimate.mean,
                standard_error: estimate.standard_error(),
                interval: estimate.interval,
                n: estimate.n,
            })
            .collect();
        Self {
            ticker: ticker.to_string(),
            generated_at,
            cells,
        }
    }
}

fn csv_string(rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| CliError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders `table` for stdout
pub fn render(table: &ResultTable, format: OutputFormat, ticker: &str) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format!(
            "Prices\n{}\nOne-standard-error intervals\n{}",
            table,
            table.interval_table()
        )),
        OutputFormat::Csv => {
            let mut out = csv_string(&table.price_rows())?;
            out.push('\n');
            out.push_str(&csv_string(&table.interval_rows())?);
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&PriceReport::new(ticker, table))?),
    }
}

/// Writes `prices.csv`, `intervals.csv` and, for JSON output, `prices.json`
pub fn write_results(
    dir: &Path,
    table: &ResultTable,
    format: OutputFormat,
    ticker: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let prices = dir.join(PRICES_FILE);
    let intervals = dir.join(INTERVALS_FILE);
    write_rows(&prices, &table.price_rows())?;
    write_rows(&intervals, &table.interval_rows())?;
    let mut written = vec![prices, intervals];

    if format == OutputFormat::Json {
        let report = dir.join(REPORT_FILE);
        let file = File::create(&report)?;
        serde_json::to_writer_pretty(file, &PriceReport::new(ticker, table))?;
        written.push(report);
    }
    info!(dir = %dir.display(), files = written.len(), "results saved");
    Ok(written)
}
