//! Price history input.
//!
//! Histories are CSV files with a `date,close` header, one row per trading
//! day in strictly ascending date order:
//!
//! ```text
//! date,close
//! 2024-01-02,185.64
//! 2024-01-03,184.25
//! ```

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use pricer_core::market_data::PriceHistory;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    date: NaiveDate,
    close: f64,
}

/// Dated closing prices of the underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryFile {
    dates: Vec<NaiveDate>,
    history: PriceHistory,
}

impl HistoryFile {
    /// Read a history CSV from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Read a history CSV; `source` names the input in error messages
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut dates: Vec<NaiveDate> = Vec::new();
        let mut prices = Vec::new();
        for (line, record) in reader.deserialize::<HistoryRecord>().enumerate() {
            let record = record?;
            if let Some(previous) = dates.last() {
                if record.date <= *previous {
                    return Err(CliError::invalid_input(
                        source,
                        format!(
                            "row {}: date {} does not follow {}",
                            line + 1,
                            record.date,
                            previous
                        ),
                    ));
                }
            }
            dates.push(record.date);
            prices.push(record.close);
        }

        let history = PriceHistory::new(prices)?;
        debug!(source, observations = history.len(), "history loaded");
        Ok(Self { dates, history })
    }

    /// Observation dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Validated price series
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Date of the reference (last) observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}
