//! Error types for the mcprice CLI.

use pricer_core::types::PricingError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Simulation or pricing failure
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Configuration failed validation
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Malformed input file
    #[error("Invalid input in {path}: {reason}")]
    InvalidInput {
        /// Offending file
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parse error
    #[error("Configuration file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(path: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
