//! CLI error types.

use thiserror::Error;

use zerocurve_curves::CurveError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A row of the instrument file could not be turned into an instrument.
    #[error("Invalid instrument on line {line}: {reason}")]
    InvalidRow {
        /// 1-based line in the input file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// The instrument file held no instruments.
    #[error("No instruments found in {0}")]
    NoInstruments(String),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Curve construction error.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
