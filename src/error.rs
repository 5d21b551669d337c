//! Error types for the regression calculator.
//!
//! Every failure a user action can trigger has its own variant so the
//! session layer can turn it into a notification instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for regression calculator operations.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Errors that can occur while loading data, fitting or predicting.
#[derive(Debug, Error)]
pub enum RegressionError {
    /// The chosen file does not carry a `.csv` extension.
    #[error("Not a CSV file: {}", path.display())]
    InvalidFileSelection { path: PathBuf },

    /// Calculate was triggered before any CSV was selected.
    #[error("No CSV file has been loaded")]
    NoFileSelected,

    /// One or both requested columns are absent from the header.
    #[error("Column(s) not found in header: {}", missing.join(", "))]
    MissingColumn { missing: Vec<String> },

    /// The file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed delimited table.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A selected column holds a value that is not a finite number.
    #[error("Column '{column}' row {row}: '{value}' is not a number")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// The data cannot define a regression line (no rows, constant x, ...).
    #[error("Could not fit regression: {0}")]
    DegenerateFit(String),

    /// Prediction requested before any successful fit.
    #[error("No regression model has been fitted yet")]
    PredictionWithoutModel,

    /// The prediction field does not hold an integer.
    #[error("'{input}' is not a valid integer")]
    InvalidPredictionInput { input: String },
}

impl RegressionError {
    /// Create an Io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the failures that come from reading or parsing the file.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Csv(_) | Self::NonNumeric { .. }
        )
    }
}
