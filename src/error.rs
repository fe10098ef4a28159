use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors (fatal at startup)
// ---------------------------------------------------------------------------

/// Everything that can go wrong while reading the trip table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("malformed source: {0}")]
    Malformed(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: column '{column}' has unparseable timestamp '{value}'")]
    InvalidTimestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Query-time errors (recoverable at the query boundary)
// ---------------------------------------------------------------------------

/// A query was called with a parameter outside the fixed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid {kind}: '{value}'")]
    InvalidParameter { kind: &'static str, value: String },
}

impl QueryError {
    pub fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        QueryError::InvalidParameter {
            kind,
            value: value.into(),
        }
    }
}
