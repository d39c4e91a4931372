//! Error taxonomy for the ETL pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("input resource not found: {0:?}")]
    ResourceNotFound(PathBuf),

    #[error("malformed table {path:?}: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("unexpected value {value:?} in column {column:?}")]
    UnexpectedCategory { column: String, value: String },

    #[error("failed to write output {path:?}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
