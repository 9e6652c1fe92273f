//! Error types for identification operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for identification operations.
pub type IdentResult<T> = Result<T, IdentError>;

/// Errors raised while loading a trace or estimating plant parameters.
#[derive(Debug, Error)]
pub enum IdentError {
    #[error("Trace is empty")]
    EmptyTrace,

    #[error("Trace columns differ in length (time={time}, input={input}, output={output})")]
    LengthMismatch {
        time: usize,
        input: usize,
        output: usize,
    },

    #[error("Time base decreases at sample {index}")]
    NonMonotonicTime { index: usize },

    #[error("Step amplitude is zero; gain K is undefined")]
    ZeroStepAmplitude,

    #[error("Output never reaches {threshold} (threshold for the time constant)")]
    ThresholdNotReached { threshold: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Failed to read dataset: {path}")]
    DatasetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {message}")]
    DatasetParse { message: String },

    #[error("Dataset record not found: {name}")]
    MissingRecord { name: String },

    #[error("Record '{record}' row {row} has {len} columns, expected at least 2")]
    RowShape {
        record: String,
        row: usize,
        len: usize,
    },

    #[error("Unsupported dataset format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error(transparent)]
    Core(#[from] st_core::CoreError),
}
