//! st-results: analysis reports and response series on disk.

pub mod hash;
pub mod store;
pub mod types;

use std::path::PathBuf;

pub use hash::{dataset_fingerprint, file_fingerprint};
pub use store::ReportStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report not found: {path}")]
    ReportNotFound { path: PathBuf },

    #[error("Malformed response series {path} at line {line}")]
    MalformedSeries { path: PathBuf, line: usize },

    #[error("Invalid series label '{label}'")]
    InvalidLabel { label: String },
}
