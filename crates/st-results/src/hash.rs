//! Content fingerprints for input datasets.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::{ResultsError, ResultsResult};

/// Hex SHA-256 of the raw dataset bytes.
pub fn dataset_fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn file_fingerprint(path: &Path) -> ResultsResult<String> {
    let bytes = fs::read(path).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dataset_fingerprint(&bytes))
}
