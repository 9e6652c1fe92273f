//! Report storage API.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::AnalysisReport;
use crate::{ResultsError, ResultsResult};

const REPORT_FILE: &str = "report.json";
const SERIES_HEADER: &str = "time_s,response";

/// Output directory holding `report.json` and `<label>_response.csv` files.
#[derive(Clone, Debug)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    /// Open `root_dir`, creating it (and any parents) when missing.
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir).map_err(|source| ResultsError::Io {
            path: root_dir.clone(),
            source,
        })?;
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn report_path(&self) -> PathBuf {
        self.root_dir.join(REPORT_FILE)
    }

    pub fn response_path(&self, label: &str) -> ResultsResult<PathBuf> {
        let valid = !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ResultsError::InvalidLabel {
                label: label.to_string(),
            });
        }
        Ok(self.root_dir.join(format!("{label}_response.csv")))
    }

    pub fn save_report(&self, report: &AnalysisReport) -> ResultsResult<PathBuf> {
        let path = self.report_path();
        let json = serde_json::to_string_pretty(report)?;
        write_file(&path, json)?;
        Ok(path)
    }

    pub fn load_report(&self) -> ResultsResult<AnalysisReport> {
        let path = self.report_path();
        if !path.exists() {
            return Err(ResultsError::ReportNotFound { path });
        }
        let content = fs::read_to_string(&path).map_err(|source| ResultsError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a simulated response as `time_s,response` rows.
    pub fn save_response(
        &self,
        label: &str,
        time: &[f64],
        response: &[f64],
    ) -> ResultsResult<PathBuf> {
        let path = self.response_path(label)?;
        let mut content = String::with_capacity(24 * time.len() + SERIES_HEADER.len() + 1);
        content.push_str(SERIES_HEADER);
        content.push('\n');
        for (t, y) in time.iter().zip(response) {
            // Writing into a String cannot fail.
            let _ = writeln!(content, "{t},{y}");
        }
        write_file(&path, content)?;
        Ok(path)
    }

    pub fn load_response(&self, label: &str) -> ResultsResult<Vec<(f64, f64)>> {
        let path = self.response_path(label)?;
        if !path.exists() {
            return Err(ResultsError::ReportNotFound { path });
        }
        let content = fs::read_to_string(&path).map_err(|source| ResultsError::Io {
            path: path.clone(),
            source,
        })?;

        let mut points = Vec::new();
        for (i, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let malformed = || ResultsError::MalformedSeries {
                path: path.clone(),
                line: i + 1,
            };
            let (t, y) = line.split_once(',').ok_or_else(malformed)?;
            let t: f64 = t.trim().parse().map_err(|_| malformed())?;
            let y: f64 = y.trim().parse().map_err(|_| malformed())?;
            points.push((t, y));
        }
        Ok(points)
    }
}

fn write_file(path: &Path, contents: String) -> ResultsResult<()> {
    fs::write(path, contents).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_restricted_to_file_safe_characters() {
        let dir = std::env::temp_dir().join(format!("st-results-label-{}", std::process::id()));
        let store = ReportStore::new(dir.clone()).unwrap();
        assert!(store.response_path("cohen_coon").is_ok());
        assert!(store.response_path("user-1").is_ok());
        assert!(matches!(
            store.response_path("../escape"),
            Err(ResultsError::InvalidLabel { .. })
        ));
        assert!(store.response_path("").is_err());
        let _ = fs::remove_dir_all(dir);
    }
}
