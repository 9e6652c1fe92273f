//! Dataset loading.
//!
//! Two layouts are understood:
//!
//! - A record document (JSON or YAML): a map of named matrices, each row
//!   `[time, value, ...]`. The step record provides the time base and the
//!   input column; the output record provides the measured column.
//! - CSV: optional header, then `time,input,output` rows.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use st_core::Real;

use crate::error::{IdentError, IdentResult};
use crate::trace::StepResponseTrace;

/// Names of the two matrices inside a record document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordNames {
    #[serde(default = "default_step_record")]
    pub step: String,
    #[serde(default = "default_output_record")]
    pub output: String,
}

impl Default for RecordNames {
    fn default() -> Self {
        Self {
            step: default_step_record(),
            output: default_output_record(),
        }
    }
}

fn default_step_record() -> String {
    "step".to_string()
}

fn default_output_record() -> String {
    "output".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Yaml,
    Csv,
}

impl DatasetFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> IdentResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            _ => Err(IdentError::UnsupportedFormat { extension }),
        }
    }
}

/// Load a trace from disk.
pub fn load_trace(path: &Path, names: &RecordNames) -> IdentResult<StepResponseTrace> {
    let format = DatasetFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| IdentError::DatasetRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let trace = match format {
        DatasetFormat::Csv => parse_csv(&content)?,
        DatasetFormat::Json | DatasetFormat::Yaml => parse_records(&content, format, names)?,
    };

    tracing::info!(
        path = %path.display(),
        samples = trace.len(),
        "loaded step-response dataset"
    );
    Ok(trace)
}

/// Parse a JSON or YAML record document.
pub fn parse_records(
    content: &str,
    format: DatasetFormat,
    names: &RecordNames,
) -> IdentResult<StepResponseTrace> {
    let mut records: BTreeMap<String, Vec<Vec<Real>>> = match format {
        DatasetFormat::Json => {
            serde_json::from_str(content).map_err(|e| IdentError::DatasetParse {
                message: format!("invalid JSON record document: {}", e),
            })?
        }
        DatasetFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| IdentError::DatasetParse {
                message: format!("invalid YAML record document: {}", e),
            })?
        }
        DatasetFormat::Csv => {
            return Err(IdentError::InvalidArg {
                what: "CSV is not a record document",
            });
        }
    };

    let step = take_record(&mut records, &names.step)?;
    let output = take_record(&mut records, &names.output)?;

    let mut time = Vec::with_capacity(step.len());
    let mut step_input = Vec::with_capacity(step.len());
    for (row, values) in step.iter().enumerate() {
        let (t, u) = two_columns(&names.step, row, values)?;
        time.push(t);
        step_input.push(u);
    }

    let mut measured_output = Vec::with_capacity(output.len());
    for (row, values) in output.iter().enumerate() {
        let (_, y) = two_columns(&names.output, row, values)?;
        measured_output.push(y);
    }

    StepResponseTrace::new(time, step_input, measured_output)
}

/// Parse `time,input,output` rows. The first non-blank, non-comment line may
/// be a header; any other non-numeric line is an error. Blank lines and `#`
/// comments are skipped.
pub fn parse_csv(content: &str) -> IdentResult<StepResponseTrace> {
    let mut time = Vec::new();
    let mut step_input = Vec::new();
    let mut measured_output = Vec::new();

    let mut first_row = true;
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let parsed: Result<Vec<Real>, _> = fields.iter().map(|f| f.parse::<Real>()).collect();
        let values = match parsed {
            Ok(values) => values,
            Err(_) if first_row => {
                first_row = false;
                continue;
            }
            Err(e) => {
                return Err(IdentError::DatasetParse {
                    message: format!("line {}: {}", line_no + 1, e),
                });
            }
        };

        if values.len() != 3 {
            return Err(IdentError::DatasetParse {
                message: format!(
                    "line {}: expected 3 columns (time,input,output), found {}",
                    line_no + 1,
                    values.len()
                ),
            });
        }

        first_row = false;
        time.push(values[0]);
        step_input.push(values[1]);
        measured_output.push(values[2]);
    }

    StepResponseTrace::new(time, step_input, measured_output)
}

fn take_record(
    records: &mut BTreeMap<String, Vec<Vec<Real>>>,
    name: &str,
) -> IdentResult<Vec<Vec<Real>>> {
    records
        .remove(name)
        .ok_or_else(|| IdentError::MissingRecord {
            name: name.to_string(),
        })
}

fn two_columns(record: &str, row: usize, values: &[Real]) -> IdentResult<(Real, Real)> {
    match values {
        [first, second, ..] => Ok((*first, *second)),
        _ => Err(IdentError::RowShape {
            record: record.to_string(),
            row,
            len: values.len(),
        }),
    }
}
