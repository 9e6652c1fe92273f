//! Run configuration, read from an optional YAML file.
//!
//! Every field has a default, so an empty file (or no file) gives the
//! stock behaviour:
//!
//! ```yaml
//! dataset:
//!   step: step
//!   output: output
//! output_dir: graphics
//! estimator:
//!   threshold_fraction: 0.9821
//!   tau_divisor: 4.0
//! simulation:
//!   samples: 1000
//!   t_final: 60.0          # optional, chosen from the poles otherwise
//!   scale_by_setpoint: false
//!   integrator: rk4
//!   info:
//!     rise_limits: [0.1, 0.9]
//!     settling_threshold: 0.02
//! figures:
//!   enabled: true
//!   trace_size: [800, 600]
//!   comparison_size: [1200, 600]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use st_ident::{EstimatorOptions, RecordNames};
use st_sim::StepOptions;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: RecordNames,
    pub output_dir: PathBuf,
    pub estimator: EstimatorOptions,
    pub simulation: SimulationConfig,
    pub figures: FigureConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: RecordNames::default(),
            output_dir: PathBuf::from("graphics"),
            estimator: EstimatorOptions::default(),
            simulation: SimulationConfig::default(),
            figures: FigureConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub step: StepOptions,
    /// Drive user-parameter runs with a step of the entered setpoint
    /// instead of a unit step.
    #[serde(default)]
    pub scale_by_setpoint: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub enabled: bool,
    /// Pixel size of the raw input/output figure.
    pub trace_size: (u32, u32),
    /// Pixel size of the two-panel comparison figures.
    pub comparison_size: (u32, u32),
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trace_size: (800, 600),
            comparison_size: (1200, 600),
        }
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content).map_err(|message| AppError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> Result<AppConfig, String> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_sim::IntegratorType;

    #[test]
    fn empty_document_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("graphics"));
        assert_eq!(config.simulation.step.samples, 1000);
        assert!(!config.simulation.scale_by_setpoint);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = parse_config(
            "output_dir: out\n\
             estimator:\n  threshold_fraction: 0.95\n\
             simulation:\n  samples: 200\n  scale_by_setpoint: true\n  integrator: forward_euler\n",
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.estimator.threshold_fraction, 0.95);
        assert_eq!(config.estimator.tau_divisor, 4.0);
        assert_eq!(config.simulation.step.samples, 200);
        assert_eq!(config.simulation.step.integrator, IntegratorType::ForwardEuler);
        assert_eq!(config.simulation.step.t_final, None);
        assert!(config.simulation.scale_by_setpoint);
        assert_eq!(config.dataset.step, "step");
        assert!(config.figures.enabled);
    }

    #[test]
    fn metric_limits_are_configurable() {
        let config = parse_config(
            "simulation:\n  info:\n    rise_limits: [0.05, 0.95]\n    settling_threshold: 0.05\n",
        )
        .unwrap();
        assert_eq!(config.simulation.step.info.rise_limits, (0.05, 0.95));
        assert_eq!(config.simulation.step.info.settling_threshold, 0.05);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_config("simulation: [1, 2").is_err());
        assert!(parse_config("figures:\n  enabled: maybe\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/nonexistent/steptune.yaml");
        match load_config(path) {
            Err(AppError::ConfigRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ConfigRead, got {other:?}"),
        }
    }
}
