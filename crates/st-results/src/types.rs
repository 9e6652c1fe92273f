//! Report data types.

use serde::{Deserialize, Serialize};
use st_controls::TuningParameters;
use st_core::PlantParameters;
use st_ident::Estimate;
use st_sim::{StepInfo, TransferFunction};

/// Everything one invocation produced, written as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub timestamp: String,
    pub dataset: DatasetInfo,
    /// Identified plant; every run closes its loop around this lag.
    pub estimate: Estimate,
    #[serde(default)]
    pub runs: Vec<TuningRun>,
}

impl AnalysisReport {
    pub fn new(dataset: DatasetInfo, estimate: Estimate) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            dataset,
            estimate,
            runs: Vec::new(),
        }
    }

    pub fn run(&self, label: &str) -> Option<&TuningRun> {
        self.runs.iter().find(|r| r.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub path: String,
    pub sha256: String,
    pub samples: usize,
}

/// Where the plant parameters of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlantSource {
    Estimated,
    User { setpoint: f64 },
}

/// One tuned and simulated loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningRun {
    /// Artifact stem, e.g. `ziegler_nichols` or `user_parameters`.
    pub label: String,
    pub source: PlantSource,
    pub plant: PlantParameters,
    pub tuning: TuningParameters,
    pub open_loop: TransferFunction,
    /// Step size the closed loop was driven with.
    pub amplitude: f64,
    pub metrics: StepInfo,
}
