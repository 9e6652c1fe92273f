//! Identification and tuning pipeline.
//!
//! Load a dataset, estimate the FOPDT plant, tune it with both open-loop
//! rules, and simulate each tuned loop. The same tuning path serves
//! user-supplied plant parameters.

use std::path::Path;

use st_controls::{TuningMethod, TuningParameters, open_loop, tune};
use st_core::PlantParameters;
use st_ident::{Estimate, StepResponseTrace, estimate, load_trace};
use st_results::{AnalysisReport, DatasetInfo, PlantSource, TuningRun, file_fingerprint};
use st_sim::{ClosedLoopResult, FixedStepSimulator, StepSimulator, TransferFunction};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Artifact label of the user-parameter run.
pub const USER_LABEL: &str = "user_parameters";

/// A validated trace plus what the report needs to know about its file.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub trace: StepResponseTrace,
    pub info: DatasetInfo,
}

/// Plant parameters typed in by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserRequest {
    pub method: TuningMethod,
    pub k: f64,
    pub tau: f64,
    pub theta: f64,
    pub setpoint: f64,
}

impl UserRequest {
    pub fn plant(&self) -> PlantParameters {
        PlantParameters::new(self.k, self.theta, self.tau)
    }
}

/// One tuned and simulated loop.
#[derive(Debug, Clone)]
pub struct MethodOutcome {
    pub label: String,
    pub source: PlantSource,
    pub plant: PlantParameters,
    pub tuning: TuningParameters,
    /// Time constant of the plant lag the controller was closed around.
    pub lag_tau: f64,
    pub open_loop: TransferFunction,
    pub amplitude: f64,
    pub response: ClosedLoopResult,
}

impl MethodOutcome {
    pub fn to_run(&self) -> TuningRun {
        TuningRun {
            label: self.label.clone(),
            source: self.source,
            plant: self.plant,
            tuning: self.tuning,
            open_loop: self.open_loop.clone(),
            amplitude: self.amplitude,
            metrics: self.response.info,
        }
    }
}

pub struct Pipeline {
    config: AppConfig,
    simulator: FixedStepSimulator,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        let simulator = FixedStepSimulator::new(config.simulation.step.clone());
        Self { config, simulator }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn load(&self, dataset: &Path) -> AppResult<LoadedDataset> {
        let trace = load_trace(dataset, &self.config.dataset)?;
        let info = DatasetInfo {
            path: dataset.display().to_string(),
            sha256: file_fingerprint(dataset)?,
            samples: trace.len(),
        };
        Ok(LoadedDataset { trace, info })
    }

    pub fn identify(&self, trace: &StepResponseTrace) -> AppResult<Estimate> {
        Ok(estimate(trace, &self.config.estimator)?)
    }

    /// Tune the estimated plant with every rule, in [`TuningMethod::ALL`] order.
    pub fn tune_estimated(&self, estimate: &Estimate) -> AppResult<Vec<MethodOutcome>> {
        TuningMethod::ALL
            .iter()
            .map(|&method| {
                tune_and_simulate(
                    &self.simulator,
                    method,
                    &estimate.plant,
                    estimate.plant.tau,
                    PlantSource::Estimated,
                    method.slug(),
                    self.config.simulation.step.amplitude,
                )
            })
            .collect()
    }

    /// Tune user-supplied parameters and close the loop around the
    /// identified plant lag `1/(identified.tau*s + 1)`.
    pub fn tune_user(
        &self,
        request: &UserRequest,
        identified: &PlantParameters,
    ) -> AppResult<MethodOutcome> {
        if !request.setpoint.is_finite() {
            return Err(AppError::InvalidInput {
                field: "setpoint",
                value: request.setpoint.to_string(),
            });
        }
        let amplitude = if self.config.simulation.scale_by_setpoint {
            request.setpoint
        } else {
            self.config.simulation.step.amplitude
        };
        let simulator = self.simulator.with_amplitude(amplitude);

        tune_and_simulate(
            &simulator,
            request.method,
            &request.plant(),
            identified.tau,
            PlantSource::User {
                setpoint: request.setpoint,
            },
            USER_LABEL,
            amplitude,
        )
    }

    /// Full fixed analysis: estimate, then both tunings.
    pub fn analyze(
        &self,
        dataset: &LoadedDataset,
    ) -> AppResult<(AnalysisReport, Vec<MethodOutcome>)> {
        let estimate = self.identify(&dataset.trace)?;
        let outcomes = self.tune_estimated(&estimate)?;

        let mut report = AnalysisReport::new(dataset.info.clone(), estimate);
        report.runs = outcomes.iter().map(MethodOutcome::to_run).collect();
        Ok((report, outcomes))
    }
}

/// Tune `plant` with `method` and simulate the unity-feedback loop
/// `C(s) / (lag_tau*s + 1)`.
pub fn tune_and_simulate<S: StepSimulator>(
    simulator: &S,
    method: TuningMethod,
    plant: &PlantParameters,
    lag_tau: f64,
    source: PlantSource,
    label: &str,
    amplitude: f64,
) -> AppResult<MethodOutcome> {
    let tuning = tune(method, plant)?;
    let open_loop = open_loop(&tuning, lag_tau)?;
    let response = simulator.simulate_unity_feedback_step(&open_loop)?;
    tracing::info!(
        label,
        rise_time = ?response.rise_time(),
        settling_time = ?response.settling_time(),
        overshoot = response.overshoot(),
        "closed-loop step simulated"
    );

    Ok(MethodOutcome {
        label: label.to_string(),
        source,
        plant: *plant,
        tuning,
        lag_tau,
        open_loop,
        amplitude,
        response,
    })
}
