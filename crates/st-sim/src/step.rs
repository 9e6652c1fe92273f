//! Step simulation of linear systems.
//!
//! [`StepSimulator`] is the seam the rest of the workspace talks to; the
//! shipped implementation realizes the system in state space and integrates
//! it with a fixed step chosen from the pole locations.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::{IntegratorType, SimOptions, run_sim};
use crate::state_space::StateSpace;
use crate::step_info::{StepInfo, StepInfoOptions, step_info};
use crate::transfer_function::TransferFunction;

/// Horizon used when no pole gives a time scale (static gains, pure integrators).
const FALLBACK_T_FINAL_S: f64 = 10.0;
/// Number of slowest time constants covered by an automatic horizon.
const HORIZON_TIME_CONSTANTS: f64 = 7.0;
/// Upper bound on `dt * |p|` for the fastest pole.
const DT_PER_FASTEST_POLE: f64 = 0.2;

/// Knobs for the fixed-step simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOptions {
    /// Approximate number of recorded samples.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Simulated horizon in seconds; chosen from the poles when absent.
    #[serde(default)]
    pub t_final: Option<f64>,
    /// Step amplitude applied at t=0.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default)]
    pub integrator: IntegratorType,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default)]
    pub info: StepInfoOptions,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            t_final: None,
            amplitude: default_amplitude(),
            integrator: IntegratorType::default(),
            max_steps: default_max_steps(),
            info: StepInfoOptions::default(),
        }
    }
}

fn default_samples() -> usize {
    1000
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_max_steps() -> usize {
    5_000_000
}

/// Simulated step response and its metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedLoopResult {
    pub time: Vec<f64>,
    pub response: Vec<f64>,
    pub info: StepInfo,
}

impl ClosedLoopResult {
    pub fn rise_time(&self) -> Option<f64> {
        self.info.rise_time
    }

    pub fn settling_time(&self) -> Option<f64> {
        self.info.settling_time
    }

    pub fn overshoot(&self) -> f64 {
        self.info.overshoot
    }

    /// (time, response) pairs.
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.time
            .iter()
            .copied()
            .zip(self.response.iter().copied())
            .collect()
    }
}

/// Step-response capability.
pub trait StepSimulator {
    /// Step response of `system` itself.
    fn simulate_step(&self, system: &TransferFunction) -> SimResult<ClosedLoopResult>;

    /// Close `open_loop` with unity negative feedback, then simulate.
    fn simulate_unity_feedback_step(
        &self,
        open_loop: &TransferFunction,
    ) -> SimResult<ClosedLoopResult> {
        let closed = open_loop.feedback_unity()?;
        self.simulate_step(&closed)
    }
}

/// State-space + fixed-step integration simulator.
#[derive(Debug, Clone, Default)]
pub struct FixedStepSimulator {
    opts: StepOptions,
}

impl FixedStepSimulator {
    pub fn new(opts: StepOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &StepOptions {
        &self.opts
    }

    /// Copy of this simulator with a different step amplitude.
    pub fn with_amplitude(&self, amplitude: f64) -> Self {
        let mut opts = self.opts.clone();
        opts.amplitude = amplitude;
        Self { opts }
    }

    /// Pick `(t_final, dt)` for a system with the given poles.
    fn horizon(&self, poles: &[nalgebra::Complex<f64>]) -> SimResult<(f64, f64)> {
        let slowest = poles
            .iter()
            .filter(|p| p.re < -1e-12)
            .map(|p| -p.re)
            .fold(f64::INFINITY, f64::min);

        let t_final = match self.opts.t_final {
            Some(t) if t > 0.0 && t.is_finite() => t,
            Some(_) => {
                return Err(SimError::InvalidArg {
                    what: "t_final must be positive",
                });
            }
            None if slowest.is_finite() => (HORIZON_TIME_CONSTANTS / slowest).clamp(1e-3, 1e6),
            None => FALLBACK_T_FINAL_S,
        };

        let fastest = poles.iter().map(|p| p.norm()).fold(0.0, f64::max);
        let mut dt = t_final / (self.opts.samples - 1) as f64;
        if fastest > 0.0 {
            dt = dt.min(DT_PER_FASTEST_POLE / fastest);
        }
        Ok((t_final, dt))
    }
}

impl StepSimulator for FixedStepSimulator {
    fn simulate_step(&self, system: &TransferFunction) -> SimResult<ClosedLoopResult> {
        if self.opts.samples < 2 {
            return Err(SimError::InvalidArg {
                what: "samples must be at least 2",
            });
        }
        if !self.opts.amplitude.is_finite() {
            return Err(SimError::InvalidArg {
                what: "step amplitude must be finite",
            });
        }

        let ss = StateSpace::from_transfer_function(system)?;
        let poles = system.poles();
        if let Some(p) = poles.iter().find(|p| p.re > 1e-9 * p.norm().max(1.0)) {
            return Err(SimError::Unstable { real: p.re });
        }

        let (t_final, dt) = self.horizon(&poles)?;
        let steps = (t_final / dt).ceil() as usize;
        let record_every = (steps / (self.opts.samples - 1)).max(1);
        tracing::debug!(t_final, dt, steps, record_every, "step simulation horizon");

        let sim_opts = SimOptions {
            dt,
            t_end: t_final,
            max_steps: self.opts.max_steps,
            record_every,
            integrator: self.opts.integrator,
        };
        let mut model = ss.with_constant_input(self.opts.amplitude);
        let record = run_sim(&mut model, &sim_opts)?;

        let steady_state = match system.dc_gain() {
            Some(gain) => gain * self.opts.amplitude,
            None => record.y.last().copied().unwrap_or(0.0),
        };
        let info = step_info(&record.t, &record.y, steady_state, &self.opts.info);

        Ok(ClosedLoopResult {
            time: record.t,
            response: record.y,
            info,
        })
    }
}
