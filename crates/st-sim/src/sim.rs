//! Simulation runner and output recording.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Fixed-step scheme used by [`run_sim`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    #[default]
    Rk4,
    /// First order; only useful for cross-checking RK4.
    ForwardEuler,
}

/// Step size, horizon and recording stride of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Step size in seconds.
    pub dt: f64,
    /// Horizon in seconds, integrated from t=0.
    pub t_end: f64,
    /// Refuse runs that would need more steps than this.
    pub max_steps: usize,
    /// Keep one output sample per this many steps.
    pub record_every: usize,
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        SimOptions {
            dt: 0.01,
            t_end: 10.0,
            max_steps: 5_000_000,
            record_every: 1,
            integrator: IntegratorType::Rk4,
        }
    }
}

/// Recorded scalar output of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Model output at each time point
    pub y: Vec<f64>,
}

impl SimRecord {
    fn push(&mut self, t: f64, y: f64) {
        self.t.push(t);
        self.y.push(y);
    }
}

/// Integrate `model` from 0 to `opts.t_end` with a fixed step, recording
/// the model output at t=0, every `record_every` steps, and at the end.
pub fn run_sim<M: TransientModel>(model: &mut M, opts: &SimOptions) -> SimResult<SimRecord> {
    if !(opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if !(opts.t_end >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let steps = (opts.t_end / opts.dt - 1e-9).ceil().max(0.0) as usize;
    if steps > opts.max_steps {
        return Err(SimError::TooManySteps {
            needed: steps,
            limit: opts.max_steps,
        });
    }

    let mut x = model.initial_state();
    let mut record = SimRecord::default();
    record.push(0.0, model.output(0.0, &x));

    for step in 0..steps {
        let t = step as f64 * opts.dt;
        x = match opts.integrator {
            IntegratorType::Rk4 => RK4.step(model, t, &x, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, &x, opts.dt)?,
        };

        let done = step + 1;
        if done % opts.record_every == 0 || done == steps {
            let t_next = done as f64 * opts.dt;
            let y = model.output(t_next, &x);
            if !y.is_finite() {
                return Err(SimError::Diverged { time: t_next });
            }
            record.push(t_next, y);
        }
    }

    Ok(record)
}
