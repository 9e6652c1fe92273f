//! One-step schemes for [`TransientModel`]s.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Explicit one-step scheme.
pub trait Integrator {
    /// State at `t + dt` given the state at `t`.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;

    /// Right-hand-side evaluations per step.
    fn stages(&self) -> usize;
}

/// Classical fourth-order Runge-Kutta.
#[derive(Clone, Copy, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let half = 0.5 * dt;

        let k1 = model.rhs(t, x)?;
        let k2 = model.rhs(t + half, &model.axpy(x, &k1, half))?;
        let k3 = model.rhs(t + half, &model.axpy(x, &k2, half))?;
        let k4 = model.rhs(t + dt, &model.axpy(x, &k3, dt))?;

        // x + dt/6 * (k1 + 2 k2 + 2 k3 + k4)
        let x_new = model.axpy(x, &k1, dt / 6.0);
        let x_new = model.axpy(&x_new, &k2, dt / 3.0);
        let x_new = model.axpy(&x_new, &k3, dt / 3.0);
        Ok(model.axpy(&x_new, &k4, dt / 6.0))
    }

    fn stages(&self) -> usize {
        4
    }
}

/// Explicit Euler.
#[derive(Clone, Copy, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.axpy(x, &xdot, dt))
    }

    fn stages(&self) -> usize {
        1
    }
}
