//! Continuous-time models driven by the fixed-step runner.

use crate::error::SimResult;

/// A continuous-time system `dx/dt = f(t, x)` with a scalar readout.
///
/// Implementors supply:
/// - the state type and its value at t=0
/// - the right-hand side
/// - `axpy` (x + h*k), the only state arithmetic the integrators need
/// - the scalar output recorded by [`crate::run_sim`]
pub trait TransientModel {
    /// State vector (or scalar) carried between steps.
    type State: Clone;

    /// State at t=0.
    fn initial_state(&self) -> Self::State;

    /// `f(t, x)`. Mutable so models can reuse scratch buffers.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Return `x + h * k`.
    fn axpy(&self, x: &Self::State, k: &Self::State, h: f64) -> Self::State;

    /// Scalar readout of the state (e.g. `y = Cx + Du`).
    fn output(&self, t: f64, x: &Self::State) -> f64;
}
