//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while composing or simulating linear systems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Improper transfer function (numerator degree {num} > denominator degree {den})")]
    Improper { num: usize, den: usize },

    #[error("Closed loop is unstable (pole with real part {real})")]
    Unstable { real: f64 },

    #[error("Simulation diverged at t={time}")]
    Diverged { time: f64 },

    #[error("Step count {needed} exceeds limit {limit}")]
    TooManySteps { needed: usize, limit: usize },

    #[error(transparent)]
    Core(#[from] st_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
