//! Error types for tuning and controller composition.

use st_core::CoreError;
use st_sim::SimError;
use thiserror::Error;

/// Result type for tuning operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while tuning or composing a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// The plant parameters put a zero or non-finite value in a denominator.
    #[error("undefined tuning parameters: invalid plant parameters ({reason})")]
    UndefinedTuning { reason: String },

    /// Method selector other than `zn` or `co`.
    #[error("Invalid tuning method '{code}' (expected 'zn' or 'co')")]
    InvalidMethod { code: String },

    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Sim(#[from] SimError),
}

impl From<CoreError> for ControlError {
    fn from(err: CoreError) -> Self {
        let reason = match err {
            CoreError::InvalidPlant { what } => what.to_string(),
            other => other.to_string(),
        };
        ControlError::UndefinedTuning { reason }
    }
}
