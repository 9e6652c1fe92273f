//! Recorded open-loop step test.

use st_core::{Real, ensure_all_finite, first_decrease};

use crate::error::{IdentError, IdentResult};

/// Three equal-length sample columns sharing one index.
///
/// Invariants (checked by [`StepResponseTrace::new`]):
/// - at least one sample
/// - every value finite
/// - `time` non-decreasing
#[derive(Debug, Clone, PartialEq)]
pub struct StepResponseTrace {
    time: Vec<Real>,
    step_input: Vec<Real>,
    measured_output: Vec<Real>,
}

impl StepResponseTrace {
    pub fn new(
        time: Vec<Real>,
        step_input: Vec<Real>,
        measured_output: Vec<Real>,
    ) -> IdentResult<Self> {
        if time.len() != step_input.len() || time.len() != measured_output.len() {
            return Err(IdentError::LengthMismatch {
                time: time.len(),
                input: step_input.len(),
                output: measured_output.len(),
            });
        }
        if time.is_empty() {
            return Err(IdentError::EmptyTrace);
        }

        ensure_all_finite(&time, "time")?;
        ensure_all_finite(&step_input, "step input")?;
        ensure_all_finite(&measured_output, "measured output")?;

        if let Some(index) = first_decrease(&time) {
            return Err(IdentError::NonMonotonicTime { index });
        }

        Ok(Self {
            time,
            step_input,
            measured_output,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Never true: construction rejects empty traces.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[Real] {
        &self.time
    }

    pub fn step_input(&self) -> &[Real] {
        &self.step_input
    }

    pub fn measured_output(&self) -> &[Real] {
        &self.measured_output
    }

    /// Last output sample, taken as the settled value.
    pub fn final_output(&self) -> Real {
        self.measured_output[self.measured_output.len() - 1]
    }

    /// Last input sample, taken as the applied step size.
    pub fn step_amplitude(&self) -> Real {
        self.step_input[self.step_input.len() - 1]
    }

    /// (time, input) pairs, convenient for plotting.
    pub fn input_series(&self) -> Vec<(Real, Real)> {
        self.time
            .iter()
            .copied()
            .zip(self.step_input.iter().copied())
            .collect()
    }

    /// (time, output) pairs, convenient for plotting.
    pub fn output_series(&self) -> Vec<(Real, Real)> {
        self.time
            .iter()
            .copied()
            .zip(self.measured_output.iter().copied())
            .collect()
    }
}
