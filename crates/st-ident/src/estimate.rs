//! FOPDT parameter estimation from an open-loop step test.
//!
//! - `K` from the final-value theorem: last output over last input.
//! - `theta` is the timestamp just before the output first leaves zero.
//! - `tau` is a quarter of the time between `theta` and the first sample
//!   at or above 98.21 % of the final value (the 4-tau point of a first
//!   order lag).
//!
//! The two scans are independent: the threshold scan always starts at
//! sample 0, whatever the dead-time scan found.

use serde::{Deserialize, Serialize};
use st_core::{PlantParameters, Real, ensure_finite};

use crate::error::{IdentError, IdentResult};
use crate::trace::StepResponseTrace;

/// Tunables for the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorOptions {
    /// Fraction of the final value that marks the crossing sample.
    #[serde(default = "default_threshold_fraction")]
    pub threshold_fraction: Real,
    /// Number of time constants elapsed at the crossing.
    #[serde(default = "default_tau_divisor")]
    pub tau_divisor: Real,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            threshold_fraction: default_threshold_fraction(),
            tau_divisor: default_tau_divisor(),
        }
    }
}

fn default_threshold_fraction() -> Real {
    0.9821
}

fn default_tau_divisor() -> Real {
    4.0
}

/// Adjustments the estimator made to keep the parameters usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Correction {
    /// The raw time constant was negative and was replaced by its magnitude.
    NegativeTauCorrected { original: Real },
    /// The output was already non-zero at sample 0; theta was clamped to `time[0]`.
    DeadTimeClampedToStart,
}

/// Estimated plant plus the diagnostics gathered on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub plant: PlantParameters,
    /// Index of the first non-zero output sample, if any.
    pub response_onset: Option<usize>,
    /// Index of the first sample at or above the threshold.
    pub threshold_crossing: usize,
    /// Timestamp of that sample.
    pub crossing_time: Real,
    pub corrections: Vec<Correction>,
}

impl Estimate {
    pub fn tau_corrected(&self) -> bool {
        self.corrections
            .iter()
            .any(|c| matches!(c, Correction::NegativeTauCorrected { .. }))
    }
}

/// Estimate `K`, `theta` and `tau` from a trace.
pub fn estimate(trace: &StepResponseTrace, opts: &EstimatorOptions) -> IdentResult<Estimate> {
    if !(opts.threshold_fraction > 0.0) || !opts.threshold_fraction.is_finite() {
        return Err(IdentError::InvalidArg {
            what: "threshold_fraction must be positive",
        });
    }
    if !(opts.tau_divisor > 0.0) || !opts.tau_divisor.is_finite() {
        return Err(IdentError::InvalidArg {
            what: "tau_divisor must be positive",
        });
    }

    let time = trace.time();
    let output = trace.measured_output();

    let final_value = trace.final_output();
    let step_amplitude = trace.step_amplitude();
    if step_amplitude == 0.0 {
        return Err(IdentError::ZeroStepAmplitude);
    }
    let k = ensure_finite(final_value / step_amplitude, "gain K")?;

    let mut corrections = Vec::new();

    // Dead time
    let response_onset = output.iter().position(|&y| y != 0.0);
    let theta = match response_onset {
        Some(0) => {
            tracing::warn!(
                time0 = time[0],
                "output is non-zero at the first sample; clamping dead time to the start of the trace"
            );
            corrections.push(Correction::DeadTimeClampedToStart);
            time[0]
        }
        Some(i) => time[i - 1],
        None => 0.0,
    };

    // Time constant
    let threshold = opts.threshold_fraction * final_value;
    let threshold_crossing = output
        .iter()
        .position(|&y| y >= threshold)
        .ok_or(IdentError::ThresholdNotReached { threshold })?;
    let crossing_time = time[threshold_crossing];

    let raw_tau = (crossing_time - theta) / opts.tau_divisor;
    let tau = if raw_tau < 0.0 {
        tracing::warn!(
            original = raw_tau,
            corrected = raw_tau.abs(),
            "negative time constant estimated; using its magnitude"
        );
        corrections.push(Correction::NegativeTauCorrected { original: raw_tau });
        raw_tau.abs()
    } else {
        raw_tau
    };

    let plant = PlantParameters::new(k, theta, tau);
    tracing::info!(k, theta, tau, "estimated FOPDT plant");

    Ok(Estimate {
        plant,
        response_onset,
        threshold_crossing,
        crossing_time,
        corrections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_time(n: usize, dt: Real) -> Vec<Real> {
        (0..n).map(|i| i as Real * dt).collect()
    }

    #[test]
    fn unit_gain_from_single_final_sample() {
        let n = 6;
        let mut output = vec![0.0; n];
        output[n - 1] = 2.5;
        let trace = StepResponseTrace::new(uniform_time(n, 1.0), vec![2.5; n], output).unwrap();

        let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
        assert_eq!(est.plant.k, 1.0);
    }

    #[test]
    fn dead_time_is_sample_before_onset() {
        let time = vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5];
        let output = vec![0.0, 0.0, 0.0, 0.2, 0.9, 1.0];
        let trace = StepResponseTrace::new(time.clone(), vec![1.0; 6], output).unwrap();

        let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
        assert_eq!(est.response_onset, Some(3));
        assert_eq!(est.plant.theta, time[2]);
    }

    #[test]
    fn tau_from_ramp_crossing() {
        // Ramp of 0.1/s starting after t=2, capped at 1.0.
        let time = uniform_time(21, 1.0);
        let output: Vec<Real> = time
            .iter()
            .map(|&t| ((t - 2.0) * 0.1).clamp(0.0, 1.0))
            .collect();
        let trace = StepResponseTrace::new(time, vec![1.0; 21], output).unwrap();

        let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
        // First non-zero sample is t=3, so theta = 2.
        assert_eq!(est.plant.theta, 2.0);
        // 0.9821 is first reached at t=12 (value 1.0).
        assert_eq!(est.crossing_time, 12.0);
        assert!((est.plant.tau - (12.0 - 2.0) / 4.0).abs() < 1e-12);
        assert!(est.corrections.is_empty());
    }

    #[test]
    fn no_response_keeps_zero_dead_time() {
        let trace = StepResponseTrace::new(uniform_time(4, 1.0), vec![1.0; 4], vec![0.0; 4])
            .unwrap();
        let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
        assert_eq!(est.response_onset, None);
        assert_eq!(est.plant.theta, 0.0);
        assert_eq!(est.plant.tau, 0.0);
    }

    #[test]
    fn onset_at_first_sample_clamps() {
        let trace = StepResponseTrace::new(
            vec![1.0, 2.0, 3.0],
            vec![1.0; 3],
            vec![0.5, 0.9, 1.0],
        )
        .unwrap();
        let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
        assert_eq!(est.plant.theta, 1.0);
        assert!(est.corrections.contains(&Correction::DeadTimeClampedToStart));
        assert!((est.plant.tau - 0.5).abs() < 1e-12);
    }

    #[test]
    fn negative_tau_is_corrected_and_flagged() {
        // Output dips negative after a dead time; zeros at the start already
        // satisfy the (negative) threshold, so the crossing precedes theta.
        let time = uniform_time(6, 1.0);
        let output = vec![0.0, 0.0, 0.0, -0.4, -1.1, -1.0];
        let trace = StepResponseTrace::new(time, vec![1.0; 6], output).unwrap();

        let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
        assert_eq!(est.plant.k, -1.0);
        assert_eq!(est.plant.theta, 2.0);
        assert_eq!(est.threshold_crossing, 0);
        assert!((est.plant.tau - 0.5).abs() < 1e-12);
        assert!(est.tau_corrected());
        assert_eq!(
            est.corrections,
            vec![Correction::NegativeTauCorrected { original: -0.5 }]
        );
    }

    #[test]
    fn zero_step_amplitude_fails() {
        let trace =
            StepResponseTrace::new(vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]).unwrap();
        assert!(matches!(
            estimate(&trace, &EstimatorOptions::default()),
            Err(IdentError::ZeroStepAmplitude)
        ));
    }

    #[test]
    fn threshold_never_reached_fails() {
        let trace =
            StepResponseTrace::new(vec![0.0, 1.0], vec![1.0; 2], vec![-1.0, -1.0]).unwrap();
        assert!(matches!(
            estimate(&trace, &EstimatorOptions::default()),
            Err(IdentError::ThresholdNotReached { .. })
        ));
    }

    proptest::proptest! {
        #[test]
        fn theta_tracks_onset(onset in 1_usize..40, dt in 0.01_f64..5.0, gain in 0.1_f64..10.0) {
            let n = onset + 10;
            let time = uniform_time(n, dt);
            let output: Vec<Real> = (0..n).map(|i| if i < onset { 0.0 } else { gain }).collect();
            let trace = StepResponseTrace::new(time.clone(), vec![1.0; n], output).unwrap();

            let est = estimate(&trace, &EstimatorOptions::default()).unwrap();
            proptest::prop_assert_eq!(est.plant.theta, time[onset - 1]);
            proptest::prop_assert_eq!(est.plant.k, gain);
            proptest::prop_assert!(est.plant.tau > 0.0);
        }
    }

    #[test]
    fn invalid_options_rejected() {
        let trace = StepResponseTrace::new(vec![0.0, 1.0], vec![1.0; 2], vec![0.0, 1.0]).unwrap();
        let opts = EstimatorOptions {
            threshold_fraction: 0.9821,
            tau_divisor: 0.0,
        };
        assert!(matches!(
            estimate(&trace, &opts),
            Err(IdentError::InvalidArg { .. })
        ));
    }
}
