//! Step-response performance metrics.
//!
//! Computes rise time, settling time and percent overshoot from a sampled
//! response and its steady-state value.

use serde::{Deserialize, Serialize};
use st_core::{Tolerances, nearly_equal};

/// Thresholds used by [`step_info`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfoOptions {
    /// Lower and upper fractions of the final value bounding the rise.
    #[serde(default = "default_rise_limits")]
    pub rise_limits: (f64, f64),
    /// Half-width of the settling band as a fraction of the final value.
    #[serde(default = "default_settling_threshold")]
    pub settling_threshold: f64,
}

impl Default for StepInfoOptions {
    fn default() -> Self {
        Self {
            rise_limits: default_rise_limits(),
            settling_threshold: default_settling_threshold(),
        }
    }
}

fn default_rise_limits() -> (f64, f64) {
    (0.1, 0.9)
}

fn default_settling_threshold() -> f64 {
    0.02
}

/// Standard step-response metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepInfo {
    /// Steady-state value the metrics are measured against.
    pub steady_state: f64,
    /// Time from the lower to the upper rise limit (seconds).
    pub rise_time: Option<f64>,
    /// Time after which the response stays inside the settling band (seconds).
    pub settling_time: Option<f64>,
    /// Peak overshoot in percent of the steady-state value (0 when none).
    pub overshoot: f64,
    /// Largest excursion in the direction of the step.
    pub peak: f64,
    pub peak_time: f64,
}

/// Compute metrics for a response sampled at `time`.
///
/// `steady_state` is normally the DC gain times the step size; callers
/// without a model pass the last sample.
pub fn step_info(
    time: &[f64],
    response: &[f64],
    steady_state: f64,
    opts: &StepInfoOptions,
) -> StepInfo {
    let mut info = StepInfo {
        steady_state,
        ..StepInfo::default()
    };
    if time.is_empty() || time.len() != response.len() {
        return info;
    }

    // Work in the direction of the step so negative targets behave.
    let sign = if steady_state < 0.0 { -1.0 } else { 1.0 };
    let (peak_idx, _) = response
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &y)| {
            if sign * y > best.1 { (i, sign * y) } else { best }
        });
    info.peak = response[peak_idx];
    info.peak_time = time[peak_idx];

    if nearly_equal(steady_state, 0.0, Tolerances::default()) {
        return info;
    }

    let t_low = time_to_fraction(time, response, steady_state, opts.rise_limits.0);
    let t_high = time_to_fraction(time, response, steady_state, opts.rise_limits.1);
    if let (Some(lo), Some(hi)) = (t_low, t_high) {
        info.rise_time = Some(hi - lo);
    }

    info.settling_time =
        compute_settling_time(time, response, steady_state, opts.settling_threshold);

    let overshoot = (info.peak - steady_state) * sign / steady_state.abs() * 100.0;
    info.overshoot = overshoot.max(0.0);

    info
}

/// First time the response reaches `fraction * final_val`, interpolated
/// between the bracketing samples.
fn time_to_fraction(time: &[f64], response: &[f64], final_val: f64, fraction: f64) -> Option<f64> {
    let target = fraction * final_val;
    let looking_above = final_val > 0.0;
    let reached = |v: f64| if looking_above { v >= target } else { v <= target };

    let idx = response.iter().position(|&v| reached(v))?;
    if idx == 0 {
        return Some(time[0]);
    }

    let (t0, v0) = (time[idx - 1], response[idx - 1]);
    let (t1, v1) = (time[idx], response[idx]);
    let dv = v1 - v0;
    if dv.abs() > 1e-15 {
        Some(t0 + (target - v0) / dv * (t1 - t0))
    } else {
        Some(t1)
    }
}

/// Time, measured from the first sample, of the first sample of the final
/// run inside `final_val * (1 ± tolerance)`. `None` if the last sample is
/// still outside the band.
fn compute_settling_time(
    time: &[f64],
    response: &[f64],
    final_val: f64,
    tolerance: f64,
) -> Option<f64> {
    let band = tolerance * final_val.abs();
    let last_outside = response
        .iter()
        .rposition(|&v| (v - final_val).abs() > band);

    match last_outside {
        None => Some(0.0),
        Some(i) if i + 1 < time.len() => Some(time[i + 1] - time[0]),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(points: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
        points.iter().copied().unzip()
    }

    #[test]
    fn rise_time_10_90_percent() {
        let (t, y) = split(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.5, 0.15),
            (2.0, 0.5),
            (2.5, 0.85),
            (3.0, 0.95),
            (4.0, 1.0),
        ]);
        let info = step_info(&t, &y, 1.0, &StepInfoOptions::default());

        // 10% between t=1.0 and 1.5 -> 1.0 + 0.1/0.15*0.5
        // 90% between t=2.5 and 3.0 -> 2.5 + 0.05/0.10*0.5
        let t10 = 1.0 + (0.1 / 0.15) * 0.5;
        let t90 = 2.5 + 0.5 * 0.5;
        assert!((info.rise_time.unwrap() - (t90 - t10)).abs() < 1e-12);
    }

    #[test]
    fn overshoot_percent() {
        let (t, y) = split(&[(0.0, 0.0), (1.0, 0.5), (2.0, 1.2), (3.0, 1.1), (4.0, 1.0)]);
        let info = step_info(&t, &y, 1.0, &StepInfoOptions::default());
        assert!((info.overshoot - 20.0).abs() < 1e-9);
        assert_eq!(info.peak_time, 2.0);
    }

    #[test]
    fn no_overshoot_reports_zero() {
        let (t, y) = split(&[(0.0, 0.0), (1.0, 0.6), (2.0, 0.9), (3.0, 0.99)]);
        let info = step_info(&t, &y, 1.0, &StepInfoOptions::default());
        assert_eq!(info.overshoot, 0.0);
    }

    #[test]
    fn settling_time_uses_last_exit_from_band() {
        let (t, y) = split(&[
            (0.0, 0.0),
            (1.0, 0.8),
            (2.0, 1.05),
            (3.0, 0.99),
            (4.0, 1.03), // leaves the 2% band again
            (5.0, 1.01),
            (6.0, 1.001),
        ]);
        let info = step_info(&t, &y, 1.0, &StepInfoOptions::default());
        assert_eq!(info.settling_time, Some(5.0));
    }

    #[test]
    fn never_settling_is_none() {
        let (t, y) = split(&[(0.0, 0.0), (1.0, 0.5), (2.0, 0.7)]);
        let info = step_info(&t, &y, 1.0, &StepInfoOptions::default());
        assert_eq!(info.settling_time, None);
    }

    #[test]
    fn negative_step_is_mirrored() {
        let (t, y) = split(&[(0.0, 0.0), (1.0, -0.5), (2.0, -1.1), (3.0, -1.0)]);
        let info = step_info(&t, &y, -1.0, &StepInfoOptions::default());
        assert!((info.overshoot - 10.0).abs() < 1e-9);
        assert!(info.rise_time.is_some());
    }

    #[test]
    fn zero_target_skips_metrics() {
        let (t, y) = split(&[(0.0, 0.0), (1.0, 0.0)]);
        let info = step_info(&t, &y, 0.0, &StepInfoOptions::default());
        assert!(info.rise_time.is_none());
        assert!(info.settling_time.is_none());
        assert_eq!(info.overshoot, 0.0);
    }
}
