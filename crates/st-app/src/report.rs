//! Console report blocks.

use std::fmt;

use st_controls::OpenLoopText;
use st_ident::{Correction, Estimate};
use st_results::PlantSource;

use crate::pipeline::MethodOutcome;

/// Identified plant parameters and any corrections applied.
pub struct EstimateSummary<'a>(pub &'a Estimate);

impl fmt::Display for EstimateSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plant = &self.0.plant;
        writeln!(f, "Plant parameters")?;
        writeln!(f, "  K     = {:.4}", plant.k)?;
        writeln!(f, "  theta = {:.4} s", plant.theta)?;
        write!(f, "  tau   = {:.4} s", plant.tau)?;
        for correction in &self.0.corrections {
            match correction {
                Correction::NegativeTauCorrected { original } => write!(
                    f,
                    "\n  note: negative tau ({original:.4} s) replaced by its magnitude"
                )?,
                Correction::DeadTimeClampedToStart => write!(
                    f,
                    "\n  note: output non-zero at the first sample, theta clamped to it"
                )?,
            }
        }
        Ok(())
    }
}

/// Metrics, loop transfer function and coefficients of one tuned loop.
pub struct OutcomeSummary<'a>(pub &'a MethodOutcome);

impl fmt::Display for OutcomeSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let name = outcome.tuning.method.label();
        let info = &outcome.response.info;

        match outcome.source {
            PlantSource::Estimated => writeln!(f, "{name}")?,
            PlantSource::User { setpoint } => {
                writeln!(f, "{name} (user parameters, setpoint {setpoint})")?
            }
        }
        writeln!(f, "  rise time     = {}", seconds(info.rise_time))?;
        writeln!(f, "  settling time = {}", seconds(info.settling_time))?;
        writeln!(f, "  overshoot     = {:.2} %", info.overshoot)?;
        writeln!(f)?;
        writeln!(f, "Open-loop transfer function ({name}):")?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            OpenLoopText {
                tuning: outcome.tuning,
                tau: outcome.lag_tau,
            }
        )?;
        writeln!(f)?;
        writeln!(f, "  Kp = {}", outcome.tuning.kp)?;
        writeln!(f, "  Ti = {}", outcome.tuning.ti)?;
        write!(f, "  Td = {}", outcome.tuning.td)
    }
}

fn seconds(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4} s"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::pipeline::{Pipeline, UserRequest};
    use st_controls::TuningMethod;
    use st_core::PlantParameters;

    #[test]
    fn estimate_block_lists_parameters_and_notes() {
        let estimate = Estimate {
            plant: PlantParameters::new(-1.0, 2.0, 0.5),
            response_onset: Some(3),
            threshold_crossing: 0,
            crossing_time: 0.0,
            corrections: vec![Correction::NegativeTauCorrected { original: -0.5 }],
        };
        let text = EstimateSummary(&estimate).to_string();
        assert!(text.contains("K     = -1.0000"));
        assert!(text.contains("theta = 2.0000 s"));
        assert!(text.contains("tau   = 0.5000 s"));
        assert!(text.contains("negative tau (-0.5000 s)"));
    }

    #[test]
    fn outcome_block_contains_transfer_function_and_coefficients() {
        let outcome = Pipeline::new(AppConfig::default())
            .tune_user(
                &UserRequest {
                    method: TuningMethod::ZieglerNichols,
                    k: 2.0,
                    tau: 4.0,
                    theta: 1.0,
                    setpoint: 1.0,
                },
                &PlantParameters::new(2.0, 1.0, 4.0),
            )
            .unwrap();
        let text = OutcomeSummary(&outcome).to_string();

        assert!(text.starts_with("Ziegler-Nichols (user parameters"));
        assert!(text.contains("\n----------------------------\n"));
        assert!(text.contains("\n       4.0000s^2 + s\n"));
        assert!(text.contains("  Ti = 2\n"));
        assert!(text.ends_with("  Td = 2"));
        assert!(text.contains("overshoot     = "));
    }

    #[test]
    fn missing_metric_prints_placeholder() {
        assert_eq!(seconds(None), "n/a");
        assert_eq!(seconds(Some(1.5)), "1.5000 s");
    }
}
