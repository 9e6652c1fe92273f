//! Controller and loop transfer functions.

use std::fmt;

use st_core::Real;
use st_sim::TransferFunction;

use crate::error::{ControlError, ControlResult};
use crate::tuning::TuningParameters;

/// Ideal-form PID as `(Kp*Td*s^2 + Kp*s + Kp/Ti) / s`.
pub fn pid_transfer_function(tuning: &TuningParameters) -> ControlResult<TransferFunction> {
    if tuning.ti == 0.0 {
        return Err(ControlError::InvalidArg {
            what: "integral time Ti is zero",
        });
    }
    let TuningParameters { kp, ti, td, .. } = *tuning;
    Ok(TransferFunction::new(&[kp * td, kp, kp / ti], &[1.0, 0.0])?)
}

/// Unit-gain first-order lag `1 / (tau*s + 1)`.
pub fn plant_lag(tau: Real) -> ControlResult<TransferFunction> {
    if tau == 0.0 || !tau.is_finite() {
        return Err(ControlError::InvalidArg {
            what: "lag time constant must be finite and non-zero",
        });
    }
    Ok(TransferFunction::first_order_lag(1.0, tau)?)
}

/// Loop transfer function `C(s) * 1/(tau*s + 1)`.
pub fn open_loop(tuning: &TuningParameters, tau: Real) -> ControlResult<TransferFunction> {
    let controller = pid_transfer_function(tuning)?;
    Ok(controller.series(&plant_lag(tau)?)?)
}

/// `L / (1 + L)` for the loop built by [`open_loop`].
pub fn closed_loop(tuning: &TuningParameters, tau: Real) -> ControlResult<TransferFunction> {
    Ok(open_loop(tuning, tau)?.feedback_unity()?)
}

/// Console rendering of the loop transfer function, always in full
/// `a s^2 + b s + c` over `tau s^2 + s` form.
///
/// ```text
/// 4.8000s^2 + 2.4000s + 1.2000
/// ----------------------------
///        4.0000s^2 + s
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenLoopText {
    pub tuning: TuningParameters,
    pub tau: Real,
}

impl fmt::Display for OpenLoopText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TuningParameters { kp, ti, td, .. } = self.tuning;
        writeln!(f, "{:.4}s^2 + {:.4}s + {:.4}", kp * td, kp, kp / ti)?;
        writeln!(f, "{}", "-".repeat(28))?;
        write!(f, "{}{:.4}s^2 + s", " ".repeat(7), self.tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::TuningMethod;

    fn zn_reference() -> TuningParameters {
        TuningParameters {
            method: TuningMethod::ZieglerNichols,
            kp: 2.4,
            ti: 2.0,
            td: 2.0,
        }
    }

    #[test]
    fn pid_coefficients() {
        let pid = pid_transfer_function(&zn_reference()).unwrap();
        assert_eq!(pid.num(), &[4.8, 2.4, 1.2]);
        assert_eq!(pid.den(), &[1.0, 0.0]);
    }

    #[test]
    fn open_loop_denominator_is_tau_s2_plus_s() {
        let open = open_loop(&zn_reference(), 4.0).unwrap();
        assert_eq!(open.den(), &[4.0, 1.0, 0.0]);
        assert_eq!(open.num(), &[4.8, 2.4, 1.2]);
    }

    #[test]
    fn closed_loop_has_unit_dc_gain() {
        let closed = closed_loop(&zn_reference(), 4.0).unwrap();
        // den = [tau + Kp*Td, 1 + Kp, Kp/Ti]
        for (got, want) in closed.den().iter().zip([8.8, 3.4, 1.2]) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!((closed.dc_gain().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_integral_time_rejected() {
        let tuning = TuningParameters {
            ti: 0.0,
            ..zn_reference()
        };
        assert!(pid_transfer_function(&tuning).is_err());
    }

    #[test]
    fn zero_lag_rejected() {
        assert!(plant_lag(0.0).is_err());
        assert!(plant_lag(Real::NAN).is_err());
    }

    #[test]
    fn open_loop_text_layout() {
        let text = OpenLoopText {
            tuning: zn_reference(),
            tau: 4.0,
        }
        .to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "4.8000s^2 + 2.4000s + 1.2000");
        assert_eq!(lines[1], "-".repeat(28));
        assert_eq!(lines[2], "       4.0000s^2 + s");
    }
}
