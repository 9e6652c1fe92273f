//! First-order-plus-dead-time plant description.

use crate::{CoreError, CoreResult, Real};

/// FOPDT plant parameters: `K * exp(-theta*s) / (tau*s + 1)`.
///
/// Produced once per trace by the estimator or typed in by a user. The
/// struct itself does not reject zero dead time or zero time constant
/// because an estimator can legitimately arrive there; anything that
/// divides by them goes through [`PlantParameters::ensure_tunable`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlantParameters {
    /// Steady-state gain.
    pub k: Real,
    /// Dead time (seconds).
    pub theta: Real,
    /// Time constant (seconds).
    pub tau: Real,
}

impl PlantParameters {
    pub fn new(k: Real, theta: Real, tau: Real) -> Self {
        Self { k, theta, tau }
    }

    /// Fail unless K, theta and tau can all appear in a denominator.
    pub fn ensure_tunable(&self) -> CoreResult<()> {
        if !self.k.is_finite() || !self.theta.is_finite() || !self.tau.is_finite() {
            return Err(CoreError::InvalidPlant {
                what: "parameters must be finite",
            });
        }
        if self.k == 0.0 {
            return Err(CoreError::InvalidPlant {
                what: "gain K is zero",
            });
        }
        if self.theta == 0.0 {
            return Err(CoreError::InvalidPlant {
                what: "dead time theta is zero",
            });
        }
        if self.tau == 0.0 {
            return Err(CoreError::InvalidPlant {
                what: "time constant tau is zero",
            });
        }
        Ok(())
    }

    /// Controllability ratio theta/tau.
    pub fn dead_time_ratio(&self) -> Real {
        self.theta / self.tau
    }
}
