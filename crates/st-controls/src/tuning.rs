//! Open-loop tuning rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use st_core::{PlantParameters, Real, ensure_finite};

use crate::error::{ControlError, ControlResult};

/// Tuning rule selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TuningMethod {
    ZieglerNichols,
    CohenCoon,
}

impl TuningMethod {
    pub const ALL: [TuningMethod; 2] = [TuningMethod::ZieglerNichols, TuningMethod::CohenCoon];

    /// Short selector accepted by [`FromStr`].
    pub fn code(self) -> &'static str {
        match self {
            TuningMethod::ZieglerNichols => "zn",
            TuningMethod::CohenCoon => "co",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            TuningMethod::ZieglerNichols => "Ziegler-Nichols",
            TuningMethod::CohenCoon => "Cohen-Coon",
        }
    }

    /// File-name stem for artifacts produced by this method.
    pub fn slug(self) -> &'static str {
        match self {
            TuningMethod::ZieglerNichols => "ziegler_nichols",
            TuningMethod::CohenCoon => "cohen_coon",
        }
    }
}

impl fmt::Display for TuningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TuningMethod {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zn" => Ok(TuningMethod::ZieglerNichols),
            "co" => Ok(TuningMethod::CohenCoon),
            _ => Err(ControlError::InvalidMethod {
                code: s.trim().to_string(),
            }),
        }
    }
}

/// Ideal-form PID coefficients: `Kp * (1 + 1/(Ti*s) + Td*s)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningParameters {
    pub method: TuningMethod,
    /// Proportional gain.
    pub kp: Real,
    /// Integral time (seconds).
    pub ti: Real,
    /// Derivative time (seconds).
    pub td: Real,
}

impl TuningParameters {
    fn checked(method: TuningMethod, kp: Real, ti: Real, td: Real) -> ControlResult<Self> {
        ensure_finite(kp, "Kp")?;
        ensure_finite(ti, "Ti")?;
        ensure_finite(td, "Td")?;
        Ok(Self { method, kp, ti, td })
    }
}

/// Ziegler-Nichols open-loop (reaction curve) rule.
///
/// ```text
/// Kp = 1.2*tau / (K*theta)
/// Ti = 2*theta
/// Td = tau/2
/// ```
pub fn ziegler_nichols(plant: &PlantParameters) -> ControlResult<TuningParameters> {
    plant.ensure_tunable()?;
    let PlantParameters { k, theta, tau } = *plant;

    TuningParameters::checked(
        TuningMethod::ZieglerNichols,
        1.2 * tau / (k * theta),
        2.0 * theta,
        tau / 2.0,
    )
}

/// Cohen-Coon open-loop rule.
///
/// ```text
/// Kp = (tau/(K*theta)) * (16*tau + 3*theta) / (12*tau)
/// Ti = theta * (32 + 6*theta/tau) / (13 + 8*theta/tau)
/// Td = 4*theta / (11 + 2*theta/tau)
/// ```
pub fn cohen_coon(plant: &PlantParameters) -> ControlResult<TuningParameters> {
    plant.ensure_tunable()?;
    let PlantParameters { k, theta, tau } = *plant;
    let r = plant.dead_time_ratio();

    TuningParameters::checked(
        TuningMethod::CohenCoon,
        (tau / (k * theta)) * (16.0 * tau + 3.0 * theta) / (12.0 * tau),
        theta * (32.0 + 6.0 * r) / (13.0 + 8.0 * r),
        4.0 * theta / (11.0 + 2.0 * r),
    )
}

/// Apply `method` to `plant`.
pub fn tune(method: TuningMethod, plant: &PlantParameters) -> ControlResult<TuningParameters> {
    let params = match method {
        TuningMethod::ZieglerNichols => ziegler_nichols(plant)?,
        TuningMethod::CohenCoon => cohen_coon(plant)?,
    };
    tracing::info!(
        method = method.code(),
        kp = params.kp,
        ti = params.ti,
        td = params.td,
        "tuned controller"
    );
    Ok(params)
}
