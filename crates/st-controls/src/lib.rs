//! PID tuning for FOPDT plants.
//!
//! The tuning engine maps identified plant parameters `{K, theta, tau}` to
//! ideal-form PID coefficients `{Kp, Ti, Td}` using the classical open-loop
//! rules, and builds the controller and loop transfer functions that the
//! simulator consumes.
//!
//! # Rules
//!
//! - **Ziegler-Nichols** (`zn`): reaction-curve rule, aggressive, roughly
//!   quarter-decay response.
//! - **Cohen-Coon** (`co`): accounts for the dead-time ratio `theta/tau` and
//!   stays usable for longer dead times.
//!
//! All functions here are pure; nothing is cached between calls.

pub mod error;
pub mod pid;
pub mod tuning;

pub use error::{ControlError, ControlResult};
pub use pid::{OpenLoopText, closed_loop, open_loop, pid_transfer_function, plant_lag};
pub use tuning::{TuningMethod, TuningParameters, cohen_coon, tune, ziegler_nichols};
