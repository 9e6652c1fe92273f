//! Linear-system simulation for steptune.
//!
//! - SISO transfer functions with series and unity-feedback composition
//! - Controllable canonical state-space realization
//! - Fixed-step RK4 / forward Euler integrators over a pluggable model
//! - Step simulation with automatic horizon selection
//! - Step-response metrics (rise time, settling time, overshoot)

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod state_space;
pub mod step;
pub mod step_info;
pub mod transfer_function;

pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
pub use state_space::{ForcedResponse, StateSpace};
pub use step::{ClosedLoopResult, FixedStepSimulator, StepOptions, StepSimulator};
pub use step_info::{StepInfo, StepInfoOptions, step_info};
pub use transfer_function::TransferFunction;
