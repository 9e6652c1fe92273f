//! Step-response identification for steptune.
//!
//! Turns a recorded open-loop step test into first-order-plus-dead-time
//! plant parameters.
//!
//! - [`trace`]: the validated (time, input, output) sample table
//! - [`dataset`]: file loaders (JSON / YAML record documents, CSV)
//! - [`estimate`]: gain, dead time and time constant from a trace

pub mod dataset;
pub mod error;
pub mod estimate;
pub mod trace;

pub use dataset::{DatasetFormat, RecordNames, load_trace, parse_csv, parse_records};
pub use error::{IdentError, IdentResult};
pub use estimate::{Correction, Estimate, EstimatorOptions, estimate};
pub use trace::StepResponseTrace;
