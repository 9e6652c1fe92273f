//! Application service layer for steptune.
//!
//! Sits between the CLI and the backend crates: loads configuration, runs
//! the identification and tuning pipeline, writes artifacts, and formats
//! the console report.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod report;

pub use artifacts::ArtifactWriter;
pub use config::{AppConfig, FigureConfig, SimulationConfig, load_config};
pub use error::{AppError, AppResult};
pub use pipeline::{LoadedDataset, MethodOutcome, Pipeline, USER_LABEL, UserRequest};
pub use report::{EstimateSummary, OutcomeSummary};
