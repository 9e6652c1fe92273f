//! Error types for the st-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Identification error: {0}")]
    Ident(#[from] st_ident::IdentError),

    #[error("Tuning error: {0}")]
    Control(#[from] st_controls::ControlError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] st_sim::SimError),

    #[error("Results error: {0}")]
    Results(#[from] st_results::ResultsError),

    #[error("Failed to render figure {path}: {message}")]
    Plot { path: PathBuf, message: String },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidInput { field: &'static str, value: String },

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for st-app operations.
pub type AppResult<T> = Result<T, AppError>;
