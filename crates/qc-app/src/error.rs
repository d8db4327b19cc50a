//! Error types for the qc-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Ingest(String),

    #[error("Failed to create output directory: {path}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for qc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<qc_config::ConfigError> for AppError {
    fn from(err: qc_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<qc_config::ValidationError> for AppError {
    fn from(err: qc_config::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<qc_ingest::IngestError> for AppError {
    fn from(err: qc_ingest::IngestError) -> Self {
        AppError::Ingest(err.to_string())
    }
}
