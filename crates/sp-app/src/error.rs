//! Error types for the sp-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the CLI and UIs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Study error: {0}")]
    Study(String),

    #[error("Failed to read study file: {path}")]
    StudyFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write study file: {path}")]
    StudyFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Study validation failed: {0}")]
    Validation(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Cabin class not configured: {0}")]
    ClassNotFound(String),

    #[error("Period error: {0}")]
    Period(String),

    #[error("Period is not set")]
    PeriodUnset,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sp-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<sp_project::ProjectError> for AppError {
    fn from(err: sp_project::ProjectError) -> Self {
        match err {
            sp_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Study(other.to_string()),
        }
    }
}

impl From<sp_project::ValidationError> for AppError {
    fn from(err: sp_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sp_period::PeriodError> for AppError {
    fn from(err: sp_period::PeriodError) -> Self {
        AppError::Period(err.to_string())
    }
}

impl From<sp_core::SpError> for AppError {
    fn from(err: sp_core::SpError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
