//! Error types for the cf-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors for the
/// front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<cf_project::ProjectError> for AppError {
    fn from(err: cf_project::ProjectError) -> Self {
        match err {
            cf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<cf_sim::SimError> for AppError {
    fn from(err: cf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<cf_results::ResultsError> for AppError {
    fn from(err: cf_results::ResultsError) -> Self {
        match err {
            cf_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
