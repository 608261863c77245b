//! Shared application service layer for cryoflow.
//!
//! Front ends go through this crate to load projects, run or reuse cached
//! engine runs and pull series out of stored results.

pub mod error;
pub mod export;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use project_service::{init_project, load_project, save_project, validate_project};
pub use query::{RunSummary, extract_series, final_profile, get_run_summary, series_variables};
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_cooldown_run,
    ensure_cooldown_run_with_progress, ensure_lng_run, ensure_lng_run_with_progress, list_runs,
    load_run,
};
