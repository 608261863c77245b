//! Project loading, saving and validation.

use cf_project::Project;
use std::path::Path;

use crate::error::{AppError, AppResult};

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Load a project file (YAML, or JSON by extension), migrated and
/// validated.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = if is_json(path) {
        cf_project::load_json(path)?
    } else {
        cf_project::load_yaml(path)?
    };
    Ok(project)
}

/// Save a project file in the format given by its extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let result = if is_json(path) {
        cf_project::save_json(path, project)
    } else {
        cf_project::save_yaml(path, project)
    };
    result.map_err(|e| match e {
        cf_project::ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Check a project, reporting every problem in one error.
pub fn validate_project(project: &Project) -> AppResult<()> {
    let issues = cf_project::collect_issues(project);
    if issues.is_empty() {
        return Ok(());
    }
    let joined = issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(AppError::Validation(joined))
}

/// Write a new project with the default line and procedures.
///
/// Refuses to overwrite an existing file.
pub fn init_project(path: &Path, name: &str) -> AppResult<Project> {
    if path.exists() {
        return Err(AppError::InvalidInput(format!(
            "{} already exists",
            path.display()
        )));
    }
    let project = Project::new(name);
    save_project(path, &project)?;
    Ok(project)
}
