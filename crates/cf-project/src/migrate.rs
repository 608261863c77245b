//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;
use cf_sim::LngInputs;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        1 => migrate_v1_to_v2(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 1 files predate the LNG procedure; give them the default one.
fn migrate_v1_to_v2(mut project: Project) -> Result<Project, ProjectError> {
    if project.lng.is_none() {
        project.lng = Some(LngInputs::default());
    }
    project.version = 2;
    Ok(project)
}
