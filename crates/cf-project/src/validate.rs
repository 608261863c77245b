use crate::schema::Project;
use cf_sim::{CooldownInputs, LngInputs};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Validate a project, stopping at the first problem.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    match collect_issues(project).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every problem found in a project, in field order.
pub fn collect_issues(project: &Project) -> Vec<ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return vec![ValidationError::UnsupportedVersion {
            version: project.version,
        }];
    }
    let mut issues = cooldown_issues(&project.cooldown);
    if let Some(lng) = &project.lng {
        issues.extend(lng_issues(lng));
    }
    issues
}

pub fn cooldown_issues(c: &CooldownInputs) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    let fields = [
        ("pipe_length_m", c.pipe_length_m),
        ("pipe_od_mm", c.pipe_od_mm),
        ("pipe_wt_mm", c.pipe_wt_mm),
        ("pipe_roughness_mm", c.pipe_roughness_mm),
        ("initial_temp_c", c.initial_temp_c),
        ("target_temp_c", c.target_temp_c),
        ("ambient_temp_c", c.ambient_temp_c),
        ("initial_n2_inlet_temp_c", c.initial_n2_inlet_temp_c),
        ("final_n2_inlet_temp_c", c.final_n2_inlet_temp_c),
        ("n2_temp_step_c", c.n2_temp_step_c),
        ("n2_temp_hold_hours", c.n2_temp_hold_hours),
        ("initial_n2_flow_nm3h", c.initial_n2_flow_nm3h),
        ("intermediate_n2_flow_nm3h", c.intermediate_n2_flow_nm3h),
        ("max_n2_flow_nm3h", c.max_n2_flow_nm3h),
        ("flow_ramp_intermediate_hours", c.flow_ramp_intermediate_hours),
        ("flow_ramp_total_hours", c.flow_ramp_total_hours),
        ("insulation_thickness_mm", c.insulation_thickness_mm),
        ("insulation_k", c.insulation_k),
        ("ext_convection_coeff", c.ext_convection_coeff),
        ("emissivity", c.emissivity),
        ("cooldown_rate_limit_c_per_h", c.cooldown_rate_limit_c_per_h),
        ("hold_duration_hours", c.hold_duration_hours),
        ("purge_volumes", c.purge_volumes),
        ("preservation_days", c.preservation_days),
        ("preservation_leak_pct_per_day", c.preservation_leak_pct_per_day),
        ("operational_margin_pct", c.operational_margin_pct),
        ("time_step_s", c.time_step_s),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            issues.push(invalid(field, value, "must be a valid number"));
        }
    }
    // relational checks are meaningless on NaN
    if !issues.is_empty() {
        return issues;
    }

    let positive = [
        ("pipe_length_m", c.pipe_length_m),
        ("pipe_od_mm", c.pipe_od_mm),
        ("pipe_wt_mm", c.pipe_wt_mm),
        ("cooldown_rate_limit_c_per_h", c.cooldown_rate_limit_c_per_h),
        ("insulation_thickness_mm", c.insulation_thickness_mm),
        ("insulation_k", c.insulation_k),
        ("initial_n2_flow_nm3h", c.initial_n2_flow_nm3h),
        ("time_step_s", c.time_step_s),
    ];
    for (field, value) in positive {
        if value <= 0.0 {
            issues.push(invalid(field, value, "must be greater than 0"));
        }
    }
    for (field, value) in [
        ("max_n2_flow_nm3h", c.max_n2_flow_nm3h),
        ("ext_convection_coeff", c.ext_convection_coeff),
    ] {
        if value < 0.0 {
            issues.push(invalid(field, value, "cannot be negative"));
        }
    }

    if c.pipe_wt_mm >= c.pipe_od_mm / 2.0 {
        issues.push(invalid(
            "pipe_wt_mm",
            c.pipe_wt_mm,
            "must be less than half the outer diameter",
        ));
    }
    if !(0.0..=1.0).contains(&c.emissivity) {
        issues.push(invalid("emissivity", c.emissivity, "must be between 0 and 1"));
    }
    if c.target_temp_c >= c.initial_temp_c {
        issues.push(invalid(
            "target_temp_c",
            c.target_temp_c,
            "must be colder than the initial temperature",
        ));
    }
    if c.final_n2_inlet_temp_c >= c.initial_temp_c {
        issues.push(invalid(
            "final_n2_inlet_temp_c",
            c.final_n2_inlet_temp_c,
            "must be colder than the pipe initial temperature",
        ));
    }
    if c.final_n2_inlet_temp_c >= c.initial_n2_inlet_temp_c {
        issues.push(invalid(
            "final_n2_inlet_temp_c",
            c.final_n2_inlet_temp_c,
            "must be colder than the initial N2 inlet temperature",
        ));
    }
    if c.initial_n2_inlet_temp_c >= c.initial_temp_c {
        issues.push(invalid(
            "initial_n2_inlet_temp_c",
            c.initial_n2_inlet_temp_c,
            "must be colder than the pipe initial temperature",
        ));
    }
    if c.initial_n2_flow_nm3h > c.max_n2_flow_nm3h {
        issues.push(invalid(
            "initial_n2_flow_nm3h",
            c.initial_n2_flow_nm3h,
            "must not exceed the max N2 flow",
        ));
    }
    issues
}

pub fn lng_issues(l: &LngInputs) -> Vec<ValidationError> {
    let positive = [
        ("lng.initial_filling_rate_m3h", l.initial_filling_rate_m3h),
        ("lng.max_velocity_m_s", l.max_velocity_m_s),
        ("lng.lng_density_kg_m3", l.lng_density_kg_m3),
        ("lng.vent_back_pressure_bar", l.vent_back_pressure_bar),
    ];
    let mut issues: Vec<ValidationError> = positive
        .into_iter()
        .filter(|(_, v)| !(v.is_finite() && *v > 0.0))
        .map(|(field, v)| invalid(field, v, "must be greater than 0"))
        .collect();
    for (field, value) in [
        ("lng.ramp_up_hours", l.ramp_up_hours),
        ("lng.lng_temperature_c", l.lng_temperature_c),
    ] {
        if !value.is_finite() {
            issues.push(invalid(field, value, "must be a valid number"));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_project_is_valid() {
        assert_eq!(validate_project(&Project::new("default")), Ok(()));
    }

    #[test]
    fn newer_version_rejected() {
        let mut project = Project::new("future");
        project.version = crate::migrate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn wall_thickness_against_diameter() {
        let mut project = Project::new("thick");
        project.cooldown.pipe_wt_mm = 200.0;
        let err = validate_project(&project).unwrap_err();
        assert!(err.to_string().contains("pipe_wt_mm"));
    }

    #[test]
    fn collects_every_issue() {
        let mut project = Project::new("bad");
        project.cooldown.time_step_s = 0.0;
        project.cooldown.emissivity = 1.5;
        project.cooldown.target_temp_c = 50.0;
        project.cooldown.initial_n2_flow_nm3h = 6000.0;
        let issues = collect_issues(&project);
        assert_eq!(issues.len(), 4, "{issues:?}");
    }

    #[test]
    fn nan_reported_once_without_relational_noise() {
        let mut project = Project::new("nan");
        project.cooldown.initial_temp_c = f64::NAN;
        let issues = collect_issues(&project);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().contains("valid number"));
    }

    #[test]
    fn inverted_vaporizer_schedule_rejected() {
        let mut project = Project::new("schedule");
        project.cooldown.final_n2_inlet_temp_c = 20.0;
        let fields: Vec<String> = collect_issues(&project)
            .into_iter()
            .map(|e| match e {
                ValidationError::InvalidValue { field, .. } => field,
                other => other.to_string(),
            })
            .collect();
        assert_eq!(fields, vec!["final_n2_inlet_temp_c"]);
    }

    #[test]
    fn lng_values_must_be_positive() {
        let mut project = Project::new("lng");
        if let Some(lng) = project.lng.as_mut() {
            lng.max_velocity_m_s = 0.0;
            lng.vent_back_pressure_bar = -1.0;
        }
        assert_eq!(collect_issues(&project).len(), 2);
    }
}
