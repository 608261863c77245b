use cf_project::schema::*;
use cf_project::{ProjectError, from_yaml_str, load_json, load_yaml, save_json, save_yaml};

#[test]
fn roundtrip_yaml_default_project() {
    let project = Project::new("Scenario A");

    let path = std::env::temp_dir().join("cf_project_roundtrip_default.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_without_lng() {
    let mut project = Project::new("Nitrogen only");
    project.lng = None;
    project.cooldown.pipe_length_m = 1200.0;
    project.cooldown.number_of_holds = 0;

    let path = std::env::temp_dir().join("cf_project_roundtrip_no_lng.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn sparse_yaml_fills_defaults() {
    let yaml = r#"
version: 2
name: Short line
cooldown:
  pipe_length_m: 150.0
  max_n2_flow_nm3h: 2000.0
  intermediate_n2_flow_nm3h: 1500.0
"#;
    let project = from_yaml_str(yaml).unwrap();
    assert_eq!(project.cooldown.pipe_length_m, 150.0);
    assert_eq!(project.cooldown.pipe_od_mm, 323.8);
    assert!(project.lng.is_none());
}

#[test]
fn version_one_file_is_migrated() {
    let yaml = "version: 1\nname: Legacy\n";
    let project = from_yaml_str(yaml).unwrap();
    assert_eq!(project.version, cf_project::LATEST_VERSION);
    assert!(project.lng.is_some());
}

#[test]
fn invalid_values_refused_on_save() {
    let mut project = Project::new("Broken");
    project.cooldown.time_step_s = -1.0;
    let path = std::env::temp_dir().join("cf_project_refused.yaml");
    let err = save_yaml(&path, &project).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn future_version_refused_on_load() {
    let err = from_yaml_str("version: 99\nname: Future\n").unwrap_err();
    assert!(err.to_string().contains("Unsupported version"));
}
