use std::path::PathBuf;

#[test]
fn demos_validate() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let demos = [
        "demos/projects/01_scenario_a.yaml",
        "demos/projects/02_thin_lagging_short_line.yaml",
        "demos/projects/03_long_line_with_holds.yaml",
    ];

    for rel in demos {
        let path = root.join(rel);
        let result = cf_project::load_yaml(&path);
        assert!(
            result.is_ok(),
            "demo failed validation: {} => {:?}",
            path.display(),
            result.err()
        );
    }
}
