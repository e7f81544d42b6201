use enclosurekit_settings::{
    ConfigError, EnclosureConfig, LayoutVariant, Revision, SettingsError,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn json_and_toml_files_reload_to_same_design() {
    let dir = tempdir().unwrap();
    let mut config = EnclosureConfig::default();
    config.layout.variant = LayoutVariant::Nested;
    config.layout.revision = Revision::Original;
    config.joints.fingers_width = 4;

    for name in ["design.json", "design.toml"] {
        let path = dir.path().join(name);
        config.save_to_file(&path).unwrap();
        let loaded = EnclosureConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.layout.variant, LayoutVariant::Nested);
        assert_eq!(loaded.layout.revision, Revision::Original);
        assert_eq!(loaded.joints.fingers_width, 4);
        assert_eq!(loaded.depth_stack, config.depth_stack);
        assert_eq!(loaded.dimensions(), config.dimensions());
    }
}

#[test]
fn partial_toml_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    fs::write(
        &path,
        "[material]\nthickness = 4.0\n\n[layout]\nvariant = \"nested\"\n",
    )
    .unwrap();

    let config = EnclosureConfig::load_from_file(&path).unwrap();
    assert_eq!(config.material.thickness, 4.0);
    assert_eq!(config.material.finger_length, 5.0);
    assert_eq!(config.layout.variant, LayoutVariant::Nested);
    assert!(config.layout.decorate);

    let dims = config.dimensions();
    assert!((dims.outer_width - (45.92 + 8.0)).abs() < 1e-9);
    assert_eq!(dims.exploded_gap, -4.0);
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "material": { "thickness": -1.0 } }"#).unwrap();

    match EnclosureConfig::load_from_file(&path) {
        Err(SettingsError::Config(ConfigError::ValueOutOfRange { key, .. })) => {
            assert_eq!(key, "material.thickness")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("design.yaml");
    let err = EnclosureConfig::default().save_to_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(_))
    ));
    assert!(!path.exists());
}

#[test]
fn malformed_json_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        EnclosureConfig::load_from_file(&path),
        Err(SettingsError::Json(_))
    ));
}
