// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading and saving backing files.
//!
//! These tests drive a `ConfigStore` through whole load/modify/save cycles
//! against real files in scratch directories.

mod common;

use common::{init_tracing, ScratchFile};
use std::fs;
use valcfg::domain::{AccessTier, ConfigError, ParseErrorKind, Value};
#[cfg(feature = "yaml")]
use valcfg::ports::DocumentCodec;
use valcfg::service::{CameraMode, ConfigStore, ImageConfig, DEFAULT_SECTION};

#[test]
fn test_save_writes_only_modified_keys() {
    init_tracing();
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{"calibration": {"offset": [1, 2, 3]}, "configuration": {"old": true}}"#,
    );

    let store = ConfigStore::new();
    store.install_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);
    store.create_attribute("x", Value::Int(5), AccessTier::WriteOpen);

    assert!(store.set_attribute("x", Value::Int(6), true));
    assert_eq!(store.get_attribute::<i64>("x"), Some(6));
    assert!(store.save(DEFAULT_SECTION, false));

    let saved = scratch.read_value();
    assert_eq!(saved["configuration"].to_json(), r#"{"x":6}"#);
    assert_eq!(saved["calibration"].to_json(), r#"{"offset":[1,2,3]}"#);
}

#[test]
fn test_saved_file_is_pretty_json() {
    let scratch = ScratchFile::empty("config.json");
    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);
    store.set_attribute("server_connect_ip", "10.0.0.2/24", true);

    assert!(store.save(DEFAULT_SECTION, false));
    let text = fs::read_to_string(&scratch.path).unwrap();
    assert_eq!(
        text,
        "{\n  \"configuration\": {\n    \"server_connect_ip\": \"10.0.0.2/24\"\n  }\n}"
    );
}

#[test]
fn test_save_replaces_non_object_document() {
    let scratch = ScratchFile::with_contents("config.json", "[1, 2, 3]");
    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);
    store.set_attribute("tracking_mode", "precise", true);

    assert!(store.save(DEFAULT_SECTION, false));
    assert_eq!(
        scratch.read_value().to_json(),
        r#"{"configuration":{"tracking_mode":"precise"}}"#
    );
}

#[test]
fn test_save_replaces_corrupt_document() {
    let scratch = ScratchFile::with_contents("config.json", "{not json");
    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);
    store.set_attribute("tracking_mode", "precise", true);

    assert!(store.save(DEFAULT_SECTION, false));
    assert_eq!(
        scratch.read_value()["configuration"]["tracking_mode"],
        Value::from("precise")
    );
}

#[test]
fn test_save_is_cumulative() {
    let scratch = ScratchFile::empty("config.json");
    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);

    store.set_attribute("camera_sensitivity", 0.5, true);
    assert!(store.save(DEFAULT_SECTION, false));
    store.set_attribute("tracking_mode", "fast", true);
    assert!(store.save(DEFAULT_SECTION, false));

    let section = scratch.read_value()["configuration"].clone();
    assert_eq!(section["camera_sensitivity"], Value::Float(0.5));
    assert_eq!(section["tracking_mode"], Value::from("fast"));
}

#[test]
fn test_save_reset_writes_empty_section() {
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{"configuration": {"tracking_mode": "fast"}, "other": 1}"#,
    );
    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);

    assert!(store.save(DEFAULT_SECTION, true));
    assert_eq!(
        scratch.read_value().to_json(),
        r#"{"configuration":{},"other":1}"#
    );
}

#[test]
fn test_failed_save_leaves_original() {
    let scratch = ScratchFile::with_contents("config.json", r#"{"configuration": {}}"#);
    // A directory where the temp file should go makes the write fail.
    fs::create_dir(scratch.dir.path().join("config.json.tmp")).unwrap();

    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);
    store.set_attribute("tracking_mode", "fast", true);

    assert!(!store.save(DEFAULT_SECTION, false));
    assert_eq!(
        fs::read_to_string(&scratch.path).unwrap(),
        r#"{"configuration": {}}"#
    );
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let scratch = ScratchFile::empty("config.json");
    // A non-empty directory at the target path makes the rename fail.
    fs::create_dir(&scratch.path).unwrap();
    fs::write(scratch.path.join("keep"), "x").unwrap();

    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);
    store.set_attribute("tracking_mode", "fast", true);

    assert!(!store.save(DEFAULT_SECTION, false));
    assert!(!scratch.dir.path().join("config.json.tmp").exists());
    assert!(scratch.path.join("keep").exists());
}

#[test]
fn test_save_creates_missing_directories() {
    let scratch = ScratchFile::empty("config.json");
    let path = scratch.dir.path().join("valcfg").join("nested").join("config.json");

    let store = ConfigStore::with_defaults();
    store.set_output_file(&path, DEFAULT_SECTION);
    store.set_attribute("tracking_mode", "fast", true);

    assert!(store.save(DEFAULT_SECTION, false));
    assert_eq!(
        common::read_value(&path)["configuration"]["tracking_mode"],
        Value::from("fast")
    );
}

#[test]
fn test_sections_map_to_files() {
    let main = ScratchFile::empty("main.json");
    let calib = ScratchFile::empty("calib.json");
    let store = ConfigStore::with_defaults();
    store.set_output_file(&main.path, DEFAULT_SECTION);
    store.set_output_file(&calib.path, "calibration");
    store.set_attribute("tracking_mode", "fast", true);

    assert!(store.save("calibration", false));
    assert!(calib.path.exists());
    assert!(!main.path.exists());

    assert!(store.save("unmapped", false));
    assert!(main.read_value().hash_has("unmapped"));
}

#[test]
fn test_load_applies_section() {
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{
            "configuration": {
                "camera_sensitivity": 2.5,
                "tracking_mode": "precise",
                "unknown_key": 1
            },
            "other": {"camera_type": "ignored"}
        }"#,
    );
    let store = ConfigStore::with_defaults();
    store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap();

    assert_eq!(store.get_attribute::<f64>("camera_sensitivity"), Some(2.5));
    assert_eq!(
        store.get_attribute::<String>("tracking_mode").as_deref(),
        Some("precise")
    );
    assert_eq!(
        store.get_attribute::<String>("camera_type").as_deref(),
        Some("UVCI")
    );
    assert!(!store.has_attribute("unknown_key"));

    let modified = store.modified_attributes();
    assert_eq!(modified.len(), 2);
    assert_eq!(store.output_file(DEFAULT_SECTION), Some(scratch.path.clone()));
}

#[test]
fn test_load_skips_restricted_keys() {
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{"configuration": {"websockets_port": 9000, "websockets_enabled": false}}"#,
    );
    let store = ConfigStore::builder().privileged(false).with_defaults().build();
    store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap();

    assert_eq!(store.get_attribute::<i64>("websockets_port"), Some(6437));
    assert_eq!(store.get_attribute::<bool>("websockets_enabled"), Some(false));
}

#[test]
fn test_load_applies_camera_preset() {
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{"configuration": {"camera_mode": "QHVGA", "image_width": 1000}}"#,
    );
    let store = ConfigStore::with_defaults();
    store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap();

    assert_eq!(store.camera_mode(), CameraMode::Qhvga);
    assert_eq!(store.image_config(), ImageConfig::for_mode(CameraMode::Qhvga));
}

#[test]
fn test_load_raw_image_attributes() {
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{"configuration": {"camera_mode": "CUSTOM", "image_width": 752, "image_height": 240}}"#,
    );
    let store = ConfigStore::with_defaults();
    store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap();

    let image = store.image_config();
    assert_eq!((image.width, image.height), (752, 240));
    assert_eq!((image.source_width, image.source_height), (640, 480));
    assert_eq!(image.downsample_rate, 2);
}

#[test]
fn test_load_missing_file_registers_output() {
    let scratch = ScratchFile::empty("missing.json");
    let store = ConfigStore::with_defaults();

    let err = store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
    assert_eq!(store.output_file(DEFAULT_SECTION), Some(scratch.path.clone()));

    store.set_attribute("tracking_mode", "fast", true);
    assert!(store.save(DEFAULT_SECTION, false));
    assert!(scratch.path.exists());
}

#[test]
fn test_load_malformed_applies_nothing() {
    let scratch = ScratchFile::with_contents(
        "config.json",
        r#"{"configuration": {"tracking_mode": "fast", "camera_type": }}"#,
    );
    let store = ConfigStore::with_defaults();

    let err = store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap_err();
    match err {
        ConfigError::ParseError { kind, .. } => {
            assert_eq!(kind, ParseErrorKind::UnexpectedCharacter('}'))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(
        store.get_attribute::<String>("tracking_mode").as_deref(),
        Some("balanced")
    );
    assert!(store.modified_attributes().is_empty());
}

#[test]
fn test_load_schema_errors() {
    let store = ConfigStore::with_defaults();

    let not_object = ScratchFile::with_contents("a.json", "[]");
    let err = store.load_from_file(&not_object.path, DEFAULT_SECTION).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaError { .. }));

    let no_section = ScratchFile::with_contents("b.json", r#"{"other": {}}"#);
    let err = store.load_from_file(&no_section.path, DEFAULT_SECTION).unwrap_err();
    assert!(err.to_string().contains("Section 'configuration' not found"));

    let bad_section = ScratchFile::with_contents("c.json", r#"{"configuration": 5}"#);
    let err = store.load_from_file(&bad_section.path, DEFAULT_SECTION).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaError { .. }));
}

#[test]
fn test_try_load_reports_false() {
    init_tracing();
    let scratch = ScratchFile::with_contents("config.json", "");
    let store = ConfigStore::with_defaults();

    assert!(!store.try_load_from_file(&scratch.path, DEFAULT_SECTION, true));
    assert!(!store.try_load_from_file(&scratch.path, DEFAULT_SECTION, false));

    fs::write(&scratch.path, r#"{"configuration": {"tracking_mode": "fast"}}"#).unwrap();
    assert!(store.try_load_from_file(&scratch.path, DEFAULT_SECTION, true));
}

#[test]
fn test_load_then_save_round_trip() {
    let source = ScratchFile::with_contents(
        "config.json",
        r#"{"configuration": {"interaction_box_height": 250, "screen_calibration1": [1.5, 2.5]}}"#,
    );
    let store = ConfigStore::with_defaults();
    store.load_from_file(&source.path, DEFAULT_SECTION).unwrap();
    assert!(store.save(DEFAULT_SECTION, false));

    let reloaded = ConfigStore::with_defaults();
    reloaded.load_from_file(&source.path, DEFAULT_SECTION).unwrap();
    assert_eq!(reloaded.get_attribute::<i64>("interaction_box_height"), Some(250));
    assert_eq!(
        reloaded.get_attribute_value("screen_calibration1"),
        Some(Value::from_json("[1.5,2.5]").unwrap())
    );
}

#[test]
fn test_user_camera_mode_change_is_saved() {
    let scratch = ScratchFile::empty("config.json");
    let store = ConfigStore::with_defaults();
    store.set_output_file(&scratch.path, DEFAULT_SECTION);

    assert!(store.set_camera_mode(CameraMode::Vga, true));
    assert_eq!(
        scratch.read_value()["configuration"]["camera_mode"],
        Value::from("VGA")
    );
    assert_eq!(store.image_config().downsample_rate, 1);
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_backing_file() {
    let scratch = ScratchFile::with_contents(
        "config.yaml",
        "configuration:\n  tracking_mode: fast\nother:\n  keep: 1\n",
    );
    let store = ConfigStore::builder()
        .codec_for_path(&scratch.path)
        .with_defaults()
        .build();
    assert_eq!(store.codec().name(), "yaml");

    store.load_from_file(&scratch.path, DEFAULT_SECTION).unwrap();
    assert_eq!(
        store.get_attribute::<String>("tracking_mode").as_deref(),
        Some("fast")
    );

    store.set_attribute("interaction_box_height", 300, true);
    assert!(store.save(DEFAULT_SECTION, false));

    let text = fs::read_to_string(&scratch.path).unwrap();
    let saved = store.codec().parse(&text).unwrap();
    assert_eq!(saved["configuration"]["interaction_box_height"], Value::Int(300));
    assert_eq!(saved["other"]["keep"], Value::Int(1));
}
