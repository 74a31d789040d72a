//! Integration tests for configuration management

use std::fs;
use std::path::PathBuf;
use study_planner::config::{Config, ConfigOverrides};
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.out_dir.is_empty(),
        "Default out_dir should not be empty"
    );
    assert_eq!(config.form.default_start_time, "08:00");
    assert_eq!(config.form.default_end_time, "22:00");
    assert_eq!(config.form.default_break_duration, Some(15));
    assert_eq!(config.form.submit_delay_ms, Some(500));
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[form]
sample_file = "/tmp/seed.toml"
default_start_time = "07:30"
default_end_time = "23:00"
default_break_duration = 10
submit_delay_ms = 0

[paths]
out_dir = "./submissions"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.form.sample_file, "/tmp/seed.toml");
    assert_eq!(config.form.default_start_time, "07:30");
    assert_eq!(config.form.default_break_duration, Some(10));
    assert_eq!(config.form.submit_delay_ms, Some(0));
    assert_eq!(config.paths.out_dir, "./submissions");
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields fall back to serde defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.form.sample_file, "");
    assert!(config.form.default_break_duration.is_none());
    assert_eq!(config.paths.out_dir, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$STUDY_PLANNER/test.log"

[form]
sample_file = "$STUDY_PLANNER/seed.toml"

[paths]
out_dir = "$STUDY_PLANNER/out"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("studyplanner"));
    assert!(!config.logging.file.contains("$STUDY_PLANNER"));
    assert!(config.form.sample_file.ends_with("seed.toml"));
    assert!(!config.form.sample_file.contains("$STUDY_PLANNER"));
    assert!(!config.paths.out_dir.contains("$STUDY_PLANNER"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config
        .set("start-time", "06:00")
        .expect("Failed to set start time");
    assert_eq!(config.get("start_time").unwrap(), "06:00");

    config
        .set("break_duration", "20")
        .expect("Failed to set break duration");
    assert_eq!(config.form.default_break_duration, Some(20));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("submit_delay_ms", "soon").is_err());
    assert!(config.set("break-duration", "-5").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config
        .set("submit_delay_ms", "0")
        .expect("Failed to set delay");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("submit-delay-ms", &defaults)
        .expect("Failed to unset delay");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.form.submit_delay_ms, defaults.form.submit_delay_ms);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("end_time", "21:15")
        .expect("Failed to set end time");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.form.default_end_time, "21:15");
    assert_eq!(
        loaded_config.form.submit_delay_ms,
        config.form.submit_delay_ms
    );
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        sample_file: Some("/custom/seed.toml".to_string()),
        submit_delay_ms: Some(0),
        out_dir: Some("./custom_out".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.form.sample_file, "/custom/seed.toml");
    assert_eq!(config.form.submit_delay_ms, Some(0));
    assert_eq!(config.paths.out_dir, "./custom_out");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
    assert_eq!(config.form.submit_delay_ms, defaults.form.submit_delay_ms);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[form]"));
    assert!(display_str.contains("[paths]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("default_start_time"));
    assert!(display_str.contains("out_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
out_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.form.default_start_time, defaults.form.default_start_time);
    assert_eq!(config.form.submit_delay_ms, defaults.form.submit_delay_ms);
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[form]
default_start_time = "05:00"
submit_delay_ms = 0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.form.default_start_time, "05:00");
    assert_eq!(config.form.submit_delay_ms, Some(0));
}

#[test]
fn test_get_studyplanner_dir() {
    let dir = Config::get_studyplanner_dir();

    assert!(dir.to_string_lossy().contains("studyplanner"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
