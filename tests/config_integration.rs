//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use physlab::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("PHYSLAB_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("PHYSLAB_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_nested_env_override() {
    std::env::set_var("PHYSLAB_FLUIDS__TIME_STEPS", "10");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("PHYSLAB_FLUIDS__TIME_STEPS");
    assert_eq!(config.fluids.time_steps, 10);
    assert_eq!(config.fluids.to_plume_config().time_steps, 10);
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("PHYSLAB_WINDOW__TITLE");
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy("config/default.toml", dir.path().join("default.toml")).unwrap();

    let loaded = AppConfig::load_from(dir.path()).unwrap();
    let builtin = AppConfig::default();
    assert_eq!(loaded.window.title, builtin.window.title);
    assert_eq!(loaded.catalog.categories, builtin.catalog.categories);
    assert_eq!(loaded.kinematics.origin, builtin.kinematics.origin);
    assert_eq!(loaded.gravitation.planet_mass, builtin.gravitation.planet_mass);
    assert_eq!(loaded.fluids.to_plume_config(), builtin.fluids.to_plume_config());
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("default.toml"), "[frame]\nfps = 60\n").unwrap();
    std::fs::write(dir.path().join("user.toml"), "[frame]\nfps = 30\n").unwrap();

    let config = AppConfig::load_from(dir.path()).unwrap();
    assert_eq!(config.frame.fps, 30);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(dir.path().join("absent")).unwrap();
    assert_eq!(config.window.width, 800);
}

#[test]
#[serial]
fn test_malformed_value_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("default.toml"), "[frame]\nfps = \"fast\"\n").unwrap();

    let err = AppConfig::load_from(dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
