//! Unit tests for configuration resolution
//!
//! Tests cover:
//! - TOML parsing with partial and complete documents
//! - Priority order: CLI arguments > TOML file > built-in defaults
//! - Environment variable overrides via clap
//! - Derived paths (staging directory, database file) under the root folder
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests that
//! manipulate WARDBOARD_PORT or WARDBOARD_ROOT_FOLDER are marked #[serial].

use std::env;
use std::path::PathBuf;

use clap::Parser;
use serial_test::serial;

use wardboard::config::{load_toml_config, AppConfig, Args, TomlConfig};

#[test]
fn test_toml_defaults_from_empty_document() {
    let config: TomlConfig = toml::from_str("").unwrap();

    assert_eq!(config.port, 5730);
    assert_eq!(config.bind, "127.0.0.1");
    assert_eq!(config.root_folder, None);
    assert!(config.demo_fallback);
    assert_eq!(config.ocr.binary, "tesseract");
    assert_eq!(config.ocr.language, "eng");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_toml_full_document() {
    let toml_str = r#"
        port = 8080
        bind = "0.0.0.0"
        root_folder = "/srv/wardboard"
        demo_fallback = false

        [ocr]
        binary = "/usr/local/bin/tesseract"
        language = "deu"

        [logging]
        level = "debug"
    "#;

    let config: TomlConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.bind, "0.0.0.0");
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/wardboard")));
    assert!(!config.demo_fallback);
    assert_eq!(config.ocr.binary, "/usr/local/bin/tesseract");
    assert_eq!(config.ocr.language, "deu");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_toml_partial_ocr_table() {
    // Missing table fields fall back independently
    let toml_str = r#"
        [ocr]
        language = "spa"
    "#;

    let config: TomlConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.ocr.binary, "tesseract");
    assert_eq!(config.ocr.language, "spa");
}

#[test]
fn test_resolve_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("wardboard.toml");
    std::fs::write(
        &config_path,
        format!(
            "port = 6000\nroot_folder = \"{}\"\ndemo_fallback = false\n",
            dir.path().join("data").display()
        ),
    )
    .unwrap();

    let args = Args {
        config: Some(config_path),
        ..Default::default()
    };
    let config = AppConfig::resolve(&args).unwrap();

    assert_eq!(config.port, 6000);
    assert_eq!(config.root_folder, dir.path().join("data"));
    assert_eq!(config.staging_dir, dir.path().join("data").join("staging"));
    assert_eq!(
        config.database_path,
        dir.path().join("data").join("wardboard.db")
    );
    assert!(!config.demo_fallback);
}

#[test]
fn test_resolve_args_override_toml() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("wardboard.toml");
    std::fs::write(&config_path, "port = 6000\nroot_folder = \"/srv/from-toml\"\n").unwrap();

    let args = Args {
        port: Some(7000),
        root_folder: Some(dir.path().join("from-args")),
        config: Some(config_path),
    };
    let config = AppConfig::resolve(&args).unwrap();

    assert_eq!(config.port, 7000);
    assert_eq!(config.root_folder, dir.path().join("from-args"));
}

#[test]
fn test_resolve_missing_explicit_config_fails() {
    let args = Args {
        config: Some(PathBuf::from("/nonexistent/wardboard.toml")),
        ..Default::default()
    };

    assert!(AppConfig::resolve(&args).is_err());
}

#[test]
fn test_load_toml_config_rejects_bad_syntax() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("broken.toml");
    std::fs::write(&config_path, "port = \"not closed").unwrap();

    assert!(load_toml_config(&config_path).is_err());
}

#[test]
fn test_bind_addr_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().to_path_buf());

    assert_eq!(config.bind_addr(), "127.0.0.1:5730");
}

#[test]
fn test_ensure_directories_creates_layout() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("root");
    let config = test_config(root.clone());

    config.ensure_directories().unwrap();
    assert!(root.is_dir());
    assert!(root.join("staging").is_dir());

    // Safe to call again
    config.ensure_directories().unwrap();
}

#[test]
#[serial]
fn test_env_port_override() {
    env::set_var("WARDBOARD_PORT", "9999");

    let args = Args::try_parse_from(["wardboard"]).unwrap();
    assert_eq!(args.port, Some(9999));

    // Cleanup
    env::remove_var("WARDBOARD_PORT");
}

#[test]
#[serial]
fn test_env_root_folder_override() {
    env::set_var("WARDBOARD_ROOT_FOLDER", "/tmp/wardboard-env-root");

    let args = Args::try_parse_from(["wardboard"]).unwrap();
    assert_eq!(
        args.root_folder,
        Some(PathBuf::from("/tmp/wardboard-env-root"))
    );

    // Cleanup
    env::remove_var("WARDBOARD_ROOT_FOLDER");
}

#[test]
#[serial]
fn test_cli_beats_env() {
    env::set_var("WARDBOARD_PORT", "9999");

    let args = Args::try_parse_from(["wardboard", "--port", "4444"]).unwrap();
    assert_eq!(args.port, Some(4444));

    // Cleanup
    env::remove_var("WARDBOARD_PORT");
}

/// Test helper: AppConfig rooted at the given folder with defaults elsewhere
fn test_config(root: PathBuf) -> AppConfig {
    AppConfig {
        bind: "127.0.0.1".to_string(),
        port: 5730,
        staging_dir: root.join("staging"),
        database_path: root.join("wardboard.db"),
        root_folder: root,
        demo_fallback: true,
        ocr_binary: "tesseract".to_string(),
        ocr_language: "eng".to_string(),
        log_level: "info".to_string(),
    }
}
