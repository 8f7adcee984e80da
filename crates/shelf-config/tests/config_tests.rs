// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Shelf configuration system.

use shelf_config::diagnostic::{ConfigError, suggest_key};
use shelf_config::model::ShelfConfig;
use shelf_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_shelf_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[logging]
level = "debug"

[plugins]
directories = ["/opt/shelf/plugins", "plugins"]
exclude_patterns = ["^disabled-", "\\.bak$"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.plugins.directories, vec!["/opt/shelf/plugins", "plugins"]);
    assert_eq!(config.plugins.exclude_patterns, vec!["^disabled-", "\\.bak$"]);
}

/// Unknown field in [server] produces an unknown field error.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 9000
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.level, "info");
    assert!(config.plugins.directories.is_empty());
    assert_eq!(config.plugins.effective_directories(), vec!["plugins"]);
    assert!(config.plugins.exclude_patterns.is_empty());
}

/// Dotted overrides merge on top of TOML, the way env vars are applied.
#[test]
fn dotted_override_wins_over_toml() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: ShelfConfig = Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::string("[plugins]\nexclude_patterns = [\"a\"]\n"))
        .merge(("plugins.exclude_patterns", vec!["b", "c"]))
        .extract()
        .expect("should merge override");

    assert_eq!(config.plugins.exclude_patterns, vec!["b", "c"]);
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: ShelfConfig = Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::file("/nonexistent/path/shelf.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.server.port, 8080);
}

/// Plugin settings sections live next to host sections and survive loading.
#[test]
fn plugin_settings_sections_are_kept_in_figment() {
    let toml = r#"
[plugins]
directories = ["plugins"]

[FileSystemSourceSettings]
base_directory = "/srv/files"
"#;

    let loaded = load_and_validate_str(toml).expect("plugin sections are not host errors");
    let base: String = loaded
        .figment
        .extract_inner("FileSystemSourceSettings.base_directory")
        .expect("section should be reachable by its name");
    assert_eq!(base, "/srv/files");
}

/// Error output from load_and_validate_str includes the unknown key and a suggestion.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[plugins]
exclude_paterns = ["x"]
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "exclude_paterns"
                && suggestion.as_deref() == Some("exclude_patterns")
                && valid_keys.contains("directories")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error with suggestion, got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[server]
port = "not_a_number"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "should report the port type mismatch, got: {errors:?}"
    );
}

/// Validation runs after a successful extract.
#[test]
fn validation_catches_unknown_log_level() {
    let toml = r#"
[logging]
level = "chatty"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown level should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("logging.level"))
    ));
}

#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    assert!(suggest_key("zzzzzz", &["host", "port"]).is_none());
}

/// ConfigError implements miette::Diagnostic and renders.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "prot".to_string(),
        suggestion: Some("port".to_string()),
        valid_keys: "host, port".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `port`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("prot"));
}

/// An explicit config file is merged on top of defaults.
#[test]
fn explicit_config_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[server]\nport = 8181\n").unwrap();

    let config = shelf_config::load_config(Some(&path)).expect("explicit file should load");
    assert_eq!(config.server.port, 8181);
}
