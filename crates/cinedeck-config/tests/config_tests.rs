// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Cinedeck configuration system.

use cinedeck_config::diagnostic::{ConfigError, suggest_key};
use cinedeck_config::model::CinedeckConfig;
use cinedeck_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[app]
name = "test-catalog"
log_level = "debug"

[telegram]
bot_token = "123:ABC"
allowed_users = ["alice", "42"]

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[http]
host = "0.0.0.0"
port = 9090

[assets]
dir = "/tmp/assets"
url_prefix = "/thumbs"

[session]
idle_timeout_secs = 3600
reap_interval_secs = 30
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "test-catalog");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.allowed_users, vec!["alice", "42"]);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.http.host, "0.0.0.0");
    assert_eq!(config.http.port, 9090);
    assert_eq!(config.assets.dir, "/tmp/assets");
    assert_eq!(config.assets.url_prefix, "/thumbs");
    assert_eq!(config.session.idle_timeout_secs, 3600);
    assert_eq!(config.session.reap_interval_secs, 30);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "cinedeck");
    assert_eq!(config.app.log_level, "info");
    assert!(config.telegram.bot_token.is_none());
    assert!(config.telegram.allowed_users.is_empty());
    assert!(config.storage.wal_mode);
    assert_eq!(config.http.host, "127.0.0.1");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.assets.url_prefix, "/assets");
    assert_eq!(config.session.idle_timeout_secs, 0);
    assert_eq!(config.session.reap_interval_secs, 60);
}

/// Unknown field in a section produces an error.
#[test]
fn unknown_field_in_telegram_produces_error() {
    let toml = r#"
[telegram]
bot_tken = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("bot_tken"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dot-notation merge overrides the TOML value (same mechanism the
/// CINEDECK_* env provider maps onto).
#[test]
fn dotted_override_beats_toml() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[http]
port = 8080
"#;

    let config: CinedeckConfig = Figment::new()
        .merge(Serialized::defaults(CinedeckConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("http.port", 9999))
        .extract()
        .expect("should merge override");

    assert_eq!(config.http.port, 9999);
}

/// telegram.bot_token maps through dot notation, not nested tables.
#[test]
fn bot_token_dot_notation() {
    use figment::{Figment, providers::Serialized};

    let config: CinedeckConfig = Figment::new()
        .merge(Serialized::defaults(CinedeckConfig::default()))
        .merge(("telegram.bot_token", "xyz-from-env"))
        .extract()
        .expect("should set bot_token via dot notation");

    assert_eq!(config.telegram.bot_token.as_deref(), Some("xyz-from-env"));
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: CinedeckConfig = Figment::new()
        .merge(Serialized::defaults(CinedeckConfig::default()))
        .merge(Toml::file("/nonexistent/path/cinedeck.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.app.name, "cinedeck");
}

/// Unknown key "bot_tken" produces suggestion "did you mean `bot_token`?"
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[telegram]
bot_tken = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(!errors.is_empty());

    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "bot_tken"
                && suggestion.as_deref() == Some("bot_token")
                && valid_keys.contains("bot_token")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'bot_tken' with suggestion 'bot_token', got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[http]
port = "not_a_number"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("port"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// suggest_key behaves on config section keys.
#[test]
fn diagnostic_suggestions() {
    assert_eq!(
        suggest_key("databse_path", &["database_path", "wal_mode"]),
        Some("database_path".to_string())
    );
    assert!(suggest_key("qqqqq", &["database_path", "wal_mode"]).is_none());
}

/// ConfigError implements miette::Diagnostic and renders.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "bot_tken".to_string(),
        suggestion: Some("bot_token".to_string()),
        valid_keys: "bot_token, allowed_users".to_string(),
        span: None,
        src: None,
    };

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("bot_tken"));
}

/// Validation catches a zero reap interval through the high-level entry point.
#[test]
fn validation_catches_zero_reap_interval() {
    let toml = r#"
[session]
reap_interval_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero interval should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("reap_interval_secs"))
    }));
}

/// Valid TOML passes the high-level entry point.
#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[app]
name = "test"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.app.name, "test");
}
