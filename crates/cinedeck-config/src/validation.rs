// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::CinedeckConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CinedeckConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.http.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "http.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("http.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.assets.dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "assets.dir must not be empty".to_string(),
        });
    }

    if !config.assets.url_prefix.starts_with('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "assets.url_prefix must start with `/`, got `{}`",
                config.assets.url_prefix
            ),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if config.session.reap_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "session.reap_interval_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
