// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./cinedeck.toml` > `~/.config/cinedeck/cinedeck.toml`
//! > `/etc/cinedeck/cinedeck.toml` with environment variable overrides via the
//! `CINEDECK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CinedeckConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cinedeck/cinedeck.toml` (system-wide)
/// 3. `~/.config/cinedeck/cinedeck.toml` (user XDG config)
/// 4. `./cinedeck.toml` (local directory)
/// 5. `CINEDECK_*` environment variables
pub fn load_config() -> Result<CinedeckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CinedeckConfig::default()))
        .merge(Toml::file("/etc/cinedeck/cinedeck.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("cinedeck/cinedeck.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("cinedeck.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CinedeckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CinedeckConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CinedeckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CinedeckConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CINEDECK_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("CINEDECK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CINEDECK_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let mapped = key
            .as_str()
            .replacen("app_", "app.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("http_", "http.", 1)
            .replacen("assets_", "assets.", 1)
            .replacen("session_", "session.", 1);
        mapped.into()
    })
}
