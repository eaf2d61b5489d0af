// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so unrecognized config
//! keys are rejected at startup with actionable diagnostics.

use serde::{Deserialize, Serialize};

/// Top-level Cinedeck configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only `telegram.bot_token` must be supplied to run `serve`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CinedeckConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Catalog database settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP read API settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Thumbnail asset storage settings.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Conversation session lifecycle settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name, used in the start-menu greeting.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "cinedeck".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram channel.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// List of allowed Telegram user IDs or usernames. Empty rejects all
    /// senders (secure default).
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// Catalog database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("cinedeck").join("cinedeck.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("cinedeck.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP read API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Host address to bind.
    #[serde(default = "default_http_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

/// Thumbnail asset storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory where downloaded thumbnails are persisted.
    #[serde(default = "default_assets_dir")]
    pub dir: String,

    /// URL path prefix under which the gateway serves the asset directory.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            url_prefix: default_url_prefix(),
        }
    }
}

fn default_assets_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("cinedeck").join("assets"))
        .unwrap_or_else(|| std::path::PathBuf::from("assets"))
        .to_string_lossy()
        .into_owned()
}

fn default_url_prefix() -> String {
    "/assets".to_string()
}

/// Conversation session lifecycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds of inactivity before an unfinished conversation is discarded.
    /// `0` disables the reaper entirely (sessions never expire).
    #[serde(default)]
    pub idle_timeout_secs: u64,

    /// Interval between reaper sweeps when the reaper is enabled.
    #[serde(default = "default_reap_interval_secs")]
    pub reap_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 0,
            reap_interval_secs: default_reap_interval_secs(),
        }
    }
}

fn default_reap_interval_secs() -> u64 {
    60
}
