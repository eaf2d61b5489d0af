// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cinedeck serve` command implementation.
//!
//! Starts the SQLite catalog, asset store, conversation engine, HTTP read
//! API, and (when a bot token is configured) Telegram long polling. Runs
//! until ctrl-c, then checkpoints the database.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use cinedeck_assets::AssetStore;
use cinedeck_config::model::CinedeckConfig;
use cinedeck_core::{CatalogStore, CinedeckError};
use cinedeck_flow::Engine;
use cinedeck_gateway::{GatewayState, start_server};
use cinedeck_storage::SqliteCatalog;
use cinedeck_telegram::TelegramChannel;

/// Runs the `cinedeck serve` command.
pub async fn run_serve(config: CinedeckConfig) -> Result<(), CinedeckError> {
    init_tracing(&config.app.log_level);

    info!(name = %config.app.name, "starting cinedeck serve");

    // Catalog storage.
    let catalog = Arc::new(SqliteCatalog::new(config.storage.clone()));
    catalog.initialize().await?;
    let catalog_dyn: Arc<dyn CatalogStore> = catalog.clone();

    // Asset store (creates the directory if missing).
    let assets = Arc::new(AssetStore::new(&config.assets)?);

    // Conversation engine.
    let engine = Arc::new(Engine::new(catalog_dyn.clone()));

    // Idle-session reaper, disabled unless a timeout is configured.
    let reaper = if config.session.idle_timeout_secs > 0 {
        let engine = engine.clone();
        let idle = Duration::from_secs(config.session.idle_timeout_secs);
        let interval = Duration::from_secs(config.session.reap_interval_secs);
        info!(idle_secs = idle.as_secs(), "session reaper enabled");
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                engine.sessions().reap_idle(idle);
            }
        }))
    } else {
        None
    };

    // Read API.
    let http_config = config.http.clone();
    let assets_config = config.assets.clone();
    let gateway_state = GatewayState {
        catalog: catalog_dyn,
        start_time: std::time::Instant::now(),
    };
    let mut gateway = tokio::spawn(async move {
        start_server(&http_config, &assets_config, gateway_state).await
    });

    // Telegram long polling, if configured. The dispatcher installs its own
    // ctrl-c handler and returns on shutdown.
    if config.telegram.bot_token.is_some() {
        let channel = TelegramChannel::new(config.telegram.clone(), engine.clone(), assets)?;
        tokio::select! {
            () = channel.run() => {
                info!("Telegram polling stopped");
            }
            result = &mut gateway => {
                surface_gateway_exit(result)?;
            }
        }
    } else {
        warn!("telegram.bot_token not set; running read API only");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("received ctrl-c");
            }
            result = &mut gateway => {
                surface_gateway_exit(result)?;
            }
        }
    }

    if let Some(handle) = reaper {
        handle.abort();
    }
    gateway.abort();

    // Flush pending writes before exit.
    catalog.close().await?;
    info!("shutdown complete");
    Ok(())
}

fn surface_gateway_exit(
    result: Result<Result<(), CinedeckError>, tokio::task::JoinError>,
) -> Result<(), CinedeckError> {
    match result {
        Ok(Ok(())) => {
            warn!("read API exited");
            Ok(())
        }
        Ok(Err(e)) => {
            error!(error = %e, "read API failed");
            Err(e)
        }
        Err(e) => Err(CinedeckError::Internal(format!(
            "read API task panicked: {e}"
        ))),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cinedeck={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
