// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read API HTTP server built on axum.
//!
//! Serves the catalog read endpoints plus the static asset directory under
//! the configured URL prefix. Everything is unauthenticated read-only.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use cinedeck_config::model::{AssetsConfig, HttpConfig};
use cinedeck_core::{CatalogStore, CinedeckError};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub catalog: Arc<dyn CatalogStore>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Build the full application router.
///
/// Routes:
/// - GET /health
/// - GET /api/content
/// - GET /api/content/{id}
/// - GET {assets.url_prefix}/* (static files from the asset directory)
pub fn build_router(state: GatewayState, assets: &AssetsConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/content", get(handlers::list_content))
        .route("/api/content/{id}", get(handlers::get_content))
        .with_state(state)
        .nest_service(&assets.url_prefix, ServeDir::new(&assets.dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve the read API until the process exits.
pub async fn start_server(
    config: &HttpConfig,
    assets: &AssetsConfig,
    state: GatewayState,
) -> Result<(), CinedeckError> {
    let app = build_router(state, assets);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CinedeckError::Channel {
            message: format!("failed to bind read API to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Read API listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| CinedeckError::Channel {
            message: format!("read API server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
