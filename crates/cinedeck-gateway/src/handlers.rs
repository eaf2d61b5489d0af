// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the read API.
//!
//! Both content endpoints are pure read-throughs to the catalog store;
//! store failures surface as HTTP 500 with the underlying message.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use cinedeck_core::ContentRecord;

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> Response {
    error!(context, error = %e, "read API request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// GET /api/content
///
/// All records, newest first, unbounded.
pub async fn list_content(State(state): State<GatewayState>) -> Response {
    match state.catalog.list_recent(None).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => internal_error("list_content", e),
    }
}

/// GET /api/content/{id}
pub async fn get_content(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.get_by_id(&id).await {
        Ok(Some(record)) => (StatusCode::OK, Json::<ContentRecord>(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("content {id} not found"),
            }),
        )
            .into_response(),
        Err(e) => internal_error("get_content", e),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
