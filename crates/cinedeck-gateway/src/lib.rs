// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP read API for the Cinedeck catalog.
//!
//! Exposes the catalog as JSON (`/api/content`, `/api/content/{id}`),
//! serves stored thumbnails statically, and reports process health.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, build_router, start_server};
