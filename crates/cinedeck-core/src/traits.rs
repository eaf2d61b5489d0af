// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the conversation engine, the catalog store, and the
//! read API. Keeping these in the core crate lets the engine and gateway be
//! tested against in-memory implementations.

use async_trait::async_trait;

use crate::error::CinedeckError;
use crate::types::{ContentRecord, NewContent};

/// The durable record repository.
///
/// Insert is the point of commitment for a conversation: once it succeeds
/// the collected record exists independently of any session state. Reads
/// are ordered by creation time, newest first.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Persists a collected record and returns its assigned id.
    async fn insert(&self, content: NewContent) -> Result<String, CinedeckError>;

    /// Lists records by `created_at` descending. `None` means unbounded.
    async fn list_recent(&self, limit: Option<i64>) -> Result<Vec<ContentRecord>, CinedeckError>;

    /// Fetches a single record, or `None` if the id is unknown.
    async fn get_by_id(&self, id: &str) -> Result<Option<ContentRecord>, CinedeckError>;
}
