// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row mapping for catalog entities.
//!
//! The canonical types live in `cinedeck-core::types` so they can cross the
//! adapter trait boundary. This module re-exports them and owns the SQL row
//! decoding, including the JSON columns.

use std::str::FromStr;

use rusqlite::Row;
use rusqlite::types::Type;

pub use cinedeck_core::{ContentKind, ContentRecord, Episode, NewContent};

/// Decode a row from the `content` table, in column order
/// `id, kind, title, thumbnail_ref, streaming_links, episodes, created_at`.
///
/// JSON and kind decode failures surface as `FromSqlConversionFailure` so
/// they propagate through rusqlite's normal error path.
pub(crate) fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ContentRecord> {
    let kind_raw: String = row.get(1)?;
    let kind = ContentKind::from_str(&kind_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let links_raw: String = row.get(4)?;
    let streaming_links: Vec<String> = serde_json::from_str(&links_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    let episodes_raw: String = row.get(5)?;
    let episodes: Vec<Episode> = serde_json::from_str(&episodes_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(ContentRecord {
        id: row.get(0)?,
        kind,
        title: row.get(2)?,
        thumbnail_ref: row.get(3)?,
        streaming_links,
        episodes,
        created_at: row.get(6)?,
    })
}
