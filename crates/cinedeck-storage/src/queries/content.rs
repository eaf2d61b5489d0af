// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog record operations. Records are insert-only; there is no update
//! or delete path.

use chrono::Utc;
use cinedeck_core::{CinedeckError, ContentRecord, NewContent};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::models::record_from_row;

const SELECT_COLUMNS: &str =
    "id, kind, title, thumbnail_ref, streaming_links, episodes, created_at";

/// Insert a validated record, assigning its id and creation timestamp.
/// Returns the generated id.
pub async fn insert_record(db: &Database, content: NewContent) -> Result<String, CinedeckError> {
    content.validate()?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();
    let streaming_links = serde_json::to_string(&content.streaming_links)
        .map_err(|e| CinedeckError::Internal(format!("encoding streaming_links: {e}")))?;
    let episodes = serde_json::to_string(&content.episodes)
        .map_err(|e| CinedeckError::Internal(format!("encoding episodes: {e}")))?;

    let row_id = id.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO content (id, kind, title, thumbnail_ref, streaming_links, episodes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row_id,
                    content.kind.to_string(),
                    content.title,
                    content.thumbnail_ref,
                    streaming_links,
                    episodes,
                    created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(id)
}

/// List records newest-first. `limit` of `None` returns everything.
///
/// rowid breaks ties between records sharing a created_at instant, so
/// insertion order is preserved within the same timestamp.
pub async fn list_recent(
    db: &Database,
    limit: Option<i64>,
) -> Result<Vec<ContentRecord>, CinedeckError> {
    db.connection()
        .call(move |conn| -> Result<Vec<ContentRecord>, rusqlite::Error> {
            let mut records = Vec::new();
            match limit {
                Some(n) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {SELECT_COLUMNS} FROM content
                         ORDER BY created_at DESC, rowid DESC LIMIT ?1"
                    ))?;
                    let rows = stmt.query_map(params![n], record_from_row)?;
                    for row in rows {
                        records.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {SELECT_COLUMNS} FROM content
                         ORDER BY created_at DESC, rowid DESC"
                    ))?;
                    let rows = stmt.query_map([], record_from_row)?;
                    for row in rows {
                        records.push(row?);
                    }
                }
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a single record by id.
pub async fn get_by_id(db: &Database, id: &str) -> Result<Option<ContentRecord>, CinedeckError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<ContentRecord>, rusqlite::Error> {
            let mut stmt = conn
                .prepare(&format!("SELECT {SELECT_COLUMNS} FROM content WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], record_from_row);
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
