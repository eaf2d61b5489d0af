// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo download from Telegram servers.

use cinedeck_core::CinedeckError;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileMeta, PhotoSize};
use tracing::debug;

/// Download a file from Telegram servers by its file metadata.
///
/// Uses the Bot API's `getFile` to resolve the file path, then downloads
/// the content as bytes.
pub async fn download_file(bot: &Bot, file_meta: &FileMeta) -> Result<Vec<u8>, CinedeckError> {
    let file = bot
        .get_file(file_meta.id.clone())
        .await
        .map_err(|e| CinedeckError::Fetch {
            message: format!("failed to get file info: {e}"),
            source: Some(Box::new(e)),
        })?;

    let mut buf = Vec::new();
    bot.download_file(&file.path, &mut buf)
        .await
        .map_err(|e| CinedeckError::Fetch {
            message: format!("failed to download file: {e}"),
            source: Some(Box::new(e)),
        })?;

    debug!(file_id = %file_meta.id, size = buf.len(), "downloaded file from Telegram");
    Ok(buf)
}

/// Download the largest available variant of a photo message.
///
/// Telegram provides multiple sizes; the last one is the largest.
pub async fn download_largest_photo(
    bot: &Bot,
    photos: &[PhotoSize],
) -> Result<Vec<u8>, CinedeckError> {
    let largest = photos.last().ok_or_else(|| CinedeckError::Fetch {
        message: "photo array is empty".into(),
        source: None,
    })?;
    download_file(bot, &largest.file).await
}
