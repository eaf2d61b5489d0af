// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem-backed asset store for thumbnails.
//!
//! Assets land in a single flat directory under generated, collision-free
//! names. The store hands back the public URL path (`url_prefix` + filename)
//! rather than the filesystem path; the gateway serves the directory under
//! the same prefix.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use cinedeck_config::model::AssetsConfig;
use cinedeck_core::CinedeckError;
use tracing::debug;
use uuid::Uuid;

/// Fallback extension when neither the URL path nor the response headers
/// reveal one.
const DEFAULT_EXTENSION: &str = "jpg";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Stores thumbnail files and mints their public URL paths.
#[derive(Debug, Clone)]
pub struct AssetStore {
    http: reqwest::Client,
    dir: PathBuf,
    url_prefix: String,
}

impl AssetStore {
    /// Build a store over the configured directory, creating it if needed.
    pub fn new(config: &AssetsConfig) -> Result<Self, CinedeckError> {
        let dir = PathBuf::from(&config.dir);
        std::fs::create_dir_all(&dir).map_err(|source| CinedeckError::Write { source })?;

        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| CinedeckError::Fetch {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            dir,
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// The directory assets are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Download the resource at `url` and store it. Returns the public URL
    /// path of the stored copy.
    ///
    /// Transport failures and non-success statuses both surface as fetch
    /// errors; nothing is written in either case.
    pub async fn store_remote(&self, url: &str) -> Result<String, CinedeckError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CinedeckError::Fetch {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CinedeckError::Fetch {
                message: format!("{url} returned {status}"),
                source: None,
            });
        }

        let ext = extension_from_url(url).unwrap_or(DEFAULT_EXTENSION);
        let bytes = response.bytes().await.map_err(|e| CinedeckError::Fetch {
            message: format!("reading body from {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        self.store_bytes(&bytes, ext).await
    }

    /// Store raw bytes under a generated name with the given extension.
    /// Returns the public URL path of the stored file.
    pub async fn store_bytes(&self, bytes: &[u8], ext: &str) -> Result<String, CinedeckError> {
        let name = generate_name(ext);
        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| CinedeckError::Write { source })?;
        debug!(path = %path.display(), size = bytes.len(), "asset stored");
        Ok(format!("{}/{name}", self.url_prefix))
    }
}

/// `{unix_millis}-{uuid}.{ext}` keeps names unique even when two users
/// upload within the same millisecond.
fn generate_name(ext: &str) -> String {
    format!("{}-{}.{ext}", Utc::now().timestamp_millis(), Uuid::new_v4())
}

/// Pull a plausible file extension out of a URL path, ignoring query strings.
fn extension_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let last = path.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    if !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_store(dir: &Path) -> AssetStore {
        let config = AssetsConfig {
            dir: dir.to_str().unwrap().to_string(),
            url_prefix: "/assets".to_string(),
        };
        AssetStore::new(&config).unwrap()
    }

    #[test]
    fn extension_from_url_handles_common_shapes() {
        assert_eq!(extension_from_url("http://x/a/poster.png"), Some("png"));
        assert_eq!(extension_from_url("http://x/poster.jpeg?sig=abc"), Some("jpeg"));
        assert_eq!(extension_from_url("http://x/no-extension"), None);
        assert_eq!(extension_from_url("http://x/weird.morethan5"), None);
    }

    #[test]
    fn new_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/assets");
        let store = make_store(&nested);
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested);
    }

    #[tokio::test]
    async fn store_bytes_writes_file_and_returns_url_path() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        let url_path = store.store_bytes(b"fake-image", "jpg").await.unwrap();
        assert!(url_path.starts_with("/assets/"));
        assert!(url_path.ends_with(".jpg"));

        let name = url_path.strip_prefix("/assets/").unwrap();
        let written = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(written, b"fake-image");
    }

    #[tokio::test]
    async fn store_bytes_names_do_not_collide() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());
        let a = store.store_bytes(b"a", "png").await.unwrap();
        let b = store.store_bytes(b"b", "png").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn store_remote_downloads_and_stores() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/poster.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        let url_path = store
            .store_remote(&format!("{}/poster.png", server.uri()))
            .await
            .unwrap();
        assert!(url_path.ends_with(".png"));

        let name = url_path.strip_prefix("/assets/").unwrap();
        let written = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn store_remote_non_success_is_fetch_error_and_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        let err = store
            .store_remote(&format!("{}/missing.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, CinedeckError::Fetch { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn store_remote_unreachable_host_is_fetch_error() {
        let dir = tempdir().unwrap();
        let store = make_store(dir.path());

        let err = store
            .store_remote("http://127.0.0.1:1/poster.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, CinedeckError::Fetch { .. }));
    }
}
