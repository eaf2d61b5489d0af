// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the CatalogStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use cinedeck_config::model::StorageConfig;
use cinedeck_core::{CatalogStore, CinedeckError, ContentRecord, NewContent};

use crate::database::Database;
use crate::queries;

/// SQLite-backed catalog store.
///
/// Wraps a [`Database`] handle and delegates query operations to the typed
/// query modules. The database is lazily opened on the first call to
/// [`SqliteCatalog::initialize`].
pub struct SqliteCatalog {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteCatalog {
    /// Create a new SqliteCatalog with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteCatalog::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), CinedeckError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| CinedeckError::Storage {
            source: "catalog already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite catalog initialized");
        Ok(())
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), CinedeckError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
        }
        Ok(())
    }

    fn db(&self) -> Result<&Database, CinedeckError> {
        self.db.get().ok_or_else(|| CinedeckError::Storage {
            source: "catalog not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn insert(&self, content: NewContent) -> Result<String, CinedeckError> {
        queries::content::insert_record(self.db()?, content).await
    }

    async fn list_recent(&self, limit: Option<i64>) -> Result<Vec<ContentRecord>, CinedeckError> {
        queries::content::list_recent(self.db()?, limit).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ContentRecord>, CinedeckError> {
        queries::content::get_by_id(self.db()?, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedeck_core::ContentKind;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn movie(title: &str) -> NewContent {
        NewContent {
            kind: ContentKind::Movie,
            title: title.to_string(),
            thumbnail_ref: "/assets/x.jpg".to_string(),
            streaming_links: vec!["http://link".to_string()],
            episodes: vec![],
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let catalog = SqliteCatalog::new(make_config(db_path.to_str().unwrap()));

        catalog.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let catalog = SqliteCatalog::new(make_config(db_path.to_str().unwrap()));

        catalog.initialize().await.unwrap();
        assert!(catalog.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let catalog = SqliteCatalog::new(make_config(db_path.to_str().unwrap()));

        assert!(catalog.list_recent(None).await.is_err());
        assert!(catalog.insert(movie("Early")).await.is_err());
    }

    #[tokio::test]
    async fn full_lifecycle_through_trait_object() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let catalog = SqliteCatalog::new(make_config(db_path.to_str().unwrap()));
        catalog.initialize().await.unwrap();

        let store: &dyn CatalogStore = &catalog;
        let id = store.insert(movie("Alien")).await.unwrap();

        let fetched = store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Alien");

        let listed = store.list_recent(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);

        catalog.close().await.unwrap();
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("persist.db");
        let config = make_config(db_path.to_str().unwrap());

        let catalog = SqliteCatalog::new(config.clone());
        catalog.initialize().await.unwrap();
        let id = catalog.insert(movie("Persisted")).await.unwrap();
        catalog.close().await.unwrap();
        drop(catalog);

        let reopened = SqliteCatalog::new(config);
        reopened.initialize().await.unwrap();
        let fetched = reopened.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Persisted");
        reopened.close().await.unwrap();
    }
}
