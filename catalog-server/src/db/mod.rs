//! Database Module
//!
//! Owns the embedded SurrealDB handle and hands out the category store.
//! The handle is opened at startup and closed at shutdown.

pub mod memory;
pub mod repository;
pub mod store;

pub use memory::MemoryCategoryStore;
pub use repository::{CategoryRepository, RepoError, RepoResult};
pub use store::{CategoryPatch, CategoryStore, NewCategory};

use std::path::PathBuf;
use std::sync::Arc;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Table and index definitions, applied on every open
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS category_slug ON TABLE category FIELDS slug UNIQUE;
DEFINE INDEX IF NOT EXISTS category_parent ON TABLE category FIELDS parent;
DEFINE INDEX IF NOT EXISTS category_flags ON TABLE category FIELDS is_active, is_featured;
"#;

/// Storage engine behind [`DbService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbEngine {
    /// Embedded RocksDB at the given path
    RocksDb(PathBuf),
    /// Volatile in-process storage
    Memory,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub engine: DbEngine,
    pub namespace: String,
    pub database: String,
}

impl DbConfig {
    pub fn memory() -> Self {
        Self {
            engine: DbEngine::Memory,
            namespace: "storefront".to_string(),
            database: "catalog".to_string(),
        }
    }
}

/// Database service owning the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl std::fmt::Debug for DbService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbService").finish_non_exhaustive()
    }
}

impl DbService {
    /// Open the configured engine, select namespace/database and apply the schema
    pub async fn open(config: &DbConfig) -> Result<Self, AppError> {
        let db = match &config.engine {
            DbEngine::RocksDb(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                Surreal::new::<RocksDb>(path.as_path())
                    .await
                    .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
            }
            DbEngine::Memory => Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?,
        };

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(
            engine = ?config.engine,
            namespace = %config.namespace,
            database = %config.database,
            "Database connection established"
        );

        Ok(Self { db })
    }

    /// Category store backed by this handle
    pub fn category_store(&self) -> Arc<dyn CategoryStore> {
        Arc::new(CategoryRepository::new(self.db.clone()))
    }

    /// Release this handle.
    ///
    /// The embedded engine shuts down once every clone (including the stores
    /// handed out by [`category_store`](Self::category_store)) is dropped.
    pub fn close(self) {
        drop(self.db);
        tracing::info!("Database handle closed");
    }
}
