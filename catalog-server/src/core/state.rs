use std::sync::Arc;

use crate::catalog::CategoryTree;
use crate::core::Config;
use crate::db::{CategoryStore, DbService};
use crate::utils::AppError;

/// State shared by every request handler
///
/// Cheap to clone: the category tree and the database handle are both
/// reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    /// `None` when the state was built over a bare store
    pub db: Option<DbService>,
    pub categories: CategoryTree,
}

impl ServerState {
    /// Open the configured database and build the category tree over it
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::open(&config.db_config()).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    pub fn with_db(config: Config, db: DbService) -> Self {
        let categories = CategoryTree::new(db.category_store());
        Self {
            config,
            db: Some(db),
            categories,
        }
    }

    /// State over an arbitrary store (e.g. `MemoryCategoryStore`)
    pub fn with_store(config: Config, store: Arc<dyn CategoryStore>) -> Self {
        Self {
            config,
            db: None,
            categories: CategoryTree::new(store),
        }
    }

    /// Release the database handle, if any
    pub fn shutdown(self) {
        if let Some(db) = self.db {
            db.close();
        }
    }
}
