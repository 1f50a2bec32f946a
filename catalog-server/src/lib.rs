//! Catalog Server - storefront category tree service
//!
//! Categories form a forest through single `parent` links. Each category
//! keeps a denormalized, root-first `ancestors` list so breadcrumbs render
//! without recursive lookups.
//!
//! # Module layout
//!
//! ```text
//! catalog-server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── catalog/   # slug derivation, ancestor maintenance
//! ├── db/        # store trait, SurrealDB repository, in-memory store
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # error re-exports, logging
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod utils;

pub use catalog::{CategoryError, CategoryTree};
pub use core::{Config, Server, ServerState};
pub use db::{CategoryStore, DbService, MemoryCategoryStore};

/// Load `.env`, then initialize logging from the resulting environment
pub fn setup_environment() -> anyhow::Result<Config> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    let log_dir = config.log_dir();
    utils::logger::init_logger_with_file(&config.log_level, config.log_json, Some(log_dir.as_path()))?;
    Ok(config)
}
