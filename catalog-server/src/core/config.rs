use std::path::PathBuf;

use crate::db::{DbConfig, DbEngine};

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (or `.env`):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | data and log root |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_JSON | true in production | JSON console output |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | MAX_CONNECTIONS | 1000 | concurrent in-flight requests |
/// | DB_ENGINE | rocksdb | `rocksdb` or `memory` |
/// | DB_NAMESPACE | storefront | SurrealDB namespace |
/// | DB_DATABASE | catalog | SurrealDB database |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/catalog HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Holds `database/` and `logs/`
    pub work_dir: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub request_timeout_ms: u64,
    pub max_connections: usize,
    /// `rocksdb` or `memory`
    pub db_engine: String,
    pub db_namespace: String,
    pub db_database: String,
}

impl Config {
    /// Load from the process environment; unset or unparsable values fall back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        Self {
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_production),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            max_connections: lookup("MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            db_engine: lookup("DB_ENGINE")
                .map(|e| e.to_lowercase())
                .unwrap_or_else(|| "rocksdb".into()),
            db_namespace: lookup("DB_NAMESPACE").unwrap_or_else(|| "storefront".into()),
            db_database: lookup("DB_DATABASE").unwrap_or_else(|| "catalog".into()),
            environment,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
            .join("database")
            .join("catalog.db")
    }

    pub fn db_config(&self) -> DbConfig {
        let engine = match self.db_engine.as_str() {
            "memory" | "mem" => DbEngine::Memory,
            _ => DbEngine::RocksDb(self.database_path()),
        };
        DbConfig {
            engine,
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
