use std::sync::Arc;
use std::time::Duration;

use catalog_core::cache::QueryCache;
use catalog_db::models::category::CategoryRead;

use crate::config::ServerConfig;

/// Cache of category listings, keyed by request shape.
pub type CategoryCache = QueryCache<Arc<Vec<CategoryRead>>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Category listing cache, shared by every request.
    pub category_cache: Arc<CategoryCache>,
}

impl AppState {
    /// Build the state, sizing the category cache from `config`.
    pub fn new(pool: catalog_db::DbPool, config: ServerConfig) -> Self {
        let category_cache = QueryCache::new(
            Duration::from_secs(config.category_cache_ttl_secs),
            config.category_cache_max_entries,
        );

        Self {
            pool,
            config: Arc::new(config),
            category_cache: Arc::new(category_cache),
        }
    }
}
