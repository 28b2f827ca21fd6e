//! In-memory query result cache with sliding expiration.
//!
//! Each read of a live entry resets its idle countdown, so an entry that is
//! accessed at least once per TTL window never expires on its own. Writers
//! call [`QueryCache::invalidate_all`] to drop snapshots that may be stale.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;

/// Key for the full, ordered category listing.
pub const ALL_CATEGORIES_KEY: &str = "allCategories";

/// Default idle TTL for cached entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Default maximum number of cached entries.
pub const DEFAULT_MAX_ENTRIES: u64 = 1_000;

/// Key for one page of the ordered category listing.
pub fn paged_categories_key(page_number: i64, page_size: i64) -> String {
    format!("pagedCategories_{page_number}_{page_size}")
}

/// Shared cache of query results keyed by request shape.
///
/// Values should be cheap to clone (typically `Arc<Vec<_>>`) since every hit
/// hands out a clone of the stored snapshot.
pub struct QueryCache<V> {
    inner: Cache<String, V>,
    /// Bumped by every [`QueryCache::invalidate_all`]; loads that straddle a
    /// bump must not store their result.
    generation: AtomicU64,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache whose entries expire after `ttl` without access.
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(ttl)
            .build();

        Self {
            inner,
            generation: AtomicU64::new(0),
        }
    }

    /// Look up a live entry. A hit renews the entry's idle countdown.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    /// Store (or overwrite) an entry.
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), value).await;
    }

    /// Return the cached value for `key`, or run `load` and cache its result.
    ///
    /// Failed loads are not cached. Two concurrent misses may both run their
    /// loader; the later insert wins. A load that overlaps an
    /// [`QueryCache::invalidate_all`] is returned to its caller but never
    /// stored, since it may have read data the invalidating write replaced.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.inner.get(key).await {
            tracing::debug!(key, "Cache hit");
            return Ok(hit);
        }

        tracing::debug!(key, "Cache miss");
        let generation = self.generation.load(Ordering::Acquire);
        let value = load().await?;

        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!(key, "Cache invalidated during load, result not stored");
            return Ok(value);
        }
        self.inner.insert(key.to_string(), value.clone()).await;

        // An invalidation may have landed between the check and the insert.
        if self.generation.load(Ordering::Acquire) != generation {
            self.inner.invalidate(key).await;
        }
        Ok(value)
    }

    /// Drop every entry, including any load still in flight.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate_all();
    }

    /// Approximate number of live entries. Pending evictions may still count.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}
