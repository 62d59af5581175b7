//! Time-bounded, single-flight cache.
//!
//! Wraps `moka::future::Cache`. Concurrent callers asking for the same
//! missing key share one fetch; failures are returned to every waiter and
//! are not cached.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: u64 = 1000;

/// An in-process cache whose entries expire after a fixed TTL.
#[derive(Clone)]
pub struct TtlCache<K, V> {
    inner: Cache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache with the given time to live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CAPACITY)
    }

    /// Create a cache with the given time to live and entry limit.
    #[must_use]
    pub fn with_capacity(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cached value for `key`, if present and not expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    /// Return the cached value or run `fetch` to produce it.
    ///
    /// At most one `fetch` runs per key at a time; other callers wait for it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged. The error is not cached, so the
    /// next call fetches again.
    pub async fn get_or_fetch<F, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: Future<Output = Result<V, E>>,
        E: Clone + Send + Sync + 'static,
    {
        self.inner
            .try_get_with(key, fetch)
            .await
            .map_err(Arc::unwrap_or_clone)
    }

    /// Drop the entry for `key`.
    pub async fn invalidate(&self, key: &K) {
        self.inner.invalidate(key).await;
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}
