//! Application state shared across handlers.

use std::sync::Arc;

use pagecraft_core::SlotConfigurationService;
use sqlx::PgPool;

/// Application state shared across all handlers.
///
/// Generic over the configuration service so the router can be driven by
/// `PgSlotStore` in production and `MemorySlotStore` in tests. Cloning is
/// cheap (one `Arc`).
pub struct AppState<S> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    service: S,
    pool: Option<PgPool>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SlotConfigurationService> AppState<S> {
    /// Create state around a configuration service with no database readiness check.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                pool: None,
            }),
        }
    }

    /// Create state whose readiness check pings `pool`.
    #[must_use]
    pub fn with_pool(service: S, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                pool: Some(pool),
            }),
        }
    }

    /// Get a reference to the slot configuration service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.inner.service
    }

    /// Get the database pool used for readiness checks, if any.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
