//! Integration tests for Pagecraft.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pagecraft-integration-tests
//! ```
//!
//! Each test starts the real router on an ephemeral port, backed by the
//! in-memory store, so no database is needed. The `pg_slot_store` tests are
//! ignored by default and need `PAGECRAFT_DATABASE_URL` (or `DATABASE_URL`):
//!
//! ```bash
//! cargo test -p pagecraft-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `slot_configuration_api` - Raw HTTP contract of the server
//! - `editor_sessions` - Editor sessions talking to a live server
//! - `pg_slot_store` - `PostgreSQL` store and repository behavior

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pagecraft_core::{MemorySlotStore, PageType, SlotConfigurationService, StoreId};
use pagecraft_editor::client::{ApiClient, AuthMode};
use pagecraft_editor::{SlotConfigurationsApi, SlotEditor};
use pagecraft_server::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// A server running in the test process.
#[derive(Debug)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: Url,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        Self::spawn_with(MemorySlotStore::new()).await
    }

    /// Start a server backed by `store`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn_with<S>(store: S) -> Self
    where
        S: SlotConfigurationService + 'static,
    {
        Self::spawn_with_state(AppState::new(store)).await
    }

    /// Start a server over a prepared application state.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn spawn_with_state<S>(state: AppState<S>) -> Self
    where
        S: SlotConfigurationService + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = pagecraft_server::app(state);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}/")).expect("Invalid test server URL");
        Self {
            addr,
            base_url,
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }

    /// An API client pointed at this server.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone(), AuthMode::Anonymous)
    }

    /// A slot configuration service pointed at this server.
    #[must_use]
    pub fn api(&self) -> Arc<SlotConfigurationsApi> {
        Arc::new(SlotConfigurationsApi::new(&self.client(), Duration::from_secs(60)))
    }

    /// An editing session for a new store.
    #[must_use]
    pub fn editor(&self, page_type: PageType) -> SlotEditor<SlotConfigurationsApi> {
        SlotEditor::new(self.api(), StoreId::generate(), page_type)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
