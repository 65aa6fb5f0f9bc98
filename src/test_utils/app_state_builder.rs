//! Test app state builder for HTTP-level testing.

use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::{KvStore, WaitlistUseCases},
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::config::{AppConfig, KvBackend},
    test_utils::InMemoryKvStore,
};

/// Builder for creating `AppState` backed by an in-memory store.
///
/// # Example
///
/// ```ignore
/// let entry = create_test_entry(|e| e.email = "ada@example.com".to_string());
/// let (app_state, store) = TestAppStateBuilder::new()
///     .with_entry(entry)
///     .build_with_store();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    key_prefix: String,
    store: Option<Arc<dyn KvStore>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            key_prefix: "waitlist:".to_string(),
            store: None,
        }
    }

    /// Seed an existing entry (ignored when a custom store is set).
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Use a custom store, e.g. `FailingKvStore`.
    pub fn with_store(mut self, store: Arc<dyn KvStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> AppState {
        match self.store.clone() {
            Some(store) => self.assemble(store),
            None => self.build_with_store().0,
        }
    }

    /// Build with the in-memory store, returning it for assertions.
    pub fn build_with_store(self) -> (AppState, Arc<InMemoryKvStore>) {
        let store = Arc::new(InMemoryKvStore::with_entries(
            &self.key_prefix,
            self.entries.clone(),
        ));
        let app_state = self.assemble(store.clone());
        (app_state, store)
    }

    fn assemble(&self, store: Arc<dyn KvStore>) -> AppState {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            cors_origin: HeaderValue::from_static("*"),
            kv_backend: KvBackend::Redis,
            redis_url: SecretString::new("redis://127.0.0.1:6379".into()),
            database_url: None,
            key_prefix: self.key_prefix.clone(),
        };

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(store, self.key_prefix.clone())),
        }
    }
}
