//! In-memory mock implementations of the `KvStore` trait.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::KvStore,
    domain::entities::waitlist_entry::WaitlistEntry,
};

/// In-memory implementation of KvStore for testing.
///
/// Counts successful writes so tests can assert that failure paths never
/// touch storage.
#[derive(Default)]
pub struct InMemoryKvStore {
    pub entries: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with entries keyed by `prefix` + email.
    /// Seeding does not count as a write.
    pub fn with_entries(prefix: &str, entries: Vec<WaitlistEntry>) -> Self {
        let map = entries
            .into_iter()
            .map(|e| {
                let value = serde_json::to_string(&e).unwrap();
                (format!("{prefix}{}", e.email), value)
            })
            .collect();
        Self {
            entries: Mutex::new(map),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful writes since construction.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw stored value (for test assertions).
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn scan_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(_, v)| v.clone())
            .collect())
    }
}

/// Store whose every operation fails, as when the backend is down.
#[derive(Default)]
pub struct FailingKvStore;

fn unavailable() -> AppError {
    AppError::StorageUnavailable("connection refused".into())
}

#[async_trait]
impl KvStore for FailingKvStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(unavailable())
    }

    async fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(unavailable())
    }

    async fn insert_if_absent(&self, _key: &str, _value: &str) -> AppResult<bool> {
        Err(unavailable())
    }

    async fn scan_prefix(&self, _prefix: &str) -> AppResult<Vec<String>> {
        Err(unavailable())
    }
}

/// Wraps a store so that `get` always misses.
///
/// Writes and scans go to the inner store, which reproduces a concurrent
/// writer landing between the lookup and the write.
pub struct StaleReadKvStore {
    inner: Arc<InMemoryKvStore>,
}

impl StaleReadKvStore {
    pub fn new(inner: Arc<InMemoryKvStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl KvStore for StaleReadKvStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        self.inner.insert_if_absent(key, value).await
    }

    async fn scan_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        self.inner.scan_prefix(prefix).await
    }
}
