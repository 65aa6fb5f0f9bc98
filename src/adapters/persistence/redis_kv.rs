use std::collections::BTreeSet;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::{
    app_error::AppResult, application::use_cases::waitlist::KvStore, infra::error::InfraError,
};

/// Keys requested per SCAN round trip, and per MGET.
const SCAN_BATCH: usize = 100;

/// Redis-backed key-value store.
#[derive(Clone)]
pub struct RedisKvStore {
    manager: ConnectionManager,
}

impl RedisKvStore {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        Ok(Self { manager })
    }

    async fn scan_keys(&self, conn: &mut ConnectionManager, prefix: &str) -> AppResult<Vec<String>> {
        let pattern = format!("{}*", escape_glob(prefix));
        // SCAN may return a key more than once.
        let mut keys = BTreeSet::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys.into_iter().collect())
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        let written: bool = conn.set_nx(key, value).await?;
        Ok(written)
    }

    async fn scan_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut conn = self.manager.clone();
        let keys = self.scan_keys(&mut conn, prefix).await?;

        let mut values = Vec::with_capacity(keys.len());
        for chunk in keys.chunks(SCAN_BATCH) {
            let batch: Vec<Option<String>> = redis::cmd("MGET")
                .arg(chunk.to_vec())
                .query_async(&mut conn)
                .await?;
            // Keys can expire or vanish between SCAN and MGET.
            values.extend(batch.into_iter().flatten());
        }

        Ok(values)
    }
}

/// Escape Redis glob metacharacters so the prefix matches literally.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
