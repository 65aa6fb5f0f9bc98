use async_trait::async_trait;
use sqlx::PgPool;

use crate::{app_error::AppResult, application::use_cases::waitlist::KvStore};

/// Postgres-backed key-value store.
///
/// Expects a provisioned table:
/// `kv_store (key TEXT PRIMARY KEY, value JSONB NOT NULL)`.
#[derive(Clone)]
pub struct PostgresKvStore {
    pool: PgPool,
}

impl PostgresKvStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresKvStore { pool }
    }
}

#[async_trait]
impl KvStore for PostgresKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value::text FROM kv_store WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES ($1, $2::jsonb)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES ($1, $2::jsonb)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn scan_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let values = sqlx::query_scalar::<_, String>(
            "SELECT value::text FROM kv_store WHERE starts_with(key, $1)",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }
}
