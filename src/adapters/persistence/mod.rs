use crate::app_error::AppError;

pub mod postgres_kv;
pub mod redis_kv;

pub use postgres_kv::PostgresKvStore;
pub use redis_kv::RedisKvStore;

/// Message returned to callers for any backend failure. Backend detail is
/// logged, never surfaced.
const STORAGE_UNAVAILABLE_MESSAGE: &str = "Key-value store unavailable";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Log the actual error for debugging, but don't expose details
        tracing::error!(error = ?err, "Database error");
        AppError::StorageUnavailable(STORAGE_UNAVAILABLE_MESSAGE.into())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        tracing::error!(error = %err, "Redis error");
        AppError::StorageUnavailable(STORAGE_UNAVAILABLE_MESSAGE.into())
    }
}
