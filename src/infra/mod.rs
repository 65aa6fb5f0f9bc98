use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use crate::{
    adapters::persistence::{PostgresKvStore, RedisKvStore},
    infra::db::init_db,
};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod setup;

pub use error::InfraError;

pub async fn postgres_kv_store(database_url: &SecretString) -> Result<PostgresKvStore, InfraError> {
    let pool: PgPool = init_db(database_url.expose_secret()).await?;
    Ok(PostgresKvStore::new(pool))
}

pub async fn redis_kv_store(redis_url: &SecretString) -> Result<RedisKvStore, InfraError> {
    let store = RedisKvStore::new(redis_url.expose_secret()).await?;
    tracing::info!("Connected to redis!");
    Ok(store)
}
