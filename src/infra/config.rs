use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use strum::{AsRefStr, Display, EnumString};

/// Which key-value backend holds the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString, Default)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum KvBackend {
    #[default]
    Redis,
    Postgres,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Allowed CORS origin; `*` allows any origin.
    pub cors_origin: HeaderValue,
    pub kv_backend: KvBackend,
    pub redis_url: SecretString,
    /// Only required when `kv_backend` is `postgres`.
    pub database_url: Option<SecretString>,
    /// Namespace prepended to every waitlist key.
    pub key_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());
        let cors_origin: HeaderValue = get_env_default("CORS_ORIGIN", String::from("*"))
            .parse()
            .expect("CORS_ORIGIN must be a valid header value");
        let kv_backend: KvBackend = get_env_default("KV_BACKEND", String::from("redis"))
            .parse()
            .expect("KV_BACKEND must be one of: redis, postgres");
        let redis_url: SecretString = SecretString::new(
            get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string()).into(),
        );
        let database_url: Option<SecretString> = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.into()));
        let key_prefix: String = get_env_default("WAITLIST_KEY_PREFIX", "waitlist:".to_string());

        Self {
            bind_addr,
            cors_origin,
            kv_backend,
            redis_url,
            database_url,
            key_prefix,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin == "*"
    }
}
