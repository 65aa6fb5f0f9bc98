use crate::{
    adapters::http::app_state::AppState,
    infra::{
        InfraError,
        config::{AppConfig, KvBackend},
        postgres_kv_store, redis_kv_store,
    },
    use_cases::waitlist::{KvStore, WaitlistUseCases},
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    init_tracing();

    let config = AppConfig::from_env();

    let store: Arc<dyn KvStore> = match config.kv_backend {
        KvBackend::Redis => {
            Arc::new(redis_kv_store(&config.redis_url).await?) as Arc<dyn KvStore>
        }
        KvBackend::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .ok_or(InfraError::ConfigMissing {
                    var: "DATABASE_URL",
                })?;
            Arc::new(postgres_kv_store(database_url).await?) as Arc<dyn KvStore>
        }
    };

    tracing::info!(
        backend = %config.kv_backend,
        key_prefix = %config.key_prefix,
        "Waitlist store ready"
    );

    let waitlist_use_cases = WaitlistUseCases::new(store, config.key_prefix.clone());

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), skipped if the file can't be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
