mod api_client;
mod config;
mod errors;
mod forms;
mod models;
mod pages;
mod render;
mod resource;
mod routes;
mod sections;
mod settings;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::settings::{
    CacheStorage, MemoryStorage, RedisStorage, SettingsStore, SystemClock, UpstreamSettings,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PNE web v{}", env!("CARGO_PKG_VERSION"));

    // Backend API client
    let api = ApiClient::new(&config.api_url, config.request_timeout)?;
    info!("API client initialized ({})", config.api_url);

    // Settings cache: Redis when configured, process memory otherwise
    let cache = build_cache(&config);
    let settings = Arc::new(SettingsStore::new(
        Arc::new(UpstreamSettings::new(api.clone(), &config.settings_path)),
        cache,
        Arc::new(SystemClock),
        config.settings_ttl,
    ));
    settings.init().await;

    let state = AppState::new(api, settings.clone(), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    settings.shutdown().await;
    Ok(())
}

fn build_cache(config: &Config) -> Arc<dyn CacheStorage> {
    match config.redis_url.as_deref() {
        Some(url) => match RedisStorage::open(url) {
            Ok(storage) => {
                info!("Settings cache backed by Redis");
                Arc::new(storage)
            }
            Err(e) => {
                warn!("Redis unavailable ({e}), caching settings in memory");
                Arc::new(MemoryStorage::default())
            }
        },
        None => {
            info!("Settings cache in memory");
            Arc::new(MemoryStorage::default())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
