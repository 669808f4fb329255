//! Shared fixtures for handler and client tests.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::api_client::ApiClient;
use crate::config::{Config, MapsConfig, DEFAULT_SETTINGS_PATH};
use crate::settings::{MemoryStorage, SettingsStore, SystemClock, UpstreamSettings};
use crate::state::AppState;

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

/// A loopback URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        redis_url: None,
        settings_path: DEFAULT_SETTINGS_PATH.to_string(),
        settings_ttl: std::time::Duration::from_secs(3600),
        settings_wait: std::time::Duration::from_secs(2),
        request_timeout: None,
        maps: MapsConfig::default(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// App state wired to a fake backend, with an empty in-memory settings cache.
pub fn test_state(api_url: &str) -> AppState {
    test_state_with(test_config(api_url))
}

pub fn test_state_with(config: Config) -> AppState {
    let api = ApiClient::new(&config.api_url, None).expect("client");
    let settings = SettingsStore::new(
        Arc::new(UpstreamSettings::new(api.clone(), &config.settings_path)),
        Arc::new(MemoryStorage::default()),
        Arc::new(SystemClock),
        config.settings_ttl,
    );
    AppState::new(api, Arc::new(settings), config)
}
