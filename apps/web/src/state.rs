use std::sync::Arc;

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::settings::{SettingsSnapshot, SettingsStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    /// Built once at startup; every page reads settings through it.
    pub settings: Arc<SettingsStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(api: ApiClient, settings: Arc<SettingsStore>, config: Config) -> Self {
        Self {
            api,
            settings,
            config,
        }
    }

    /// Settings for a page render. A backend that does not answer within
    /// `settings_wait` leaves the page on cached or fallback settings.
    pub async fn site_settings(&self) -> SettingsSnapshot {
        self.settings.current_within(self.config.settings_wait).await
    }
}
