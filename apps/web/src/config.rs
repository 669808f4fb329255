use std::time::Duration;

use anyhow::{Context, Result};

/// Default upstream path for the site settings resource.
pub const DEFAULT_SETTINGS_PATH: &str = "/api/v1/settings";
/// Settings are served from cache for at most one hour.
pub const DEFAULT_SETTINGS_TTL_SECS: u64 = 60 * 60;
/// Longest a page waits on a settings refresh before rendering without it.
pub const DEFAULT_SETTINGS_WAIT_MS: u64 = 2_000;

/// Application configuration loaded from environment variables.
/// Fails at startup if `API_URL` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API, without a trailing slash.
    pub api_url: String,
    /// Settings cache backend. In-process memory when unset.
    pub redis_url: Option<String>,
    pub settings_path: String,
    pub settings_ttl: Duration,
    pub settings_wait: Duration,
    /// Requests are unbounded unless this is set.
    pub request_timeout: Option<Duration>,
    pub maps: MapsConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Credentials handed to the browser-side maps widget.
#[derive(Debug, Clone, Default)]
pub struct MapsConfig {
    pub api_key: Option<String>,
    pub map_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = optional("API_URL")
            .with_context(|| "Required environment variable 'API_URL' is not set")?
            .trim_end_matches('/')
            .to_string();

        let settings_ttl = match optional("SETTINGS_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SETTINGS_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_SETTINGS_TTL_SECS,
        };

        let settings_wait = match optional("SETTINGS_WAIT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SETTINGS_WAIT_MS must be a whole number of milliseconds")?,
            None => DEFAULT_SETTINGS_WAIT_MS,
        };

        let request_timeout = optional("REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        let settings_path = optional("SETTINGS_PATH")
            .map(|p| {
                if p.starts_with('/') {
                    p
                } else {
                    format!("/{p}")
                }
            })
            .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

        Ok(Config {
            api_url,
            redis_url: optional("REDIS_URL"),
            settings_path,
            settings_ttl: Duration::from_secs(settings_ttl),
            settings_wait: Duration::from_millis(settings_wait),
            request_timeout,
            maps: MapsConfig {
                api_key: optional("GOOGLE_MAPS_API_KEY"),
                map_id: optional("GOOGLE_MAPS_ID"),
            },
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
