//! Settings store: the one place that decides whether the site settings come
//! from cache or from the backend.
//!
//! Policy:
//! - an entry younger than the TTL is served without a network call;
//! - otherwise the backend is asked, and a good answer replaces the entry and
//!   resets its timestamp;
//! - if the backend fails, whatever entry exists is served regardless of age,
//!   and the error is reported alongside it;
//! - a timestamp ahead of the clock counts as stale.
//!
//! Refreshes are serialised, so callers that arrive while a fetch is in flight
//! wait for it and then read the fresh entry instead of fetching again.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::cache::{CacheStorage, SETTINGS_KEY, TIMESTAMP_KEY};
use crate::api_client::{ApiClient, FetchError};
use crate::models::Settings;

/// Where fresh settings come from.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn fetch_settings(&self) -> Result<Settings, FetchError>;
}

/// Reads settings from the backend's `{success, data}` endpoint.
pub struct UpstreamSettings {
    client: ApiClient,
    path: String,
}

impl UpstreamSettings {
    pub fn new(client: ApiClient, path: &str) -> Self {
        Self {
            client,
            path: path.to_string(),
        }
    }
}

#[async_trait]
impl SettingsSource for UpstreamSettings {
    async fn fetch_settings(&self) -> Result<Settings, FetchError> {
        self.client.settings(&self.path).await
    }
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// What consumers see: the settings if any are known, plus the outcome of
/// the last attempt to load them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsSnapshot {
    pub settings: Option<Settings>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SettingsSnapshot {
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }
}

struct CachedEntry {
    settings: Settings,
    stored_at: Option<i64>,
}

pub struct SettingsStore {
    source: Arc<dyn SettingsSource>,
    cache: Arc<dyn CacheStorage>,
    clock: Arc<dyn Clock>,
    ttl_millis: i64,
    refresh: Mutex<()>,
}

impl SettingsStore {
    pub fn new(
        source: Arc<dyn SettingsSource>,
        cache: Arc<dyn CacheStorage>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
            ttl_millis: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            refresh: Mutex::new(()),
        }
    }

    /// Warms the cache at startup. A failure here only means pages start on
    /// fallback values.
    pub async fn init(&self) -> SettingsSnapshot {
        let snapshot = self.current().await;
        match (&snapshot.settings, &snapshot.error) {
            (Some(_), None) => info!("Website settings loaded"),
            (Some(_), Some(e)) => warn!("Serving cached website settings after fetch error: {e}"),
            (None, Some(e)) => warn!("Website settings unavailable, using fallbacks: {e}"),
            (None, None) => {}
        }
        snapshot
    }

    /// Applies the cache policy and returns the settings to render with.
    pub async fn current(&self) -> SettingsSnapshot {
        if let Some(snapshot) = self.fresh_snapshot().await {
            return snapshot;
        }

        let _refresh = self.refresh.lock().await;

        // A refresh that finished while this caller waited has already
        // written a fresh entry.
        let cached = self.read_cache().await;
        if let Some(entry) = &cached {
            if self.is_fresh(entry.stored_at) {
                debug!("Serving website settings refreshed by another request");
                return SettingsSnapshot {
                    settings: Some(entry.settings.clone()),
                    loading: false,
                    error: None,
                };
            }
        }

        match self.source.fetch_settings().await {
            Ok(settings) => {
                self.write_cache(&settings).await;
                SettingsSnapshot {
                    settings: Some(settings),
                    loading: false,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Error fetching website settings: {e}");
                SettingsSnapshot {
                    settings: cached.map(|entry| entry.settings),
                    loading: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// `current`, bounded by `wait`. When the refresh is still running at the
    /// deadline the page renders with whatever entry is cached, marked as
    /// loading.
    pub async fn current_within(&self, wait: Duration) -> SettingsSnapshot {
        match tokio::time::timeout(wait, self.current()).await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                warn!("Website settings still loading after {wait:?}, rendering without waiting");
                SettingsSnapshot {
                    settings: self.read_cache().await.map(|entry| entry.settings),
                    loading: true,
                    error: None,
                }
            }
        }
    }

    /// Drops the cached entry so the next access goes to the backend.
    pub async fn invalidate(&self) {
        let _refresh = self.refresh.lock().await;
        for key in [SETTINGS_KEY, TIMESTAMP_KEY] {
            if let Err(e) = self.cache.remove(key).await {
                warn!("Failed to clear settings cache key {key}: {e}");
            }
        }
    }

    /// Waits for any in-flight refresh so shutdown never cuts a cache write
    /// in half.
    pub async fn shutdown(&self) {
        let _refresh = self.refresh.lock().await;
        info!("Settings store shut down");
    }

    async fn fresh_snapshot(&self) -> Option<SettingsSnapshot> {
        let entry = self.read_cache().await?;
        if !self.is_fresh(entry.stored_at) {
            return None;
        }
        debug!("Serving website settings from cache");
        Some(SettingsSnapshot {
            settings: Some(entry.settings),
            loading: false,
            error: None,
        })
    }

    fn is_fresh(&self, stored_at: Option<i64>) -> bool {
        let Some(stored_at) = stored_at else {
            return false;
        };
        let age = self.clock.now_millis() - stored_at;
        (0..self.ttl_millis).contains(&age)
    }

    async fn read_cache(&self) -> Option<CachedEntry> {
        let raw = match self.cache.get(SETTINGS_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Settings cache read failed: {e}");
                return None;
            }
        };

        let settings = match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Discarding unreadable cached settings: {e}");
                return None;
            }
        };

        let stored_at = match self.cache.get(TIMESTAMP_KEY).await {
            Ok(ts) => ts.and_then(|ts| ts.trim().parse::<i64>().ok()),
            Err(e) => {
                warn!("Settings cache timestamp read failed: {e}");
                None
            }
        };

        Some(CachedEntry {
            settings,
            stored_at,
        })
    }

    async fn write_cache(&self, settings: &Settings) {
        let encoded = match serde_json::to_string(settings) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to encode settings for cache: {e}");
                return;
            }
        };

        let now = self.clock.now_millis().to_string();
        if let Err(e) = self.cache.set(SETTINGS_KEY, &encoded).await {
            warn!("Settings cache write failed: {e}");
            return;
        }
        if let Err(e) = self.cache.set(TIMESTAMP_KEY, &now).await {
            warn!("Settings cache timestamp write failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    use super::*;
    use crate::settings::MemoryStorage;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn at(millis: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(millis)))
        }

        fn set(&self, millis: i64) {
            self.0.store(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    /// A backend that never answers.
    struct HungSource;

    #[async_trait]
    impl SettingsSource for HungSource {
        async fn fetch_settings(&self) -> Result<Settings, FetchError> {
            std::future::pending().await
        }
    }

    struct StubSource {
        calls: AtomicUsize,
        title: Option<&'static str>,
        delay: Duration,
    }

    impl StubSource {
        fn returning(title: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                title: Some(title),
                delay: Duration::ZERO,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                title: None,
                delay: Duration::ZERO,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SettingsSource for StubSource {
        async fn fetch_settings(&self) -> Result<Settings, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.title {
                Some(title) => Ok(settings_titled(title)),
                None => Err(FetchError::Status {
                    status: 500,
                    body: String::new(),
                }),
            }
        }
    }

    fn settings_titled(title: &str) -> Settings {
        Settings {
            id: 1,
            website_title: Some(title.to_string()),
            ..Default::default()
        }
    }

    async fn seed(cache: &MemoryStorage, title: &str, stored_at: i64) {
        cache
            .set(
                SETTINGS_KEY,
                &serde_json::to_string(&settings_titled(title)).unwrap(),
            )
            .await
            .unwrap();
        cache
            .set(TIMESTAMP_KEY, &stored_at.to_string())
            .await
            .unwrap();
    }

    fn store(
        source: Arc<StubSource>,
        cache: Arc<MemoryStorage>,
        clock: Arc<ManualClock>,
    ) -> SettingsStore {
        SettingsStore::new(source, cache, clock, Duration::from_secs(3600))
    }

    fn title_of(snapshot: &SettingsSnapshot) -> Option<&str> {
        snapshot.settings().and_then(|s| s.title())
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_network() {
        let now = 10 * HOUR_MS;
        let cache = Arc::new(MemoryStorage::default());
        seed(&cache, "Cached", now - HOUR_MS + 1).await;
        let source = StubSource::returning("Fresh");

        let snapshot = store(source.clone(), cache, ManualClock::at(now))
            .current()
            .await;

        assert_eq!(title_of(&snapshot), Some("Cached"));
        assert!(snapshot.error.is_none());
        assert!(!snapshot.loading);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_stale_cache_is_replaced_on_success() {
        let now = 10 * HOUR_MS;
        let cache = Arc::new(MemoryStorage::default());
        seed(&cache, "Old", now - HOUR_MS).await;
        let source = StubSource::returning("New");

        let snapshot = store(source.clone(), cache.clone(), ManualClock::at(now))
            .current()
            .await;

        assert_eq!(title_of(&snapshot), Some("New"));
        assert_eq!(source.calls(), 1);
        let stored = cache.get(TIMESTAMP_KEY).await.unwrap().unwrap();
        assert_eq!(stored, now.to_string());
        let cached: Settings =
            serde_json::from_str(&cache.get(SETTINGS_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(cached.title(), Some("New"));
    }

    #[tokio::test]
    async fn test_absent_cache_fetches_and_stores() {
        let cache = Arc::new(MemoryStorage::default());
        let clock = ManualClock::at(HOUR_MS);
        let source = StubSource::returning("New");
        let store = store(source.clone(), cache, clock.clone());

        assert_eq!(title_of(&store.current().await), Some("New"));
        clock.set(HOUR_MS + 1000);
        assert_eq!(title_of(&store.current().await), Some("New"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_stale_cache() {
        let now = 50 * HOUR_MS;
        let cache = Arc::new(MemoryStorage::default());
        seed(&cache, "Stale", now - 30 * HOUR_MS).await;
        let source = StubSource::failing();

        let snapshot = store(source.clone(), cache, ManualClock::at(now))
            .current()
            .await;

        assert_eq!(title_of(&snapshot), Some("Stale"));
        assert!(snapshot.error.is_some());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_without_cache_yields_none() {
        let snapshot = store(
            StubSource::failing(),
            Arc::new(MemoryStorage::default()),
            ManualClock::at(0),
        )
        .current()
        .await;

        assert!(snapshot.settings.is_none());
        assert!(snapshot.error.is_some());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_cache_without_timestamp_is_stale_but_usable_as_fallback() {
        let cache = Arc::new(MemoryStorage::default());
        cache
            .set(
                SETTINGS_KEY,
                &serde_json::to_string(&settings_titled("Orphan")).unwrap(),
            )
            .await
            .unwrap();
        let source = StubSource::failing();

        let snapshot = store(source.clone(), cache, ManualClock::at(HOUR_MS))
            .current()
            .await;

        assert_eq!(source.calls(), 1);
        assert_eq!(title_of(&snapshot), Some("Orphan"));
    }

    #[tokio::test]
    async fn test_future_timestamp_counts_as_stale() {
        let now = 5 * HOUR_MS;
        let cache = Arc::new(MemoryStorage::default());
        seed(&cache, "FromTheFuture", now + 1000).await;
        let source = StubSource::returning("Now");

        let snapshot = store(source.clone(), cache, ManualClock::at(now))
            .current()
            .await;

        assert_eq!(title_of(&snapshot), Some("Now"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_ignored() {
        let cache = Arc::new(MemoryStorage::default());
        cache.set(SETTINGS_KEY, "{not json").await.unwrap();
        cache.set(TIMESTAMP_KEY, "0").await.unwrap();
        let source = StubSource::failing();

        let snapshot = store(source, cache, ManualClock::at(1)).current().await;

        assert!(snapshot.settings.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = Arc::new(MemoryStorage::default());
        let source = StubSource::returning("New");
        let store = store(source.clone(), cache.clone(), ManualClock::at(HOUR_MS));

        store.current().await;
        store.invalidate().await;
        assert!(cache.get(SETTINGS_KEY).await.unwrap().is_none());
        store.current().await;

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_consumers_share_one_fetch() {
        let source = Arc::new(StubSource {
            calls: AtomicUsize::new(0),
            title: Some("Shared"),
            delay: Duration::from_millis(50),
        });
        let store = Arc::new(store(
            source.clone(),
            Arc::new(MemoryStorage::default()),
            ManualClock::at(HOUR_MS),
        ));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.current().await })
            })
            .collect();
        for task in tasks {
            let snapshot = task.await.unwrap();
            assert_eq!(title_of(&snapshot), Some("Shared"));
        }

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_backend_is_bounded_by_wait() {
        let store = SettingsStore::new(
            Arc::new(HungSource),
            Arc::new(MemoryStorage::default()),
            ManualClock::at(HOUR_MS),
            Duration::from_secs(3600),
        );

        let snapshot = store.current_within(Duration::from_secs(2)).await;

        assert!(snapshot.settings.is_none());
        assert!(snapshot.loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_backend_serves_stale_entry_while_loading() {
        let now = 10 * HOUR_MS;
        let cache = Arc::new(MemoryStorage::default());
        seed(&cache, "Stale", now - 2 * HOUR_MS).await;
        let store = SettingsStore::new(
            Arc::new(HungSource),
            cache,
            ManualClock::at(now),
            Duration::from_secs(3600),
        );

        let snapshot = store.current_within(Duration::from_secs(2)).await;

        assert_eq!(title_of(&snapshot), Some("Stale"));
        assert!(snapshot.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_does_not_wait_behind_a_refresh() {
        let now = 10 * HOUR_MS;
        let cache = Arc::new(MemoryStorage::default());
        seed(&cache, "Stale", now - 2 * HOUR_MS).await;
        let store = Arc::new(SettingsStore::new(
            Arc::new(HungSource),
            cache.clone(),
            ManualClock::at(now),
            Duration::from_secs(3600),
        ));

        let refreshing = tokio::spawn({
            let store = store.clone();
            async move { store.current().await }
        });
        tokio::task::yield_now().await;
        seed(&cache, "Written elsewhere", now).await;

        let snapshot = tokio::time::timeout(Duration::from_millis(10), store.current())
            .await
            .expect("fresh entry served without taking the refresh lock");
        assert_eq!(title_of(&snapshot), Some("Written elsewhere"));
        assert!(!refreshing.is_finished());
        refreshing.abort();
    }
}
