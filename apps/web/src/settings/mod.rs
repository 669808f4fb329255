//! Site settings: fetched from the backend, cached with a freshness window,
//! and shared by every page through `AppState`.

pub mod cache;
pub mod handlers;
pub mod store;

pub use cache::{CacheStorage, MemoryStorage, RedisStorage};
pub use store::{SettingsSnapshot, SettingsStore, SystemClock, UpstreamSettings};
