//! Per-section remote resources: one GET on mount, `{data, loading, error}`
//! afterwards. No retries.
//!
//! A mounted fetch runs as its own task and is owned by a `ResourceHandle`.
//! Tearing the handle down (explicitly or by dropping it) flips its liveness
//! flag and aborts the task, so a response that arrives late is discarded
//! instead of being written into state nobody reads.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api_client::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> ResourceState<T> {
    pub fn loading() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: Some(error.into()),
        }
    }
}

impl<T> ResourceState<T> {
    pub fn ready(data: T) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }
}

pub struct ResourceHandle<T> {
    name: &'static str,
    state: Arc<Mutex<ResourceState<T>>>,
    alive: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl<T> ResourceHandle<T>
where
    T: Default + Clone + Send + 'static,
{
    /// Starts `fetch` immediately. Must be called inside a Tokio runtime.
    pub fn mount<F>(name: &'static str, fetch: F) -> Self
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let state = Arc::new(Mutex::new(ResourceState::loading()));
        let alive = Arc::new(AtomicBool::new(true));

        let task = tokio::spawn({
            let state = state.clone();
            let alive = alive.clone();
            async move {
                let result = fetch.await;

                let mut guard = state.lock().await;
                if !alive.load(Ordering::Acquire) {
                    debug!("Discarding {name} response after teardown");
                    return;
                }
                guard.loading = false;
                match result {
                    Ok(data) => guard.data = data,
                    Err(e) => {
                        warn!("Error fetching {name}: {e}");
                        guard.error = Some(e.to_string());
                    }
                }
            }
        });

        Self {
            name,
            state,
            alive,
            task: Some(task),
        }
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> ResourceState<T> {
        self.state.lock().await.clone()
    }

    /// Waits for the fetch to finish and returns the final state.
    pub async fn settle(mut self) -> ResourceState<T> {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("{} fetch task failed: {e}", self.name);
                    return ResourceState::failed(format!("Failed to fetch {}", self.name));
                }
            }
        }
        self.state.lock().await.clone()
    }

    #[cfg(test)]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl<T> ResourceHandle<T> {
    pub fn teardown(&mut self) {
        self.alive.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for ResourceHandle<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;

    fn closed() -> FetchError {
        FetchError::InvalidPayload("channel closed".into())
    }

    #[tokio::test]
    async fn test_success_sets_data() {
        let handle = ResourceHandle::mount("numbers", async { Ok(vec![1, 2, 3]) });
        let state = handle.settle().await;
        assert_eq!(state, ResourceState::ready(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_error_leaves_initial_data() {
        let handle: ResourceHandle<Vec<u32>> = ResourceHandle::mount("numbers", async {
            Err(FetchError::Status {
                status: 502,
                body: String::new(),
            })
        });
        let state = handle.settle().await;
        assert!(state.data.is_empty());
        assert!(!state.loading);
        assert!(state.error.unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_loading_until_resolved() {
        let (tx, rx) = oneshot::channel::<Vec<u32>>();
        let handle = ResourceHandle::mount("numbers", async move { rx.await.map_err(|_| closed()) });

        let before = handle.snapshot().await;
        assert!(before.loading);
        assert!(before.data.is_empty());

        tx.send(vec![7]).unwrap();
        assert_eq!(handle.settle().await.data, vec![7]);
    }

    #[tokio::test]
    async fn test_teardown_ignores_late_result() {
        let (tx, rx) = oneshot::channel::<Vec<u32>>();
        let mut handle =
            ResourceHandle::mount("numbers", async move { rx.await.map_err(|_| closed()) });

        handle.teardown();
        assert!(!handle.is_alive());
        let _ = tx.send(vec![9]);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = handle.snapshot().await;
        assert!(state.loading);
        assert!(state.data.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_drop_aborts_fetch() {
        let (tx, rx) = oneshot::channel::<Vec<u32>>();
        let handle = ResourceHandle::mount("numbers", async move { rx.await.map_err(|_| closed()) });
        drop(handle);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(tx.is_closed());
    }
}
