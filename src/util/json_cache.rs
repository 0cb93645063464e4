//! # Per-URL cache of JSON documents.
//!
//! [`JsonCache::load`] fetches a document once through a [`JsonSource`] and serves
//! the cached value afterwards.
//!
//! ```text
//! load(url)
//!   ├─ cached      ─► clone of the value
//!   ├─ in flight   ─► await the same fetch
//!   └─ missing     ─► JsonSource::fetch(url)
//!                       ├─ Ok  ─► cache + return
//!                       └─ Err ─► return (not cached; next load retries)
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::FetchError;

/// Where documents come from (HTTP client, file system, fixtures).
#[async_trait]
pub trait JsonSource: Send + Sync + 'static {
    /// Fetches and parses the document at `url`.
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Caches documents by URL; concurrent loads of one URL share a single fetch.
pub struct JsonCache {
    source: Arc<dyn JsonSource>,
    entries: Mutex<HashMap<String, Arc<OnceCell<Value>>>>,
}

impl JsonCache {
    pub fn new(source: Arc<dyn JsonSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the document at `url`, fetching it on first use.
    pub async fn load(&self, url: &str) -> Result<Value, FetchError> {
        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(url.to_string()).or_default())
        };

        let value = cell
            .get_or_try_init(|| async {
                tracing::debug!(url, "fetching json");
                self.source.fetch(url).await.inspect_err(|e| {
                    tracing::warn!(url, label = e.as_label(), error = %e, "json fetch failed");
                })
            })
            .await?;
        Ok(value.clone())
    }

    /// Returns the cached document without fetching.
    pub fn cached(&self, url: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(url).and_then(|cell| cell.get().cloned())
    }

    /// Drops the entry for `url`; the next [`load`](Self::load) fetches again.
    ///
    /// Returns `true` if a document was cached.
    pub fn invalidate(&self, url: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .remove(url)
            .is_some_and(|cell| cell.initialized())
    }
}

impl fmt::Debug for JsonCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("JsonCache")
            .field("entries", &entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers after a delay; fails the first `failures` calls.
    struct Fixture {
        calls: AtomicUsize,
        failures: usize,
    }

    impl Fixture {
        fn new(failures: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                failures,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JsonSource for Fixture {
        async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            if n < self.failures {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 503,
                });
            }
            Ok(json!({ "url": url, "call": n }))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn second_load_is_served_from_cache() {
        let source = Fixture::new(0);
        let cache = JsonCache::new(source.clone());
        assert_eq!(cache.cached("/a.json"), None);

        let first = cache.load("/a.json").await.unwrap();
        let second = cache.load("/a.json").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
        assert_eq!(cache.cached("/a.json"), Some(first));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_loads_share_one_fetch() {
        let source = Fixture::new(0);
        let cache = JsonCache::new(source.clone());

        let (a, b) = tokio::join!(cache.load("/a.json"), cache.load("/a.json"));
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(source.calls(), 1);

        cache.load("/b.json").await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_not_cached() {
        let source = Fixture::new(1);
        let cache = JsonCache::new(source.clone());

        let err = cache.load("/a.json").await.unwrap_err();
        assert_eq!(err.as_label(), "fetch_status");
        assert_eq!(cache.cached("/a.json"), None);

        let value = cache.load("/a.json").await.unwrap();
        assert_eq!(value["call"], json!(1));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_refetch() {
        let source = Fixture::new(0);
        let cache = JsonCache::new(source.clone());

        cache.load("/a.json").await.unwrap();
        assert!(cache.invalidate("/a.json"));
        assert!(!cache.invalidate("/a.json"));
        assert_eq!(cache.cached("/a.json"), None);

        let value = cache.load("/a.json").await.unwrap();
        assert_eq!(value["call"], json!(1));
    }
}
