//! Process-wide single-object cache.
//!
//! The cache holds one value at a time (the whole transformed
//! snapshot) and replaces it atomically. The lock is held across the
//! load future, so the loader runs exactly once per expiry window and
//! every caller arriving during a load waits for that load's result.
//! The cache never times a load out; timeouts are the caller's
//! concern. A failed load stores nothing, so the next caller retries.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

struct CacheEntry<T> {
    loaded_at: Instant,
    value: Arc<T>,
}

pub struct SingleObjectCache<T> {
    max_age: Duration,
    slot: Mutex<Option<CacheEntry<T>>>,
}

impl<T> SingleObjectCache<T> {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value if it is younger than `max_age`;
    /// otherwise invoke `load` and cache its result.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.loaded_at.elapsed() < self.max_age {
                return Ok(entry.value.clone());
            }
        }

        tracing::debug!("cache empty or stale, loading");
        let value = Arc::new(load().await?);
        *slot = Some(CacheEntry {
            loaded_at: Instant::now(),
            value: value.clone(),
        });
        Ok(value)
    }
}
