//! In-memory TTL cache with per-key fetch coalescing.
//!
//! Shields the CRM from repeated calls for data that rarely changes, such as workspace access
//! tokens and app metadata. Entries live for the lifetime of the process and are refreshed
//! lazily the first time a stale key is requested.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use axum::http::StatusCode;
use dioxus_logger::tracing;
use tokio::time::Instant;

/// Value stored for a key together with the moment it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: Instant,
}

type Slot<V> = Arc<tokio::sync::Mutex<Option<CacheEntry<V>>>>;

/// Lazy TTL cache keyed by string
///
/// Each key owns an async mutex held for the whole lookup, so at most one fetch per key is in
/// flight. Callers arriving while a fetch runs wait for it and then read the stored entry.
/// Lookups on different keys never wait on each other.
pub struct TtlCache<V> {
    ttl: Duration,
    cache_non_success: bool,
    slots: Mutex<HashMap<String, Slot<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cache_non_success: true,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Sets whether fetch results with a non-2xx status are stored
    ///
    /// Defaults to `true`: a failed fetch is then served as a hit with status 200 until the
    /// TTL elapses.
    pub fn cache_non_success(mut self, enabled: bool) -> Self {
        self.cache_non_success = enabled;
        self
    }

    /// Returns the cached value for `key` or fetches and stores a new one
    ///
    /// # Arguments
    /// - `key` - Caller-chosen cache key
    /// - `fetch` - Producer invoked on a miss, returning the value and the status it was fetched with
    ///
    /// # Returns
    /// - `Ok((value, 200))` - Fresh entry found, the original fetch status is not kept
    /// - `Ok((value, status))` - Entry absent or stale, value and status of the new fetch
    /// - `Err(E)` - The fetch failed, nothing is stored
    pub async fn get_or_set<F, Fut, E>(&self, key: &str, fetch: F) -> Result<(V, StatusCode), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(V, StatusCode), E>>,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock().await;

        let now = Instant::now();
        if let Some(cached) = entry.as_ref() {
            if now.duration_since(cached.fetched_at) < self.ttl {
                tracing::debug!(key = %key, "Cache hit");

                return Ok((cached.value.clone(), StatusCode::OK));
            }
        }

        tracing::debug!(key = %key, "Cache miss, fetching");

        let (value, status) = fetch().await?;

        if status.is_success() || self.cache_non_success {
            *entry = Some(CacheEntry {
                value: value.clone(),
                fetched_at: now,
            });
        } else {
            tracing::debug!(
                key = %key,
                status = %status,
                "Not caching unsuccessful fetch result"
            );
        }

        Ok((value, status))
    }

    /// Returns a copy of the entry stored for `key`, fresh or stale
    pub async fn entry(&self, key: &str) -> Option<CacheEntry<V>> {
        let slot = self.slot(key);
        let entry = slot.lock().await;

        entry.clone()
    }

    fn slot(&self, key: &str) -> Slot<V> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        slots.entry(key.to_string()).or_default().clone()
    }
}
