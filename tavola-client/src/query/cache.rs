//! Query cache
//!
//! Keyed, time-based cache for read queries with request deduplication,
//! prefix invalidation and retry on transient failures.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{QueryKey, QueryState};
use crate::ClientResult;
use crate::config::RetryPolicy;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn new(value: Value) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            invalidated: false,
        }
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.fetched_at.elapsed() < stale_time
    }
}

/// Latest invalidation under a key prefix
#[derive(Debug, Clone, Copy)]
struct Invalidation {
    epoch: u64,
    /// `remove`/`clear`: a late fetch result must not come back
    dropped: bool,
}

/// Per-call overrides of the cache defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    pub stale_time: Option<Duration>,
    pub retry: Option<RetryPolicy>,
}

impl QueryOptions {
    /// Always hit the backend, still deduplicated and retried
    pub fn always_refetch() -> Self {
        Self {
            stale_time: Some(Duration::ZERO),
            retry: None,
        }
    }
}

/// Query cache
///
/// Values are stored as JSON so one cache serves every entity type.
/// Entries are never evicted by age; a stale entry is refetched on the
/// next read and still backs [`QueryState::data`] when that refetch fails.
#[derive(Debug)]
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    inflight: DashMap<QueryKey, Arc<Mutex<()>>>,
    invalidations: DashMap<QueryKey, Invalidation>,
    epoch: AtomicU64,
    stale_time: Duration,
    retry: RetryPolicy,
}

impl QueryCache {
    pub fn new(stale_time: Duration, retry: RetryPolicy) -> Self {
        Self {
            entries: DashMap::new(),
            inflight: DashMap::new(),
            invalidations: DashMap::new(),
            epoch: AtomicU64::new(0),
            stale_time,
            retry,
        }
    }

    /// Fetch through the cache with the default options
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        self.fetch_with(key, QueryOptions::default(), fetcher).await
    }

    /// Fetch through the cache.
    ///
    /// A fresh entry is returned without calling `fetcher`. Otherwise one
    /// caller per key runs the fetcher while concurrent callers for the
    /// same key wait and read its result.
    pub async fn fetch_with<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: QueryOptions,
        fetcher: F,
    ) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let stale_time = options.stale_time.unwrap_or(self.stale_time);
        let started = Instant::now();

        if let Some(value) = self.fresh_value(key, stale_time, None) {
            tracing::trace!(key = %key, "query cache hit");
            return Ok(serde_json::from_value(value)?);
        }

        let lock = self
            .inflight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock().await;

        // A concurrent caller may have finished the fetch while we waited
        let result = match self.fresh_value(key, stale_time, Some(started)) {
            Some(value) => serde_json::from_value(value).map_err(Into::into),
            None => {
                let epoch = self.epoch.load(Ordering::SeqCst);
                let fetch_started = Instant::now();
                let result = self
                    .run_with_retry(key, options.retry.unwrap_or(self.retry), &fetcher)
                    .await;
                if let Ok(data) = &result
                    && let Ok(value) = serde_json::to_value(data)
                {
                    self.store_fetched(key, value, epoch, fetch_started);
                }
                result
            }
        };

        drop(guard);
        self.inflight
            .remove_if(key, |_, l| Arc::strong_count(l) <= 2 && Arc::ptr_eq(l, &lock));
        result
    }

    /// Fetch and fold the outcome into a [`QueryState`]
    pub async fn query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let result = self.fetch(key, fetcher).await;
        let previous = if result.is_err() { self.peek(key) } else { None };
        QueryState::from_result(result, previous)
    }

    async fn run_with_retry<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: RetryPolicy,
        fetcher: &F,
    ) -> ClientResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match fetcher().await {
                Ok(data) => return Ok(data),
                Err(e) if attempt < policy.max_retries && e.is_retryable() => {
                    let delay = policy.delay_for(attempt);
                    attempt += 1;
                    tracing::warn!(
                        key = %key,
                        attempt,
                        max_retries = policy.max_retries,
                        error = %e,
                        "query failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Store a fetch result, honouring invalidations that arrived while the
    /// request was in flight
    fn store_fetched(&self, key: &QueryKey, value: Value, epoch: u64, fetch_started: Instant) {
        let Some(invalidation) = self.invalidated_since(key, epoch) else {
            self.entries.insert(key.clone(), CacheEntry::new(value));
            return;
        };
        if invalidation.dropped {
            tracing::debug!(key = %key, "discarding fetch result removed in flight");
            return;
        }
        // A value written with `set` during the fetch is newer than ours
        let overwritten = self
            .entries
            .get(key)
            .is_some_and(|e| e.fetched_at >= fetch_started && !e.invalidated);
        if !overwritten {
            let mut entry = CacheEntry::new(value);
            entry.invalidated = true;
            self.entries.insert(key.clone(), entry);
        }
    }

    /// Latest invalidation covering `key` after `epoch`
    fn invalidated_since(&self, key: &QueryKey, epoch: u64) -> Option<Invalidation> {
        self.invalidations
            .iter()
            .filter(|i| i.epoch > epoch && key.starts_with(i.key()))
            .map(|i| *i.value())
            .max_by_key(|i| (i.dropped, i.epoch))
    }

    fn record_invalidation(&self, prefix: QueryKey, dropped: bool) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        // Only fetches in flight compare against the log
        if self.inflight.is_empty() {
            self.invalidations.clear();
        }
        self.invalidations
            .insert(prefix, Invalidation { epoch, dropped });
    }

    /// Fresh value for `key`; with `since`, entries written after that
    /// instant count as fresh even under a zero stale time
    fn fresh_value(
        &self,
        key: &QueryKey,
        stale_time: Duration,
        since: Option<Instant>,
    ) -> Option<Value> {
        let entry = self.entries.get(key)?;
        let written_since = since.is_some_and(|t| entry.fetched_at >= t && !entry.invalidated);
        (entry.is_fresh(stale_time) || written_since).then(|| entry.value.clone())
    }

    /// Last stored value, fresh or not
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.entries.get(key)?.value.clone();
        serde_json::from_value(value).ok()
    }

    /// Fresh value under the default stale time
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.fresh_value(key, self.stale_time, None)?;
        serde_json::from_value(value).ok()
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.is_fresh(self.stale_time))
    }

    /// Write a value directly, e.g. the entity returned by a mutation
    pub fn set<T: Serialize>(&self, key: &QueryKey, value: &T) -> ClientResult<()> {
        self.entries
            .insert(key.clone(), CacheEntry::new(serde_json::to_value(value)?));
        self.record_invalidation(key.clone(), false);
        Ok(())
    }

    /// Mark every entry under `prefix` stale. Values stay available to
    /// [`peek`](Self::peek) until the refetch replaces them.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        self.record_invalidation(prefix.clone(), false);
        let mut count = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.key().starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        tracing::debug!(prefix = %prefix, count, "queries invalidated");
        count
    }

    /// Drop every entry under `prefix`
    pub fn remove(&self, prefix: &QueryKey) {
        self.record_invalidation(prefix.clone(), true);
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop everything, including results of fetches still in flight
    pub fn clear(&self) {
        self.record_invalidation(QueryKey::any(), true);
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60), RetryPolicy::default())
    }
}
