//! Single-flight query client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::Serialize;
use serde::de::DeserializeOwned;

use atrium_core::ports::QueryCache;
use atrium_shared::{ApiError, ApiResult};

type InflightFetch = Shared<BoxFuture<'static, Result<String, ApiError>>>;

/// Binds cache keys to fetch functions.
///
/// `fetch` serves from the cache when a fresh entry exists; otherwise it
/// runs the supplied fetch function and stores the serialized result under
/// the key. Concurrent fetches for the same key share a single in-flight
/// future, so at most one upstream request per key is ever outstanding.
/// Failures are returned to every waiter and never cached.
pub struct QueryClient {
    cache: Arc<dyn QueryCache>,
    ttl: Duration,
    inflight: Mutex<HashMap<String, InflightFetch>>,
}

impl QueryClient {
    pub fn new(cache: Arc<dyn QueryCache>, ttl: Duration) -> Self {
        Self {
            cache,
            ttl,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn fetch<T, Fut>(&self, key: &str, fetch: impl FnOnce() -> Fut) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        if let Some(raw) = self.cache.get(key).await {
            match serde_json::from_str(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    // A cached entry that no longer decodes is dropped and
                    // refetched.
                    tracing::warn!(key, error = %e, "discarding undecodable cache entry");
                    let _ = self.cache.invalidate(key).await;
                }
            }
        }

        let shared = self.join_flight(key, fetch);
        let outcome = shared.clone().await;
        self.leave_flight(key, &shared);

        let raw = outcome?;
        if let Err(e) = self.cache.set(key, &raw, self.ttl).await {
            tracing::warn!(key, error = %e, "caching query result failed");
        }
        serde_json::from_str(&raw)
            .map_err(|e| ApiError::transport(format!("decoding cached value failed: {e}")))
    }

    /// Drop the cached entry for a key, forcing the next fetch upstream.
    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.invalidate(key).await {
            tracing::warn!(key, error = %e, "invalidating query key failed");
        }
    }

    /// Drop every cached entry, including per-record keys, so nothing
    /// fetched under one session is served to the next.
    pub async fn clear(&self) {
        if let Err(e) = self.cache.clear().await {
            tracing::warn!(error = %e, "clearing query cache failed");
        }
    }

    /// Join the in-flight fetch for `key`, starting one if none exists.
    fn join_flight<T, Fut>(&self, key: &str, fetch: impl FnOnce() -> Fut) -> InflightFetch
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = inflight.get(key) {
            return existing.clone();
        }
        let fut = fetch();
        let flight: InflightFetch = async move {
            let value = fut.await?;
            serde_json::to_string(&value)
                .map_err(|e| ApiError::transport(format!("encoding query result failed: {e}")))
        }
        .boxed()
        .shared();
        inflight.insert(key.to_string(), flight.clone());
        flight
    }

    /// Retire a completed flight. Guarded by pointer identity so a newer
    /// flight started under the same key is left alone.
    fn leave_flight(&self, key: &str, flight: &InflightFetch) {
        let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(current) = inflight.get(key) {
            if current.ptr_eq(flight) {
                inflight.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::InMemoryQueryCache;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> QueryClient {
        QueryClient::new(Arc::new(InMemoryQueryCache::new()), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let queries = client();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let got: Vec<u32> = queries
                .fetch("users", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(got, vec![1, 2, 3]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_flight() {
        let queries = Arc::new(client());
        let calls = Arc::new(AtomicUsize::new(0));

        let fetch = |queries: Arc<QueryClient>, calls: Arc<AtomicUsize>| async move {
            queries
                .fetch("users", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(vec![7u32])
                })
                .await
        };

        let (a, b) = tokio::join!(
            fetch(queries.clone(), calls.clone()),
            fetch(queries.clone(), calls.clone())
        );

        assert_eq!(a.unwrap(), vec![7]);
        assert_eq!(b.unwrap(), vec![7]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let queries = client();
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = calls.clone();
        let err = queries
            .fetch::<Vec<u32>, _>("users", move || async move {
                failing.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::transport("backend down"))
            })
            .await
            .unwrap_err();
        assert_eq!(err.joined_message(), "backend down");

        let succeeding = calls.clone();
        let got: Vec<u32> = queries
            .fetch("users", move || async move {
                succeeding.fetch_add(1, Ordering::SeqCst);
                Ok(vec![9])
            })
            .await
            .unwrap();

        assert_eq!(got, vec![9]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let queries = client();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let _: Vec<u32> = queries
                .fetch("users", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1])
                })
                .await
                .unwrap();
            queries.invalidate("users").await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clear_drops_every_key() {
        let queries = client();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            for key in ["users", "users:42"] {
                let calls = calls.clone();
                let _: Vec<u32> = queries
                    .fetch(key, move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(vec![1])
                    })
                    .await
                    .unwrap();
            }
            queries.clear().await;
        }

        // Both keys refetched after the clear.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn distinct_keys_fetch_independently() {
        let queries = client();
        let calls = Arc::new(AtomicUsize::new(0));

        for key in ["users", "users:42"] {
            let calls = calls.clone();
            let _: Vec<u32> = queries
                .fetch(key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1])
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
