use super::error::FeedError;
use super::service::FeedPage;
use futures::future::{BoxFuture, FutureExt, Shared};
use moka::future::Cache;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_CACHED_PAGES: u64 = 256;

/// Cache address of one page: the same page number in another category is a
/// different entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub page_number: u32,
    pub category: Option<String>,
}

impl PageKey {
    pub fn new(page_number: u32, category: Option<String>) -> Self {
        Self {
            page_number,
            category,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedPage {
    page: FeedPage,
    fetched_at: Instant,
}

type PageFetch = Shared<BoxFuture<'static, Result<FeedPage, FeedError>>>;

/// Page cache with a freshness window and a retention window.
///
/// Entries younger than the freshness window are served as-is; older ones are
/// revalidated on access. Entries nobody has read or written for the
/// retention window are evicted. At most one fetch per key is in flight;
/// later callers join it.
pub struct PageCache {
    entries: Cache<PageKey, CachedPage>,
    in_flight: Arc<Mutex<HashMap<PageKey, (u64, PageFetch)>>>,
    next_fetch_id: AtomicU64,
    freshness: Duration,
}

impl PageCache {
    pub fn new(freshness: Duration, retention: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_CACHED_PAGES)
            .time_to_idle(retention.max(freshness))
            .build();

        Self {
            entries,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_fetch_id: AtomicU64::new(0),
            freshness,
        }
    }

    /// Serve a fresh entry, otherwise fetch (or join the fetch in flight)
    pub async fn get_or_fetch<F, Fut>(&self, key: PageKey, fetch: F) -> Result<FeedPage, FeedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FeedPage, FeedError>> + Send + 'static,
    {
        if let Some(entry) = self.entries.get(&key).await {
            if entry.fetched_at.elapsed() < self.freshness {
                tracing::debug!(key = ?key, "Page cache hit");
                return Ok(entry.page);
            }
        }

        self.revalidate(key, fetch).await
    }

    /// Fetch regardless of freshness, unless a fetch for `key` is already in
    /// flight, in which case its result is shared
    pub async fn revalidate<F, Fut>(&self, key: PageKey, fetch: F) -> Result<FeedPage, FeedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FeedPage, FeedError>> + Send + 'static,
    {
        let pending = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(&key) {
                Some((_, existing)) => {
                    tracing::debug!(key = ?key, "Joining in-flight page fetch");
                    existing.clone()
                }
                None => {
                    let fetch_id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                    let shared = self.spawn_fetch(key.clone(), fetch_id, fetch());
                    in_flight.insert(key, (fetch_id, shared.clone()));
                    shared
                }
            }
        };

        pending.await
    }

    pub fn is_in_flight(&self, key: &PageKey) -> bool {
        self.in_flight.lock().contains_key(key)
    }

    /// Drop every pending fetch; futures nobody else awaits are cancelled
    pub fn abort_in_flight(&self) {
        let dropped = {
            let mut in_flight = self.in_flight.lock();
            std::mem::take(&mut *in_flight)
        };
        if !dropped.is_empty() {
            tracing::debug!(count = dropped.len(), "Dropped in-flight page fetches");
        }
    }

    /// Whether `key` is still retained, fresh or not
    pub fn contains(&self, key: &PageKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    fn spawn_fetch<Fut>(&self, key: PageKey, fetch_id: u64, fetch: Fut) -> PageFetch
    where
        Fut: Future<Output = Result<FeedPage, FeedError>> + Send + 'static,
    {
        let entries = self.entries.clone();
        let in_flight = Arc::clone(&self.in_flight);

        async move {
            let result = fetch.await;
            if let Ok(page) = &result {
                entries
                    .insert(
                        key.clone(),
                        CachedPage {
                            page: page.clone(),
                            fetched_at: Instant::now(),
                        },
                    )
                    .await;
            }
            {
                // a newer fetch may have replaced this one after abort_in_flight
                let mut pending = in_flight.lock();
                if pending.get(&key).is_some_and(|(id, _)| *id == fetch_id) {
                    pending.remove(&key);
                }
            }
            result
        }
        .boxed()
        .shared()
    }
}
