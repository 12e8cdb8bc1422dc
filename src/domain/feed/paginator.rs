use super::cache::{PageCache, PageKey};
use super::error::FeedError;
use super::service::{FeedPage, FeedServiceApi};
use super::window::total_pages;
use crate::domain::article::SourceRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// What the consuming view renders for the feed
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub page_number: u32,
    pub page_size: u32,
    pub category: Option<String>,
    pub total_count: u64,
    pub records: Vec<SourceRecord>,
    /// Page the current `records` were fetched for; lags `page_number` while
    /// a navigation is loading
    pub records_page: Option<u32>,
    pub error: Option<FeedError>,
    /// Bumped on every navigation or category change
    pub generation: u64,
}

impl PageState {
    fn new(page_size: u32, category: Option<String>, generation: u64) -> Self {
        Self {
            page_number: 1,
            page_size,
            category,
            total_count: 0,
            records: Vec::new(),
            records_page: None,
            error: None,
            generation,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.page_size)
    }

    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn key(&self) -> PageKey {
        PageKey::new(self.page_number, self.category.clone())
    }

    fn apply_page(&mut self, page: FeedPage) {
        self.records = page.records;
        self.records_page = Some(page.page_number);
        self.total_count = page.total_count;
        self.error = None;
    }

    fn move_to(&mut self, page_number: u32) {
        if self.page_number == page_number {
            return;
        }
        self.page_number = page_number;
        self.error = None;
        self.generation += 1;
    }
}

/// Stateful feed paginator for one view.
///
/// Cloning shares the same state; the background refresh task holds a clone.
/// Results are only applied when the state generation they were requested
/// under is still current.
#[derive(Clone)]
pub struct Paginator {
    feed: Arc<dyn FeedServiceApi>,
    cache: Arc<PageCache>,
    state: Arc<Mutex<PageState>>,
}

impl Paginator {
    pub fn new(feed: Arc<dyn FeedServiceApi>, cache: Arc<PageCache>) -> Self {
        let state = PageState::new(feed.page_size(), None, 0);
        Self {
            feed,
            cache,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> PageState {
        self.state.lock().clone()
    }

    pub fn current_key(&self) -> PageKey {
        self.state.lock().key()
    }

    /// Jump to `page_number` without bounds checks against `total_pages`;
    /// page 0 is read as page 1
    pub fn go_to_page(&self, page_number: u32) {
        let mut state = self.state.lock();
        state.move_to(page_number.max(1));
    }

    pub fn go_to_next_page(&self) {
        let mut state = self.state.lock();
        if !state.has_more() {
            tracing::debug!(page_number = state.page_number, "No next page");
            return;
        }
        let next = state.page_number + 1;
        state.move_to(next);
    }

    pub fn go_to_previous_page(&self) {
        let mut state = self.state.lock();
        if !state.has_previous() {
            return;
        }
        let previous = state.page_number - 1;
        state.move_to(previous);
    }

    /// Switch the category filter, starting over at page 1 with an empty view
    pub fn set_category(&self, category: Option<String>) {
        let mut state = self.state.lock();
        if state.category == category {
            return;
        }
        tracing::info!(from = ?state.category, to = ?category, "Feed category changed");
        let generation = state.generation + 1;
        *state = PageState::new(state.page_size, category, generation);
    }

    /// Invalidate every request issued so far; their results are dropped when
    /// they arrive
    pub fn detach(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        tracing::debug!(generation = state.generation, "Paginator detached");
    }

    /// Load the current page, served from cache while fresh
    pub async fn load(&self) -> PageState {
        let (key, generation) = self.snapshot_request();
        let result = self
            .cache
            .get_or_fetch(key.clone(), self.fetcher(&key))
            .await;
        self.apply(key, generation, result)
    }

    /// Revalidate the current page even when the cached copy is fresh
    pub async fn refresh(&self) -> PageState {
        let (key, generation) = self.snapshot_request();
        let result = self.cache.revalidate(key.clone(), self.fetcher(&key)).await;
        self.apply(key, generation, result)
    }

    fn snapshot_request(&self) -> (PageKey, u64) {
        let state = self.state.lock();
        (state.key(), state.generation)
    }

    fn fetcher(
        &self,
        key: &PageKey,
    ) -> impl FnOnce() -> futures::future::BoxFuture<'static, Result<FeedPage, FeedError>> {
        let feed = Arc::clone(&self.feed);
        let page_number = key.page_number;
        let category = key.category.clone();
        move || {
            Box::pin(async move { feed.fetch_page(page_number, category.as_deref()).await })
        }
    }

    fn apply(&self, key: PageKey, generation: u64, result: Result<FeedPage, FeedError>) -> PageState {
        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(
                key = ?key,
                requested_generation = generation,
                current_generation = state.generation,
                "Discarding superseded page result"
            );
            return state.clone();
        }

        match result {
            Ok(page) => state.apply_page(page),
            Err(err) => {
                // keep the last good records and count on screen
                tracing::warn!(error = %err, key = ?key, "Feed page fetch failed");
                state.error = Some(err);
            }
        }

        state.clone()
    }
}
