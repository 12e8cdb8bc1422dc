use crate::domain::article::ArticleSource;
use crate::domain::feed::{FeedService, FeedSettings, PageCache, Paginator, RefreshTask};
use crate::domain::interaction::{BookmarkRepository, BookmarkTracker, ViewCountRepository, ViewTracker};
use crate::domain::spotlight::{SpotlightService, SpotlightSource};
use crate::error::AppResult;
use parking_lot::Mutex;
use std::sync::Arc;

/// Store handles the engine reads from and writes to
#[derive(Clone)]
pub struct EngineDeps {
    pub articles: Arc<dyn ArticleSource>,
    pub spotlights: Arc<dyn SpotlightSource>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub views: Arc<dyn ViewCountRepository>,
}

/// Feed paging, spotlight selection and interaction tracking for one view.
///
/// The background refresh task belongs to this value: `shutdown` (or drop)
/// stops it and drops pending page fetches.
pub struct FeedEngine {
    settings: FeedSettings,
    cache: Arc<PageCache>,
    paginator: Paginator,
    refresh: Mutex<Option<RefreshTask>>,
    spotlight: SpotlightService,
    bookmarks: BookmarkTracker,
    views: Arc<dyn ViewCountRepository>,
}

impl FeedEngine {
    pub fn new(deps: EngineDeps, settings: FeedSettings) -> AppResult<Self> {
        settings.validate()?;

        let cache = Arc::new(PageCache::new(
            settings.freshness_window,
            settings.retention_window,
        ));
        let feed = Arc::new(FeedService::new(deps.articles, settings.page_size));
        let paginator = Paginator::new(feed, Arc::clone(&cache));

        tracing::info!(
            page_size = settings.page_size,
            freshness_ms = settings.freshness_window.as_millis() as u64,
            retention_ms = settings.retention_window.as_millis() as u64,
            refresh_interval_ms = settings.background_refresh_interval.as_millis() as u64,
            "Feed engine created"
        );

        Ok(Self {
            settings,
            cache,
            paginator,
            refresh: Mutex::new(None),
            spotlight: SpotlightService::new(deps.spotlights),
            bookmarks: BookmarkTracker::new(deps.bookmarks),
            views: deps.views,
        })
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn spotlight(&self) -> &SpotlightService {
        &self.spotlight
    }

    pub fn bookmarks(&self) -> &BookmarkTracker {
        &self.bookmarks
    }

    /// Fresh view counter for one session; each article counts once per tracker
    pub fn view_session(&self) -> ViewTracker {
        ViewTracker::new(Arc::clone(&self.views))
    }

    /// Start periodic revalidation of the displayed page, replacing any
    /// running task. Must be called inside a tokio runtime.
    pub fn start_background_refresh(&self) {
        let task = RefreshTask::spawn(
            self.paginator.clone(),
            self.settings.background_refresh_interval,
        );
        if let Some(previous) = self.refresh.lock().replace(task) {
            previous.cancel();
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn shutdown(&self) {
        if let Some(task) = self.refresh.lock().take() {
            task.cancel();
        }
        self.paginator.detach();
        self.cache.abort_in_flight();
    }
}

impl Drop for FeedEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
